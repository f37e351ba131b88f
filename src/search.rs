//! Free-text search classification.
//!
//! A search box query is ambiguous: it may name a region, an exact variant,
//! an rsID or a gene. Classification runs a fixed-priority cascade of
//! (pattern, lookup) stages and returns the first confirmed outcome. A stage
//! whose pattern does not match, whose backend lookup fails, or whose
//! exactness check comes up empty falls through to the next stage; partial
//! matches never resolve.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::backend::ApiClient;
use crate::types::Suggestion;

/// Combined cap on autocomplete suggestions.
pub const MAX_SUGGESTIONS: usize = 10;

const CHR_PATTERN: &str = r"(?:CHR)?(\d+|X|Y|M|MT)";

static REGION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^{CHR_PATTERN}\s*[-:/]\s*([\d,]+)\s*[-:/]\s*([\d,]+)$"
    ))
    .unwrap()
});

static VARIANT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)^{CHR_PATTERN}\s*[-:/]\s*([\d,]+)\s*[-:/]\s*([ATCG]+)\s*[-:/]\s*([ATCG]+)$"
    ))
    .unwrap()
});

static RSID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^rs\d+$").unwrap());

/// Canonical interpretation of a search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Region {
        chrom: String,
        start: u64,
        stop: u64,
    },
    Variant {
        variant_id: String,
    },
    Gene {
        gene_name: String,
    },
    NotFound,
}

/// Resolve a free-text query to a canonical outcome.
pub async fn classify(api: &ApiClient, value: &str) -> SearchOutcome {
    if let Some(outcome) = match_region(value) {
        return outcome;
    }
    if let Some(variant_id) = match_variant_id(value) {
        if let Some(outcome) = lookup_variant_id(api, &variant_id).await {
            return outcome;
        }
    }
    if RSID_RE.is_match(value) {
        if let Some(outcome) = lookup_rsid(api, value).await {
            return outcome;
        }
    }
    if let Some(outcome) = lookup_gene(api, value).await {
        return outcome;
    }
    SearchOutcome::NotFound
}

/// Parse a `chr start stop` region. Purely syntactic, no lookup involved.
pub fn match_region(value: &str) -> Option<SearchOutcome> {
    let caps = REGION_RE.captures(value)?;
    Some(SearchOutcome::Region {
        chrom: caps[1].to_uppercase(),
        start: parse_grouped_number(&caps[2])?,
        stop: parse_grouped_number(&caps[3])?,
    })
}

/// Parse a `chr pos ref alt` query into a normalized variant id:
/// uppercase `CHROM-POS-REF-ALT` with any leading `CHR` token removed.
pub fn match_variant_id(value: &str) -> Option<String> {
    let caps = VARIANT_RE.captures(value)?;
    let pos = parse_grouped_number(&caps[2])?;
    let id = format!("{}-{}-{}-{}", &caps[1], pos, &caps[3], &caps[4]).to_uppercase();
    Some(match id.strip_prefix("CHR") {
        Some(stripped) => stripped.to_string(),
        None => id,
    })
}

async fn lookup_variant_id(api: &ApiClient, variant_id: &str) -> Option<SearchOutcome> {
    let envelope = match api.snv_by_id(variant_id).await {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::debug!(%err, variant_id, "variant id lookup failed");
            return None;
        }
    };
    if envelope.error {
        return None;
    }
    envelope
        .data
        .iter()
        .find(|v| v.variant_id == variant_id)
        .map(|v| SearchOutcome::Variant {
            variant_id: v.variant_id.clone(),
        })
}

/// Succeeds only when a returned variant carries the queried rsID verbatim.
async fn lookup_rsid(api: &ApiClient, rsid: &str) -> Option<SearchOutcome> {
    let envelope = match api.snv_by_id(rsid).await {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::debug!(%err, rsid, "rsid lookup failed");
            return None;
        }
    };
    if envelope.error {
        return None;
    }
    envelope
        .data
        .iter()
        .find(|v| v.rsids.iter().any(|r| r == rsid))
        .map(|v| SearchOutcome::Variant {
            variant_id: v.variant_id.clone(),
        })
}

/// Succeeds only on an exact case-insensitive gene name match.
async fn lookup_gene(api: &ApiClient, name: &str) -> Option<SearchOutcome> {
    let envelope = match api.genes_by_name(name).await {
        Ok(envelope) => envelope,
        Err(err) => {
            tracing::debug!(%err, name, "gene lookup failed");
            return None;
        }
    };
    if envelope.error {
        return None;
    }
    let upper = name.to_uppercase();
    envelope
        .data
        .iter()
        .any(|g| g.gene_name.to_uppercase() == upper)
        .then(|| SearchOutcome::Gene { gene_name: upper })
}

/// Suggestions for a partially typed query: gene name prefix matches first,
/// rsID prefix matches appended when the query starts with `rs`, the whole
/// list capped at [`MAX_SUGGESTIONS`].
pub async fn autocomplete(api: &ApiClient, query: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    if query.is_empty() {
        return suggestions;
    }

    match api.genes_by_name(query).await {
        Ok(envelope) if !envelope.error => {
            suggestions.extend(envelope.data.into_iter().map(Suggestion::gene));
        }
        Ok(_) => {}
        Err(err) => tracing::debug!(%err, query, "gene suggestion lookup failed"),
    }

    if suggestions.len() < MAX_SUGGESTIONS && query.starts_with("rs") {
        match api.snv_by_id(query).await {
            Ok(envelope) if !envelope.error => {
                for variant in &envelope.data {
                    let Some(rsid) = variant.rsids.iter().find(|r| r.starts_with(query)) else {
                        continue;
                    };
                    suggestions.push(Suggestion::snv(rsid.clone(), variant));
                }
            }
            Ok(_) => {}
            Err(err) => tracing::debug!(%err, query, "rsid suggestion lookup failed"),
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

fn parse_grouped_number(digits: &str) -> Option<u64> {
    digits.replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(chrom: &str, start: u64, stop: u64) -> SearchOutcome {
        SearchOutcome::Region {
            chrom: chrom.to_string(),
            start,
            stop,
        }
    }

    #[test]
    fn test_region_colon_dash() {
        assert_eq!(match_region("chr2:100-200"), Some(region("2", 100, 200)));
    }

    #[test]
    fn test_region_all_dashes() {
        assert_eq!(
            match_region("11-5226797-5226898"),
            Some(region("11", 5226797, 5226898))
        );
    }

    #[test]
    fn test_region_slashes_and_whitespace() {
        assert_eq!(
            match_region("chrX / 1,000 / 2,000"),
            Some(region("X", 1000, 2000))
        );
    }

    #[test]
    fn test_region_chromosome_case_insensitive() {
        assert_eq!(match_region("CHRmt:5-10"), Some(region("MT", 5, 10)));
        assert_eq!(match_region("y:5-10"), Some(region("Y", 5, 10)));
    }

    #[test]
    fn test_region_rejects_trailing_garbage() {
        assert!(match_region("chr2:100-200 extra").is_none());
        assert!(match_region("chr2:100").is_none());
        assert!(match_region("chr25q:100-200").is_none());
    }

    #[test]
    fn test_variant_id_normalization() {
        assert_eq!(
            match_variant_id("chr11:5226797:g:a").as_deref(),
            Some("11-5226797-G-A")
        );
        assert_eq!(
            match_variant_id("11-5,226,797-G-A").as_deref(),
            Some("11-5226797-G-A")
        );
    }

    #[test]
    fn test_variant_id_restricts_bases() {
        assert!(match_variant_id("11-100-G-N").is_none());
        assert!(match_variant_id("11-100-GU-A").is_none());
    }

    #[test]
    fn test_variant_id_multibase_alleles() {
        assert_eq!(
            match_variant_id("2-100-AT-cg").as_deref(),
            Some("2-100-AT-CG")
        );
    }

    #[test]
    fn test_rsid_pattern() {
        assert!(RSID_RE.is_match("rs334"));
        assert!(!RSID_RE.is_match("RS334"));
        assert!(!RSID_RE.is_match("rs"));
        assert!(!RSID_RE.is_match("rs334x"));
    }

    #[test]
    fn test_gene_names_do_not_match_patterns() {
        assert!(match_region("PCSK9").is_none());
        assert!(match_variant_id("PCSK9").is_none());
        assert!(!RSID_RE.is_match("PCSK9"));
    }
}
