//! Pagination cursor rewriting.
//!
//! The data API pages results with absolute `next` URLs. Those URLs point at
//! the API host, which must never leak to the client, so outgoing payloads
//! keep only the path and query. Incoming cursors are resolved back against
//! the configured API base URL before dispatch.

use url::Url;

use crate::types::ApiPage;

/// Drop the scheme and network location from an absolute URL, keeping
/// path, query and fragment. Already-relative input is returned unchanged.
pub fn strip_origin(next: &str) -> String {
    let Ok(parsed) = Url::parse(next) else {
        return next.to_string();
    };
    let mut out = parsed.path().to_string();
    if let Some(query) = parsed.query() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = parsed.fragment() {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Reattach the API base URL to a client-supplied relative cursor.
pub fn resolve(base_url: &str, cursor: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), cursor)
}

/// Rewrite the `next` field of a successful page in place.
pub fn rewrite_next(page: &mut ApiPage) {
    if page.error {
        return;
    }
    if let Some(next) = page.next.take() {
        page.next = Some(strip_origin(&next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_origin_removes_host() {
        assert_eq!(
            strip_origin("https://api.internal/region/snv?cursor=abc"),
            "/region/snv?cursor=abc"
        );
    }

    #[test]
    fn test_strip_origin_keeps_port_free_path() {
        assert_eq!(
            strip_origin("http://10.0.0.5:9000/coverage?chrom=11&limit=500&cursor=xyz"),
            "/coverage?chrom=11&limit=500&cursor=xyz"
        );
    }

    #[test]
    fn test_strip_origin_passes_relative_through() {
        assert_eq!(
            strip_origin("/region/snv?cursor=abc"),
            "/region/snv?cursor=abc"
        );
    }

    #[test]
    fn test_resolve_prepends_base() {
        assert_eq!(
            resolve("http://api.internal", "/region/snv?cursor=abc"),
            "http://api.internal/region/snv?cursor=abc"
        );
        assert_eq!(
            resolve("http://api.internal/", "/region/snv?cursor=abc"),
            "http://api.internal/region/snv?cursor=abc"
        );
    }

    #[test]
    fn test_rewrite_next_skips_error_pages() {
        let mut page = ApiPage {
            error: true,
            next: Some("https://api.internal/region/snv?cursor=abc".to_string()),
            rest: serde_json::Map::new(),
        };
        rewrite_next(&mut page);
        assert_eq!(
            page.next.as_deref(),
            Some("https://api.internal/region/snv?cursor=abc")
        );
    }

    #[test]
    fn test_rewrite_next_strips_successful_pages() {
        let mut page = ApiPage {
            error: false,
            next: Some("https://api.internal/region/snv?cursor=abc".to_string()),
            rest: serde_json::Map::new(),
        };
        rewrite_next(&mut page);
        assert_eq!(page.next.as_deref(), Some("/region/snv?cursor=abc"));
    }

    #[test]
    fn test_rewrite_next_handles_exhausted_pages() {
        let mut page = ApiPage {
            error: false,
            next: None,
            rest: serde_json::Map::new(),
        };
        rewrite_next(&mut page);
        assert!(page.next.is_none());
    }
}
