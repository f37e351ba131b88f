use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Paginated response envelope returned by the data API.
///
/// Only `error` and `next` are interpreted; everything else in the payload is
/// carried through to the client untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiPage {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// Non-paginated lookup envelope (`/genes`, `/snv`).
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub error: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneRecord {
    pub gene_name: String,
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
    #[serde(default)]
    pub gene_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantRecord {
    pub variant_id: String,
    #[serde(default)]
    pub rsids: Vec<String>,
    #[serde(default)]
    pub annotation: VariantAnnotation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantAnnotation {
    #[serde(default)]
    pub region: RegionAnnotation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionAnnotation {
    #[serde(default)]
    pub consequence: Vec<String>,
}

impl VariantRecord {
    /// Most severe consequence, used to label suggestions.
    pub fn consequence(&self) -> String {
        self.annotation
            .region
            .consequence
            .first()
            .cloned()
            .unwrap_or_default()
    }
}

/// Autocomplete suggestion handed to the search box.
#[derive(Debug, Serialize)]
pub struct Suggestion {
    pub value: String,
    pub data: SuggestionData,
}

#[derive(Debug, Serialize)]
#[serde(tag = "feature", rename_all = "lowercase")]
pub enum SuggestionData {
    Gene {
        chrom: String,
        start: u64,
        stop: u64,
        r#type: String,
    },
    Snv {
        variant_id: String,
        r#type: String,
    },
}

impl Suggestion {
    pub fn gene(gene: GeneRecord) -> Self {
        Suggestion {
            value: gene.gene_name,
            data: SuggestionData::Gene {
                chrom: gene.chrom,
                start: gene.start,
                stop: gene.stop,
                r#type: gene.gene_type,
            },
        }
    }

    pub fn snv(value: String, variant: &VariantRecord) -> Self {
        Suggestion {
            value,
            data: SuggestionData::Snv {
                variant_id: variant.variant_id.clone(),
                r#type: variant.consequence(),
            },
        }
    }
}

/// Variant categories the browser serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantsType {
    Snv,
    Sv,
}

impl VariantsType {
    pub fn as_str(self) -> &'static str {
        match self {
            VariantsType::Snv => "snv",
            VariantsType::Sv => "sv",
        }
    }
}

impl std::str::FromStr for VariantsType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "snv" => Ok(VariantsType::Snv),
            "sv" => Ok(VariantsType::Sv),
            _ => Err(Error::NotFound),
        }
    }
}

/// A `{chrom}-{start}-{stop}` path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPath {
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
}

impl std::str::FromStr for RegionPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let mut parts = s.rsplitn(3, '-');
        let (Some(stop), Some(start), Some(chrom)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::InvalidInput(format!("malformed region: {s}")));
        };
        let start = parse_coordinate("start", start)?;
        let stop = parse_coordinate("stop", stop)?;
        if chrom.is_empty() {
            return Err(Error::InvalidInput(
                "chrom must be a non-empty string".to_string(),
            ));
        }
        Ok(RegionPath {
            chrom: chrom.to_string(),
            start,
            stop,
        })
    }
}

/// A `{variant_id}-{heterozygous}-{sample_no}` path segment addressing one
/// sequence artifact. The variant id itself contains dashes, so the numeric
/// fields are split off from the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePath {
    pub variant_id: String,
    pub heterozygous: bool,
    pub sample_no: u32,
}

impl std::str::FromStr for SequencePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let mut parts = s.rsplitn(3, '-');
        let (Some(sample_no), Some(het), Some(variant_id)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::InvalidInput(format!(
                "malformed sequence artifact: {s}"
            )));
        };
        let sample_no: u32 = sample_no
            .parse()
            .map_err(|_| Error::InvalidInput("sample_no must be an integer".to_string()))?;
        if sample_no == 0 {
            return Err(Error::InvalidInput(
                "sample_no must be greater than 0".to_string(),
            ));
        }
        let heterozygous = match het {
            "0" => false,
            "1" => true,
            _ => {
                return Err(Error::InvalidInput(
                    "heterozygous flag must be 0 or 1".to_string(),
                ));
            }
        };
        if variant_id.is_empty() {
            return Err(Error::InvalidInput(
                "variant_id must be a non-empty string".to_string(),
            ));
        }
        Ok(SequencePath {
            variant_id: variant_id.to_string(),
            heterozygous,
            sample_no,
        })
    }
}

fn parse_coordinate(field: &str, value: &str) -> Result<u64, Error> {
    let parsed: u64 = value
        .parse()
        .map_err(|_| Error::InvalidInput(format!("{field} must be an integer")))?;
    if parsed == 0 {
        return Err(Error::InvalidInput(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_path_parse() {
        let region: RegionPath = "11-5226797-5226898".parse().unwrap();
        assert_eq!(region.chrom, "11");
        assert_eq!(region.start, 5226797);
        assert_eq!(region.stop, 5226898);
    }

    #[test]
    fn test_region_path_rejects_zero() {
        assert!("11-0-100".parse::<RegionPath>().is_err());
        assert!("11-100-0".parse::<RegionPath>().is_err());
    }

    #[test]
    fn test_region_path_rejects_malformed() {
        assert!("11-100".parse::<RegionPath>().is_err());
        assert!("11-abc-200".parse::<RegionPath>().is_err());
        assert!("-100-200".parse::<RegionPath>().is_err());
    }

    #[test]
    fn test_sequence_path_parse() {
        let seq: SequencePath = "11-5226797-G-A-1-5".parse().unwrap();
        assert_eq!(seq.variant_id, "11-5226797-G-A");
        assert!(seq.heterozygous);
        assert_eq!(seq.sample_no, 5);
    }

    #[test]
    fn test_sequence_path_rejects_bad_fields() {
        assert!("11-5226797-G-A-2-5".parse::<SequencePath>().is_err());
        assert!("11-5226797-G-A-1-0".parse::<SequencePath>().is_err());
        assert!("1-5".parse::<SequencePath>().is_err());
    }

    #[test]
    fn test_variants_type_parse() {
        assert_eq!("snv".parse::<VariantsType>().unwrap(), VariantsType::Snv);
        assert_eq!("sv".parse::<VariantsType>().unwrap(), VariantsType::Sv);
        assert!("cnv".parse::<VariantsType>().is_err());
    }
}
