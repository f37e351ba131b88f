//! Translation of client filter/sort payloads into the data API's
//! query-string grammar.
//!
//! The browser's table widget posts filters either as single descriptors or
//! as groups (a list of descriptors on one field, e.g. a closed interval).
//! A single descriptor becomes `field=cmp:value`; a group becomes
//! `field=cmp1:val1,cmp2:val2,...`. Groups that are empty or mix fields are
//! not translatable and are dropped without raising an error.

use serde::Deserialize;

/// Comparison operators understood by the data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
}

impl Comparator {
    /// Map a client comparator symbol to its API token. Unknown or missing
    /// symbols default to equality.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "=" => Comparator::Eq,
            "!=" => Comparator::Ne,
            "<" => Comparator::Lt,
            ">" => Comparator::Gt,
            "<=" => Comparator::Lte,
            ">=" => Comparator::Gte,
            _ => Comparator::Eq,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Comparator::Eq => "eq",
            Comparator::Ne => "ne",
            Comparator::Lt => "lt",
            Comparator::Gt => "gt",
            Comparator::Lte => "lte",
            Comparator::Gte => "gte",
        }
    }
}

/// One field comparison from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterDescriptor {
    pub field: String,
    #[serde(rename = "type", default)]
    pub comparator: Option<String>,
    pub value: serde_json::Value,
}

impl FilterDescriptor {
    fn token(&self) -> &'static str {
        Comparator::from_symbol(self.comparator.as_deref().unwrap_or_default()).token()
    }

    fn condition(&self) -> String {
        format!("{}:{}", self.token(), render_value(&self.value))
    }
}

/// A filter entry is a bare descriptor or a group sharing one field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FilterEntry {
    Group(Vec<FilterDescriptor>),
    Single(FilterDescriptor),
}

#[derive(Debug, Clone, Deserialize)]
pub struct SortDescriptor {
    pub field: String,
    pub dir: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// JSON body accepted by the listing, histogram and summary endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    #[serde(default)]
    pub filters: Vec<FilterEntry>,
    #[serde(default)]
    pub sorters: Vec<SortDescriptor>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub introns: Option<bool>,
    #[serde(default)]
    pub windows: Option<u32>,
}

/// Translate filter entries into `field=...` query parameters.
/// Untranslatable groups are skipped.
pub fn filter_args(filters: &[FilterEntry]) -> Vec<String> {
    let mut args = Vec::new();
    for entry in filters {
        match entry {
            FilterEntry::Single(f) => {
                args.push(format!("{}={}", f.field, f.condition()));
            }
            FilterEntry::Group(group) => {
                let Some(first) = group.first() else { continue };
                if group.iter().any(|f| f.field != first.field) {
                    continue;
                }
                let conditions: Vec<String> = group.iter().map(|f| f.condition()).collect();
                args.push(format!("{}={}", first.field, conditions.join(",")));
            }
        }
    }
    args
}

/// Render the `sort=` parameter, or nothing when no sorters were given.
pub fn sort_arg(sorters: &[SortDescriptor]) -> Option<String> {
    if sorters.is_empty() {
        return None;
    }
    let fields: Vec<String> = sorters
        .iter()
        .map(|s| format!("{}:{}", s.field, s.dir.as_str()))
        .collect();
    Some(format!("sort={}", fields.join(",")))
}

/// Filter values arrive as JSON scalars and render unquoted.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
