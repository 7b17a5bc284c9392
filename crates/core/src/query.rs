//! Query vocabulary shared by the HTTP layer and the store adapters.

use std::cmp::Ordering;

use serde_json::Value;

use crate::listing::Listing;

/// Maximum number of listings returned by a name search.
pub const SEARCH_LIMIT: usize = 20;

/// Ordering applied to a seller's listings.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PriceSort {
    Ascending,
    Descending,
    /// Whatever order the store yields.
    #[default]
    Natural,
}

impl PriceSort {
    /// Map the `sort` query parameter: `asc` and `dsc` are recognised,
    /// everything else (including absence) means natural order.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("asc") => Self::Ascending,
            Some("dsc") => Self::Descending,
            _ => Self::Natural,
        }
    }

    /// Sort direction as the document store expects it (`1` / `-1`).
    pub fn direction(&self) -> Option<i32> {
        match self {
            Self::Ascending => Some(1),
            Self::Descending => Some(-1),
            Self::Natural => None,
        }
    }

    /// Stable in-place sort of listings by price.
    pub fn apply(&self, listings: &mut [Listing]) {
        match self {
            Self::Ascending => {
                listings.sort_by(|a, b| compare_prices(a.fields.price(), b.fields.price()))
            }
            Self::Descending => {
                listings.sort_by(|a, b| compare_prices(b.fields.price(), a.fields.price()))
            }
            Self::Natural => {}
        }
    }
}

/// Total order over price values, following the document store's
/// cross-type ordering: missing/null, numbers, strings, objects, arrays,
/// booleans.
pub fn compare_prices(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (ra, rb) = (type_rank(a), type_rank(b));
    if ra != rb {
        return ra.cmp(&rb);
    }

    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn type_rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

/// Name search as a literal substring.
///
/// The raw query text is never compiled as a pattern; adapters that only
/// offer pattern matching must escape the needle first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameSearch {
    needle: Option<String>,
}

impl NameSearch {
    /// Match every listing.
    pub fn all() -> Self {
        Self { needle: None }
    }

    pub fn containing(needle: impl Into<String>) -> Self {
        Self {
            needle: Some(needle.into()),
        }
    }

    pub fn from_param(param: Option<String>) -> Self {
        Self { needle: param }
    }

    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }

    /// Case-sensitive literal containment against the listing name.
    ///
    /// With a needle set, listings without a string name never match.
    pub fn matches(&self, listing: &Listing) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => listing
                .fields
                .name()
                .is_some_and(|name| name.contains(needle.as_str())),
        }
    }
}
