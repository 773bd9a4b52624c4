use serde::{Deserialize, Serialize};
use std::fmt;

/// External (1-based) page used when the request carries none.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the request carries none.
pub const DEFAULT_LIMIT: u32 = 50;

/// One unit of cacheable work: a page of the product aggregate.
///
/// `page` is stored 0-based. Requests arrive 1-based and are normalized
/// by [`QueryIdentity::from_request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryIdentity {
    page: u32,
    limit: u32,
}

impl QueryIdentity {
    /// Builds an identity from an already normalized (0-based) page.
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Normalizes raw query-string values.
    ///
    /// Values are read up to the first non-digit. Absent, non-numeric or
    /// non-positive pages fall back to page 1 and such limits fall back to
    /// [`DEFAULT_LIMIT`].
    pub fn from_request(page: Option<&str>, limit: Option<&str>) -> Self {
        let external_page = page
            .and_then(parse_positive)
            .unwrap_or(DEFAULT_PAGE);
        let limit = limit.and_then(parse_positive).unwrap_or(DEFAULT_LIMIT);

        Self {
            page: external_page - 1,
            limit,
        }
    }

    /// 0-based page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Row offset for the source query. Computed in `u64` so large pages
    /// cannot overflow.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }

    pub fn cache_key(&self) -> CacheKey {
        CacheKey::derive(self)
    }
}

/// Reads the leading run of digits, so `"10abc"` and `"2.5"` parse as 10
/// and 2. Signed, empty or non-numeric input yields `None`.
fn parse_positive(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let digits = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);

    digits.parse::<u32>().ok().filter(|value| *value > 0)
}

/// Cache key for a [`QueryIdentity`].
///
/// Format is `products:page:{page}:limit:{limit}` with the 0-based page.
/// External tooling inspects keys in this exact shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub const PREFIX: &'static str = "products";

    pub fn derive(identity: &QueryIdentity) -> Self {
        Self(format!(
            "{}:page:{}:limit:{}",
            Self::PREFIX,
            identity.page,
            identity.limit
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One row of the paginated product aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub total_orders: i64,
    pub avg_rating: f64,
    pub stock: i64,
}
