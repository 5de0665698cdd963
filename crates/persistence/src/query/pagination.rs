//! Page and limit normalization.

use serde::{Deserialize, Serialize};

/// Bounds applied to client-requested page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Limit used when the request gives none or an out-of-range one.
    pub default_limit: u64,
    /// Largest limit a request may ask for.
    pub max_limit: u64,
}

impl PageLimits {
    /// The default page size.
    pub const DEFAULT_LIMIT: u64 = 10;

    /// The largest page size a client may request.
    pub const MAX_LIMIT: u64 = 200;

    /// Creates custom limits.
    pub fn new(default_limit: u64, max_limit: u64) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, Self::MAX_LIMIT)
    }
}

/// A normalized page request.
///
/// `page` is at least 1 and has no upper bound. `limit` is within
/// `1..=max_limit` for any [`PageLimits`] with a non-zero default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Normalizes raw values against the default limits.
    pub fn normalize(raw_page: Option<i64>, raw_limit: Option<i64>) -> Self {
        Self::normalize_with(raw_page, raw_limit, PageLimits::default())
    }

    /// Normalizes raw values.
    ///
    /// A missing or non-positive page becomes 1. A missing, non-positive or
    /// too-large limit becomes the default limit; it is reset, not clamped.
    pub fn normalize_with(raw_page: Option<i64>, raw_limit: Option<i64>, limits: PageLimits) -> Self {
        let page = match raw_page {
            Some(p) if p > 0 => p as u64,
            _ => 1,
        };
        let limit = match raw_limit {
            Some(l) if l > 0 && (l as u64) <= limits.max_limit => l as u64,
            _ => limits.default_limit,
        };
        Self { page, limit }
    }

    /// The 1-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The page size.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Records to skip before this page.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Records to fetch for this page.
    pub fn take(&self) -> u64 {
        self.limit
    }

    /// Number of pages needed to show `total` records.
    pub fn total_pages(&self, total: u64) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        total.div_ceil(self.limit)
    }
}
