//! Page/limit arithmetic shared by the paginated endpoints

use notes_store::Window;
use serde::Deserialize;

use crate::{Result, WebError};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 100;

/// Raw `page`/`limit` query parameters
///
/// Signed so that `page=0` or `limit=-5` reach validation instead of failing
/// deserialization with a less helpful message.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A validated page request: `page >= 1`, `1 <= limit <= 100`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

/// `next`/`previous` links for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Result<Self> {
        if page < 1 {
            return Err(WebError::Validation(
                "page must be greater than or equal to 1".to_string(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(WebError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        Ok(Self { page, limit })
    }

    pub fn from_query(query: &PageQuery) -> Result<Self> {
        let page = query.page.map_or(Ok(DEFAULT_PAGE), |p| non_negative("page", p))?;
        let limit = query
            .limit
            .map_or(Ok(DEFAULT_LIMIT), |l| non_negative("limit", l))?;
        Self::new(page, limit)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The `skip`/`limit` slice for this page
    pub fn window(&self) -> Window {
        Window::new((self.page - 1).saturating_mul(self.limit), self.limit)
    }

    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.limit)
    }

    pub fn has_next(&self, count: u64) -> bool {
        self.page < self.total_pages(count)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Links relative to `base_path`, e.g. `/notes/?page=2&limit=50`
    pub fn links(&self, base_path: &str, count: u64) -> PageLinks {
        let link = |page: u64| format!("{base_path}?page={page}&limit={}", self.limit);
        PageLinks {
            next: self.has_next(count).then(|| link(self.page + 1)),
            previous: self.has_previous().then(|| link(self.page - 1)),
        }
    }
}

fn non_negative(name: &str, value: i64) -> Result<u64> {
    u64::try_from(value).map_err(|_| match name {
        "page" => WebError::Validation("page must be greater than or equal to 1".to_string()),
        _ => WebError::Validation(format!("{name} must be between 1 and {MAX_LIMIT}")),
    })
}
