//! Pagination utilities for service layer
//!
//! Listing is unbounded unless the caller asks for a page; this type only
//! exists on that opt-in path.

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    pub const MAX_PER_PAGE: u32 = 100;

    /// `None` when neither value was supplied, i.e. the caller wants everything.
    pub fn from_query(page: Option<u32>, per_page: Option<u32>) -> Option<Self> {
        if page.is_none() && per_page.is_none() {
            return None;
        }
        let d = Self::default();
        Some(Self { page: page.unwrap_or(d.page), per_page: per_page.unwrap_or(d.per_page) })
    }

    /// Clamp to sane defaults and convert to `u64`: (0-based page index, items per page)
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, Self::MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }

    /// Number of items to skip before this page starts.
    pub fn offset(self) -> u64 {
        let (idx, per) = self.normalize();
        idx * per
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}
