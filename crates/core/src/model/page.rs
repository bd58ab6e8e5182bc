use serde::Deserialize;

/// One page of a server-paginated listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new", alias = "courses", alias = "users", alias = "data")]
    pub items: Vec<T>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default, alias = "totalPages")]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            pages: 0,
            total: 0,
        }
    }
}

impl<T> Page<T> {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// Page cursor sent as `page`/`limit` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u32 = 10;

    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, 100),
        }
    }

    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::new(self.page.saturating_add(1), self.limit)
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self::new(self.page.saturating_sub(1), self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}
