pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PER_PAGE: u32 = 10;

/// One-based page request. Zero values fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    page: u32,
    per_page: u32,
}

impl PaginationRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            per_page: if per_page == 0 {
                DEFAULT_PER_PAGE
            } else {
                per_page
            },
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PER_PAGE)
    }
}

#[derive(Debug)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub max_page: i64,
    pub count: i64,
}

impl<T> PaginatedList<T> {
    pub fn new(items: Vec<T>, pagination: PaginationRequest, count: i64) -> Self {
        let per_page = i64::from(pagination.per_page());
        Self {
            items,
            page: pagination.page(),
            per_page: pagination.per_page(),
            max_page: (count + per_page - 1) / per_page,
            count,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedList<U> {
        PaginatedList {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            max_page: self.max_page,
            count: self.count,
        }
    }
}
