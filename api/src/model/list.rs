use garde::Validate;
use kernel::model::list::{PaginatedList, PaginationRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQuery {
    #[garde(skip)]
    #[serde(default)]
    pub page: u32,
    #[garde(range(max = 100))]
    #[serde(default)]
    pub per_page: u32,
}

impl From<ListQuery> for PaginationRequest {
    fn from(value: ListQuery) -> Self {
        let ListQuery { page, per_page } = value;
        PaginationRequest::new(page, per_page)
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub max_page: i64,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T, U: Into<T>> From<PaginatedList<U>> for ListResponse<T> {
    fn from(value: PaginatedList<U>) -> Self {
        let PaginatedList {
            items,
            page,
            per_page,
            max_page,
            count,
        } = value;
        Self {
            data: items.into_iter().map(Into::into).collect(),
            meta: PaginationMeta {
                page,
                per_page,
                max_page,
                count,
            },
        }
    }
}
