//! Pagination of filtered, sorted result sets.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 30;

/// A 1-based page request. Zero values fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(rename = "pageSize", default = "default_page_size")]
    pub page_size: usize,
}

fn first_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }.normalized()
    }

    fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            page_size: if self.page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                self.page_size
            },
        }
    }

    pub fn offset(&self) -> usize {
        let p = self.normalized();
        (p.page - 1).saturating_mul(p.page_size)
    }
}

/// One page of results plus totals for the whole filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub page: usize,
    #[serde(rename = "pageSize")]
    pub page_size: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `rows` to the requested page. A page past the end is empty.
    pub fn paginate(rows: Vec<T>, pagination: Pagination) -> Self {
        let pagination = pagination.normalized();
        let total = rows.len();
        let data: Vec<T> = rows
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.page_size)
            .collect();
        Self {
            data,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages: total.div_ceil(pagination.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_of_twenty_five() {
        let page = Page::paginate((1..=25).collect(), Pagination::new(2, 10));
        assert_eq!(page.data, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn past_the_end_is_empty() {
        let page = Page::paginate(vec![1, 2, 3], Pagination::new(5, 2));
        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 5);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn zero_values_use_defaults() {
        let p = Pagination::new(0, 0);
        assert_eq!(p, Pagination::default());
        let page = Page::paginate(Vec::<i32>::new(), Pagination { page: 0, page_size: 0 });
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn wire_names() {
        let p: Pagination = serde_json::from_str(r#"{"page": 3}"#).unwrap();
        assert_eq!(p, Pagination::new(3, 30));
        let json = serde_json::to_value(Page::paginate(vec![1], Pagination::default())).unwrap();
        assert_eq!(json["pageSize"], 30);
        assert_eq!(json["totalPages"], 1);
    }
}
