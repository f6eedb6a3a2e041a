//! Search and pagination over an in-memory collection.

use crate::models::{Item, ItemPage, ItemQuery};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;

/// Effective page window after coercion and clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Clamps `page` to at least 1 and `limit` to `1..=MAX_LIMIT`.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: page.max(1) as u64,
            limit: limit.clamp(1, MAX_LIMIT as i64) as u64,
        }
    }

    /// Lenient parse of raw query values. Missing or non-integer values use
    /// the defaults before clamping.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |raw: Option<&str>, default: u64| {
            raw.and_then(|value| value.trim().parse::<i64>().ok())
                .unwrap_or(default as i64)
        };

        Self::new(parse(page, DEFAULT_PAGE), parse(limit, DEFAULT_LIMIT))
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit) as usize
    }
}

impl ItemQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_raw(self.page.as_deref(), self.limit.as_deref())
    }

    /// Search term, if one was given and is not empty.
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

/// Case-insensitive substring match on the item name only.
pub fn name_matches(item: &Item, needle_lowercase: &str) -> bool {
    item.name.to_lowercase().contains(needle_lowercase)
}

/// Filters `collection` by `search`, then cuts out the requested page.
///
/// `total` counts every match, not just the returned page.
pub fn list(collection: Vec<Item>, search: Option<&str>, pagination: Pagination) -> ItemPage {
    let filtered: Vec<Item> = match search {
        Some(q) => {
            let needle = q.to_lowercase();
            collection
                .into_iter()
                .filter(|item| name_matches(item, &needle))
                .collect()
        }
        None => collection,
    };

    let total = filtered.len();
    let items = filtered
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.limit as usize)
        .collect();

    ItemPage {
        items,
        total,
        page: pagination.page,
        limit: pagination.limit,
    }
}

/// First item with exactly this id.
pub fn find(collection: &[Item], id: u64) -> Option<&Item> {
    collection.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Item> {
        [
            (1, "Laptop Pro", "Electronics", 2499.0),
            (2, "Noise Cancelling Headphones", "Electronics", 399.0),
            (3, "Ultra‑Wide Monitor", "Electronics", 999.0),
            (4, "Ergonomic Chair", "Furniture", 799.0),
            (5, "Standing Desk", "Furniture", 1199.0),
        ]
        .into_iter()
        .map(|(id, name, category, price)| Item {
            id,
            name: name.to_string(),
            category: category.to_string(),
            price,
        })
        .collect()
    }

    #[test]
    fn test_defaults_return_everything() {
        let page = list(sample(), None, Pagination::default());
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total, 5);
        assert_eq!((page.page, page.limit), (1, 20));
    }

    #[test]
    fn test_second_page_of_two() {
        let page = list(sample(), None, Pagination::new(2, 2));
        let ids: Vec<u64> = page.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_search_is_case_insensitive_and_name_only() {
        let page = list(sample(), Some("MONITOR"), Pagination::default());
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Ultra‑Wide Monitor");

        let by_category = list(sample(), Some("furniture"), Pagination::default());
        assert_eq!(by_category.total, 0);
        assert!(by_category.items.is_empty());
    }

    #[test]
    fn test_total_counts_matches_before_paging() {
        let page = list(sample(), Some("e"), Pagination::new(1, 1));
        let expected = sample()
            .iter()
            .filter(|i| i.name.to_lowercase().contains('e'))
            .count();
        assert_eq!(page.total, expected);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_pages_concatenate_to_filtered_collection() {
        for limit in 1..=6 {
            let mut seen = Vec::new();
            let mut page_no = 1;
            loop {
                let page = list(sample(), None, Pagination::new(page_no, limit));
                assert!(page.items.len() as u64 <= page.limit);
                if page.items.is_empty() {
                    break;
                }
                seen.extend(page.items.into_iter().map(|i| i.id));
                page_no += 1;
            }
            assert_eq!(seen, vec![1, 2, 3, 4, 5], "limit {}", limit);
        }
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = list(sample(), None, Pagination::new(10, 20));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_pagination_clamps_and_falls_back() {
        assert_eq!(Pagination::from_raw(Some("0"), Some("-5")), Pagination::new(1, 1));
        assert_eq!(
            Pagination::from_raw(Some("abc"), Some("xyz")),
            Pagination::default()
        );
        assert_eq!(Pagination::from_raw(None, Some("1000")).limit, MAX_LIMIT);
        assert_eq!(Pagination::from_raw(Some(" 3 "), None).page, 3);
    }

    #[test]
    fn test_empty_search_is_no_filter() {
        let query = ItemQuery {
            q: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.search(), None);
    }

    #[test]
    fn test_find_by_id() {
        let items = sample();
        assert_eq!(find(&items, 2).map(|i| i.name.as_str()), Some("Noise Cancelling Headphones"));
        assert!(find(&items, 999).is_none());
    }
}
