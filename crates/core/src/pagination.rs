//! Pagination model shared by every list endpoint.
//!
//! The backend is not consistent about how it names pagination fields, so
//! [`PaginationMeta`] accepts every spelling seen in the wild and [`Page`]
//! normalizes them into one shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Page size used when neither the caller nor the configuration provides one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Page/limit pair sent as query parameters on list requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: u32,
    /// Maximum number of items per page.
    pub limit: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageQuery {
    /// Build a query, clamping the page to 1 and replacing a zero limit with
    /// `default_limit`.
    pub fn new(page: u32, limit: Option<u32>, default_limit: u32) -> Self {
        let fallback = if default_limit == 0 {
            DEFAULT_LIMIT
        } else {
            default_limit
        };
        Self {
            page: page.max(1),
            limit: limit.filter(|l| *l > 0).unwrap_or(fallback),
        }
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ]
    }
}

/// Pagination block as sent by the server. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default, alias = "currentPage", alias = "current_page", deserialize_with = "lenient_u64")]
    pub page: Option<u64>,

    #[serde(default, alias = "pageSize", alias = "perPage", alias = "per_page", deserialize_with = "lenient_u64")]
    pub limit: Option<u64>,

    #[serde(default, alias = "totalItems", alias = "total_items", alias = "count", deserialize_with = "lenient_u64")]
    pub total: Option<u64>,

    #[serde(default, alias = "total_pages", deserialize_with = "lenient_u64")]
    pub total_pages: Option<u64>,

    #[serde(default, alias = "has_more")]
    pub has_more: Option<bool>,
}

/// Accept numbers, numeric strings and `null`. Some database drivers behind
/// the API serialize `COUNT(*)` as a string.
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

/// `ceil(total / limit)`; zero when the limit is zero.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
}

/// One normalized page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    /// Explicit continuation flag, when the server sends one.
    pub has_more: Option<bool>,
}

impl<T> Page<T> {
    /// Normalize a server page.
    ///
    /// Missing fields fall back to the request: `page`/`limit` to what was
    /// asked for, `total` to the number of items received, `total_pages` to
    /// `ceil(total / limit)`.
    pub fn from_parts(items: Vec<T>, meta: Option<PaginationMeta>, requested: PageQuery) -> Self {
        let meta = meta.unwrap_or_default();

        let page = meta
            .page
            .and_then(|p| u32::try_from(p).ok())
            .filter(|p| *p > 0)
            .unwrap_or(requested.page);
        let limit = meta
            .limit
            .and_then(|l| u32::try_from(l).ok())
            .filter(|l| *l > 0)
            .unwrap_or(requested.limit);
        let total = meta.total.unwrap_or(items.len() as u64);
        let total_pages = meta
            .total_pages
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .unwrap_or_else(|| total_pages(total, limit));

        Self {
            items,
            page,
            limit,
            total,
            total_pages,
            has_more: meta.has_more,
        }
    }

    /// Whether a following page exists.
    pub fn has_next(&self) -> bool {
        self.has_more.unwrap_or(self.page < self.total_pages)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn page_query_clamps_page_and_defaults_limit() {
        let q = PageQuery::new(0, Some(0), 25);
        assert_eq!(q, PageQuery { page: 1, limit: 25 });

        let q = PageQuery::new(3, None, 0);
        assert_eq!(q, PageQuery { page: 3, limit: DEFAULT_LIMIT });

        let q = PageQuery::new(2, Some(50), 25);
        assert_eq!(q.to_pairs(), vec![
            ("page".to_string(), "2".to_string()),
            ("limit".to_string(), "50".to_string()),
        ]);
    }

    #[test]
    fn meta_accepts_alternate_field_names() {
        let meta: PaginationMeta = serde_json::from_str(
            r#"{"currentPage": 2, "pageSize": 20, "totalItems": "45", "hasMore": true}"#,
        )
        .unwrap();
        assert_eq!(meta.page, Some(2));
        assert_eq!(meta.limit, Some(20));
        assert_eq!(meta.total, Some(45));
        assert_eq!(meta.total_pages, None);
        assert_eq!(meta.has_more, Some(true));

        let meta: PaginationMeta =
            serde_json::from_str(r#"{"page": 1, "limit": 10, "total": 7, "total_pages": 1}"#)
                .unwrap();
        assert_eq!(meta.total_pages, Some(1));
    }

    #[test]
    fn total_pages_is_computed_when_absent() {
        let meta = PaginationMeta {
            total: Some(21),
            ..Default::default()
        };
        let page = Page::from_parts(vec![1, 2, 3], Some(meta), PageQuery { page: 3, limit: 10 });
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
        assert!(!page.has_next());
    }

    #[test]
    fn server_total_pages_wins_over_computation() {
        let meta = PaginationMeta {
            total: Some(21),
            total_pages: Some(5),
            ..Default::default()
        };
        let page = Page::from_parts(vec!["a"], Some(meta), PageQuery { page: 1, limit: 10 });
        assert_eq!(page.total_pages, 5);
        assert!(page.has_next());
    }

    #[test]
    fn missing_meta_falls_back_to_request_and_item_count() {
        let page = Page::from_parts(vec![1, 2], None, PageQuery { page: 1, limit: 10 });
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn explicit_has_more_overrides_page_math() {
        let meta = PaginationMeta {
            has_more: Some(false),
            total: Some(100),
            ..Default::default()
        };
        let page = Page::from_parts(vec![0; 10], Some(meta), PageQuery { page: 1, limit: 10 });
        assert!(!page.has_next());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the computed page count always covers every item, and
        /// never leaves a trailing empty page.
        #[test]
        fn total_pages_covers_total_exactly(total in 0u64..1_000_000, limit in 1u32..500) {
            let pages = u64::from(total_pages(total, limit));
            prop_assert!(pages * u64::from(limit) >= total);
            if total > 0 {
                prop_assert!((pages - 1) * u64::from(limit) < total);
            } else {
                prop_assert_eq!(pages, 0);
            }
        }
    }
}
