//! Accretive "load more" store.
//!
//! Page 1 starts a fresh sequence; every later page is appended in server
//! order. Whether more can be requested comes from the server's `hasMore`
//! when it sends one, otherwise from `accumulated >= page * limit`.

use taller_client::{ApiError, PagedSource};
use taller_core::{ListFilters, PageQuery};

pub struct LoadMore<S: PagedSource> {
    source: S,
    filters: ListFilters,
    limit: u32,
    items: Vec<S::Item>,
    /// Last page successfully loaded; zero before the first load.
    page: u32,
    has_more: bool,
    loading: bool,
    error: Option<String>,
}

impl<S: PagedSource> LoadMore<S> {
    pub fn new(source: S, limit: u32) -> Self {
        Self {
            source,
            filters: ListFilters::default(),
            limit: PageQuery::new(1, Some(limit), limit).limit,
            items: Vec::new(),
            page: 0,
            has_more: false,
            loading: false,
            error: None,
        }
    }

    pub fn with_filters(mut self, filters: ListFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Load page `n`: `n <= 1` resets the sequence, anything else appends.
    ///
    /// A failure records the message and resets the view to empty.
    pub async fn load_page(&mut self, n: u32) -> Result<(), ApiError> {
        let query = PageQuery::new(n, Some(self.limit), self.limit);
        self.loading = true;
        self.error = None;

        let result = self.source.fetch_page(query, &self.filters).await;
        self.loading = false;

        match result {
            Ok(page) => {
                let received = page.items.len();
                if query.page == 1 {
                    self.items = page.items;
                } else {
                    self.items.extend(page.items);
                }
                self.page = query.page;
                let loaded_enough =
                    self.items.len() as u64 >= u64::from(query.page) * u64::from(self.limit);
                self.has_more = page.has_more.unwrap_or(loaded_enough);
                tracing::debug!(
                    page = query.page,
                    received,
                    accumulated = self.items.len(),
                    has_more = self.has_more,
                    "page appended"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(page = query.page, error = %e, "load more failed");
                self.error = Some(e.to_string());
                self.items.clear();
                self.page = 0;
                self.has_more = false;
                Err(e)
            }
        }
    }

    /// Fetch the next page if the last load suggested there is one.
    /// Returns whether a request was made.
    pub async fn load_more(&mut self) -> Result<bool, ApiError> {
        if !self.has_more || self.loading {
            return Ok(false);
        }
        self.load_page(self.page + 1).await.map(|_| true)
    }

    /// Forget everything loaded so far. The next load starts at page 1.
    pub fn reset(&mut self) {
        self.items.clear();
        self.page = 0;
        self.has_more = false;
        self.error = None;
    }

    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use proptest::prelude::*;
    use taller_core::{Page, PaginationMeta};

    /// Serves canned pages; unknown pages fail.
    struct Scripted {
        pages: HashMap<u32, Vec<u32>>,
        has_more: HashMap<u32, bool>,
    }

    impl Scripted {
        fn new(pages: Vec<Vec<u32>>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .enumerate()
                    .map(|(i, items)| (i as u32 + 1, items))
                    .collect(),
                has_more: HashMap::new(),
            }
        }
    }

    #[async_trait]
    impl PagedSource for Scripted {
        type Item = u32;

        async fn fetch_page(&self, query: PageQuery, _: &ListFilters) -> Result<Page<u32>, ApiError> {
            let items = self
                .pages
                .get(&query.page)
                .cloned()
                .ok_or_else(|| ApiError::Network("página inexistente".to_string()))?;
            let meta = PaginationMeta {
                has_more: self.has_more.get(&query.page).copied(),
                ..PaginationMeta::default()
            };
            Ok(Page::from_parts(items, Some(meta), query))
        }
    }

    #[tokio::test]
    async fn five_then_three_accumulates_eight_in_order() {
        let mut store = LoadMore::new(Scripted::new(vec![(1..=5).collect(), (6..=8).collect()]), 5);

        store.load_page(1).await.unwrap();
        assert_eq!(store.items().len(), 5);
        assert!(store.has_more());

        assert!(store.load_more().await.unwrap());
        assert_eq!(store.items(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(!store.has_more());

        assert!(!store.load_more().await.unwrap());
        assert_eq!(store.page(), 2);
    }

    #[tokio::test]
    async fn page_one_resets_the_sequence() {
        let mut store = LoadMore::new(Scripted::new(vec![vec![1, 2], vec![3, 4]]), 2);
        store.load_page(1).await.unwrap();
        store.load_more().await.unwrap();
        assert_eq!(store.items().len(), 4);

        store.load_page(1).await.unwrap();
        assert_eq!(store.items(), &[1, 2]);
        assert_eq!(store.page(), 1);

        store.reset();
        assert!(store.items().is_empty());
        assert!(!store.has_more());
        assert!(!store.load_more().await.unwrap());
    }

    #[tokio::test]
    async fn server_flag_overrides_the_heuristic() {
        let mut source = Scripted::new(vec![vec![1, 2, 3], vec![4]]);
        // A short first page, but the server says there is more.
        source.has_more.insert(1, true);
        let mut store = LoadMore::new(source, 5);

        store.load_page(1).await.unwrap();
        assert!(store.has_more());
        assert!(store.load_more().await.unwrap());
        assert_eq!(store.items(), &[1, 2, 3, 4]);
        assert!(!store.has_more());
    }

    #[tokio::test]
    async fn failure_resets_to_empty() {
        let mut store = LoadMore::new(Scripted::new(vec![vec![1, 2]]), 2);
        store.load_page(1).await.unwrap();
        assert!(store.has_more());

        let err = store.load_more().await.unwrap_err();
        assert_eq!(err.to_string(), "página inexistente");
        assert!(store.items().is_empty());
        assert!(!store.has_more());
        assert_eq!(store.error(), Some("página inexistente"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after k successful loads the sequence is the concatenation
        /// of the pages, in order.
        #[test]
        fn accumulated_length_is_sum_of_pages(
            limit in 1u32..8,
            sizes in prop::collection::vec(0usize..8, 1..6)
        ) {
            let pages: Vec<Vec<u32>> = sizes
                .iter()
                .scan(0u32, |next, size| {
                    let page: Vec<u32> = (*next..*next + *size as u32).collect();
                    *next += *size as u32;
                    Some(page)
                })
                .collect();
            let expected: Vec<u32> = pages.iter().flatten().copied().collect();
            let page_count = pages.len() as u32;

            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let store = rt.block_on(async {
                let mut store = LoadMore::new(Scripted::new(pages), limit);
                for n in 1..=page_count {
                    store.load_page(n).await.unwrap();
                }
                store
            });

            prop_assert_eq!(store.items(), expected.as_slice());
        }
    }
}
