use async_trait::async_trait;

use taller_core::{ListFilters, Page, PageQuery};

use crate::error::ApiError;

/// A remote collection that can be read one page at a time.
///
/// List views are generic over this trait so they can be driven by a fake
/// in tests.
#[async_trait]
pub trait PagedSource: Send + Sync {
    type Item: Send;

    async fn fetch_page(
        &self,
        query: PageQuery,
        filters: &ListFilters,
    ) -> Result<Page<Self::Item>, ApiError>;
}
