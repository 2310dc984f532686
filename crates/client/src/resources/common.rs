use serde::de::DeserializeOwned;

use taller_core::{ListFilters, Page, PageQuery};

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::request::ApiRequest;

/// GET a paged collection. Filters are checked before the request is sent
/// so an inverted date range never reaches the server.
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
    query: PageQuery,
    filters: &ListFilters,
) -> Result<Page<T>, ApiError> {
    filters.validate()?;
    let request = ApiRequest::get(path).query(filters.to_query());
    client.send_page(request, query).await
}
