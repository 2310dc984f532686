use async_trait::async_trait;

use taller_core::{ListFilters, Page, PageQuery};
use taller_inventory::{MovimientoStock, NuevoMovimientoStock};

use super::common::fetch_page;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::request::ApiRequest;
use crate::source::PagedSource;

const PATH: &str = "movimientos-stock";

#[derive(Debug, Clone)]
pub struct MovimientosStockApi {
    client: ApiClient,
}

impl MovimientosStockApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: PageQuery,
        filters: &ListFilters,
    ) -> Result<Page<MovimientoStock>, ApiError> {
        fetch_page(&self.client, PATH, query, filters).await
    }

    pub async fn create(&self, nuevo: &NuevoMovimientoStock) -> Result<MovimientoStock, ApiError> {
        nuevo.validate()?;
        self.client.send(ApiRequest::post(PATH).json(nuevo)?).await
    }
}

#[async_trait]
impl PagedSource for MovimientosStockApi {
    type Item = MovimientoStock;

    async fn fetch_page(
        &self,
        query: PageQuery,
        filters: &ListFilters,
    ) -> Result<Page<MovimientoStock>, ApiError> {
        self.list(query, filters).await
    }
}
