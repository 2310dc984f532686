use async_trait::async_trait;
use serde_json::json;

use taller_core::{ListFilters, Page, PageQuery, VentaId};
use taller_sales::{NuevaVenta, Venta};

use super::common::fetch_page;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::request::ApiRequest;
use crate::source::PagedSource;

const PATH: &str = "ventas";

#[derive(Debug, Clone)]
pub struct VentasApi {
    client: ApiClient,
}

impl VentasApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: PageQuery, filters: &ListFilters) -> Result<Page<Venta>, ApiError> {
        fetch_page(&self.client, PATH, query, filters).await
    }

    pub async fn get(&self, id: VentaId) -> Result<Venta, ApiError> {
        self.client.send(ApiRequest::get(format!("{PATH}/{id}"))).await
    }

    pub async fn create(&self, nueva: &NuevaVenta) -> Result<Venta, ApiError> {
        nueva.validate()?;
        self.client.send(ApiRequest::post(PATH).json(nueva)?).await
    }

    pub async fn anular(&self, id: VentaId, motivo: Option<&str>) -> Result<Venta, ApiError> {
        let request = ApiRequest::patch(format!("{PATH}/{id}/anular"));
        let request = match motivo {
            Some(motivo) => request.json(&json!({ "motivo": motivo }))?,
            None => request,
        };
        self.client.send(request).await
    }
}

#[async_trait]
impl PagedSource for VentasApi {
    type Item = Venta;

    async fn fetch_page(&self, query: PageQuery, filters: &ListFilters) -> Result<Page<Venta>, ApiError> {
        self.list(query, filters).await
    }
}
