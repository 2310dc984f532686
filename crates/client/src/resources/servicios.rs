use async_trait::async_trait;
use serde_json::json;

use taller_core::{ListFilters, Page, PageQuery, ServicioId};
use taller_sales::{NuevoServicio, Servicio};

use super::common::fetch_page;
use crate::envelope::Blob;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::request::ApiRequest;
use crate::source::PagedSource;

const PATH: &str = "servicios";

#[derive(Debug, Clone)]
pub struct ServiciosApi {
    client: ApiClient,
}

impl ServiciosApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: PageQuery, filters: &ListFilters) -> Result<Page<Servicio>, ApiError> {
        fetch_page(&self.client, PATH, query, filters).await
    }

    pub async fn get(&self, id: ServicioId) -> Result<Servicio, ApiError> {
        self.client.send(ApiRequest::get(format!("{PATH}/{id}"))).await
    }

    pub async fn create(&self, nuevo: &NuevoServicio) -> Result<Servicio, ApiError> {
        nuevo.validate()?;
        self.client.send(ApiRequest::post(PATH).json(nuevo)?).await
    }

    /// Cancel a service order. Stock and account effects are reverted by the
    /// server.
    pub async fn anular(&self, id: ServicioId, motivo: Option<&str>) -> Result<Servicio, ApiError> {
        let request = ApiRequest::patch(format!("{PATH}/{id}/anular"));
        let request = match motivo {
            Some(motivo) => request.json(&json!({ "motivo": motivo }))?,
            None => request,
        };
        self.client.send(request).await
    }

    /// The printable PDF, passed through untouched.
    pub async fn pdf(&self, id: ServicioId) -> Result<Blob, ApiError> {
        self.client
            .send_blob(ApiRequest::get(format!("{PATH}/{id}/pdf")))
            .await
    }
}

#[async_trait]
impl PagedSource for ServiciosApi {
    type Item = Servicio;

    async fn fetch_page(&self, query: PageQuery, filters: &ListFilters) -> Result<Page<Servicio>, ApiError> {
        self.list(query, filters).await
    }
}
