use async_trait::async_trait;

use taller_core::{ListFilters, Page, PageQuery, VehiculoId};
use taller_parties::{Vehiculo, VehiculoInput};

use super::common::fetch_page;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::request::ApiRequest;
use crate::source::PagedSource;

const PATH: &str = "vehiculos";

#[derive(Debug, Clone)]
pub struct VehiculosApi {
    client: ApiClient,
}

impl VehiculosApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Filter by owner with `ListFilters::with_param("cliente_id", id)`.
    pub async fn list(&self, query: PageQuery, filters: &ListFilters) -> Result<Page<Vehiculo>, ApiError> {
        fetch_page(&self.client, PATH, query, filters).await
    }

    pub async fn get(&self, id: VehiculoId) -> Result<Vehiculo, ApiError> {
        self.client.send(ApiRequest::get(format!("{PATH}/{id}"))).await
    }

    pub async fn create(&self, input: VehiculoInput) -> Result<Vehiculo, ApiError> {
        let input = input.prepare()?;
        self.client.send(ApiRequest::post(PATH).json(&input)?).await
    }

    pub async fn update(&self, id: VehiculoId, input: VehiculoInput) -> Result<Vehiculo, ApiError> {
        let input = input.prepare()?;
        self.client
            .send(ApiRequest::put(format!("{PATH}/{id}")).json(&input)?)
            .await
    }

    pub async fn delete(&self, id: VehiculoId) -> Result<(), ApiError> {
        self.client.send_unit(ApiRequest::delete(format!("{PATH}/{id}"))).await
    }
}

#[async_trait]
impl PagedSource for VehiculosApi {
    type Item = Vehiculo;

    async fn fetch_page(&self, query: PageQuery, filters: &ListFilters) -> Result<Page<Vehiculo>, ApiError> {
        self.list(query, filters).await
    }
}
