use async_trait::async_trait;

use taller_core::{ClienteId, ListFilters, Page, PageQuery};
use taller_parties::{Cliente, ClienteInput, Vehiculo};

use super::common::fetch_page;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::request::ApiRequest;
use crate::source::PagedSource;

const PATH: &str = "clientes";

#[derive(Debug, Clone)]
pub struct ClientesApi {
    client: ApiClient,
}

impl ClientesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: PageQuery, filters: &ListFilters) -> Result<Page<Cliente>, ApiError> {
        fetch_page(&self.client, PATH, query, filters).await
    }

    pub async fn get(&self, id: ClienteId) -> Result<Cliente, ApiError> {
        self.client.send(ApiRequest::get(format!("{PATH}/{id}"))).await
    }

    pub async fn create(&self, input: &ClienteInput) -> Result<Cliente, ApiError> {
        input.validate()?;
        self.client.send(ApiRequest::post(PATH).json(input)?).await
    }

    pub async fn update(&self, id: ClienteId, input: &ClienteInput) -> Result<Cliente, ApiError> {
        input.validate()?;
        self.client
            .send(ApiRequest::put(format!("{PATH}/{id}")).json(input)?)
            .await
    }

    pub async fn delete(&self, id: ClienteId) -> Result<(), ApiError> {
        self.client.send_unit(ApiRequest::delete(format!("{PATH}/{id}"))).await
    }

    pub async fn vehiculos(&self, id: ClienteId) -> Result<Vec<Vehiculo>, ApiError> {
        self.client
            .send(ApiRequest::get(format!("{PATH}/{id}/vehiculos")))
            .await
    }
}

#[async_trait]
impl PagedSource for ClientesApi {
    type Item = Cliente;

    async fn fetch_page(&self, query: PageQuery, filters: &ListFilters) -> Result<Page<Cliente>, ApiError> {
        self.list(query, filters).await
    }
}
