use async_trait::async_trait;

use taller_accounting::{CuentaCorriente, MovimientoCuenta, RegistrarPago};
use taller_core::{ClienteId, ListFilters, Page, PageQuery};

use super::common::fetch_page;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::request::ApiRequest;
use crate::source::PagedSource;

const PATH: &str = "cuentas-corrientes";

#[derive(Debug, Clone)]
pub struct CuentasCorrientesApi {
    client: ApiClient,
}

impl CuentasCorrientesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: PageQuery,
        filters: &ListFilters,
    ) -> Result<Page<CuentaCorriente>, ApiError> {
        fetch_page(&self.client, PATH, query, filters).await
    }

    pub async fn por_cliente(&self, cliente_id: ClienteId) -> Result<CuentaCorriente, ApiError> {
        self.client
            .send(ApiRequest::get(format!("{PATH}/cliente/{cliente_id}")))
            .await
    }

    pub async fn movimientos(
        &self,
        cliente_id: ClienteId,
        query: PageQuery,
        filters: &ListFilters,
    ) -> Result<Page<MovimientoCuenta>, ApiError> {
        let path = format!("{PATH}/cliente/{cliente_id}/movimientos");
        fetch_page(&self.client, &path, query, filters).await
    }

    /// Post a payment; the server answers with the updated account.
    pub async fn registrar_pago(
        &self,
        cliente_id: ClienteId,
        pago: &RegistrarPago,
    ) -> Result<CuentaCorriente, ApiError> {
        pago.validate()?;
        self.client
            .send(ApiRequest::post(format!("{PATH}/cliente/{cliente_id}/pagos")).json(pago)?)
            .await
    }

    /// A paged source over one client's account history.
    pub fn historial(&self, cliente_id: ClienteId) -> MovimientosCuentaSource {
        MovimientosCuentaSource {
            api: self.clone(),
            cliente_id,
        }
    }
}

#[async_trait]
impl PagedSource for CuentasCorrientesApi {
    type Item = CuentaCorriente;

    async fn fetch_page(
        &self,
        query: PageQuery,
        filters: &ListFilters,
    ) -> Result<Page<CuentaCorriente>, ApiError> {
        self.list(query, filters).await
    }
}

/// History of a single account, consumed incrementally by the detail view.
#[derive(Debug, Clone)]
pub struct MovimientosCuentaSource {
    api: CuentasCorrientesApi,
    cliente_id: ClienteId,
}

impl MovimientosCuentaSource {
    pub fn cliente_id(&self) -> ClienteId {
        self.cliente_id
    }
}

#[async_trait]
impl PagedSource for MovimientosCuentaSource {
    type Item = MovimientoCuenta;

    async fn fetch_page(
        &self,
        query: PageQuery,
        filters: &ListFilters,
    ) -> Result<Page<MovimientoCuenta>, ApiError> {
        self.api.movimientos(self.cliente_id, query, filters).await
    }
}
