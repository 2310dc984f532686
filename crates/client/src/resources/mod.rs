//! Typed wrappers over the REST collections.
//!
//! Each API is a thin handle on a shared [`crate::ApiClient`]; payloads are
//! validated locally before anything goes on the wire.

mod common;

pub mod auth;
pub mod clientes;
pub mod cuentas_corrientes;
pub mod movimientos_stock;
pub mod servicios;
pub mod vehiculos;
pub mod ventas;

pub use auth::{AuthApi, LoginRequest};
pub use clientes::ClientesApi;
pub use cuentas_corrientes::{CuentasCorrientesApi, MovimientosCuentaSource};
pub use movimientos_stock::MovimientosStockApi;
pub use servicios::ServiciosApi;
pub use vehiculos::VehiculosApi;
pub use ventas::VentasApi;
