//! `taller-core`: shared building blocks for the taller client.
//!
//! This crate contains **pure** primitives (no HTTP, no storage): identifiers,
//! the domain error model, pagination and list filters.

pub mod error;
pub mod filters;
pub mod id;
pub mod open_enum;
pub mod pagination;

pub use error::{DomainError, DomainResult};
pub use filters::ListFilters;
pub use id::{
    ClienteId, CuentaId, MovimientoId, ProductoId, ServicioId, SucursalId, UserId, VehiculoId,
    VentaId,
};
pub use pagination::{Page, PageQuery, PaginationMeta};
