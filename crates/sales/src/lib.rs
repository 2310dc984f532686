//! Service orders and sales.
//!
//! Totals, cancellation rules and stock effects are decided by the server;
//! the client models what it receives and validates what it submits.

pub mod linea;
pub mod servicio;
pub mod venta;

pub use linea::{validate_lineas, Linea, TipoPago};
pub use servicio::{EstadoServicio, NuevoServicio, Servicio};
pub use venta::{EstadoVenta, NuevaVenta, Venta};
