//! Stock movements.
//!
//! The stock ledger itself is kept by the server; this crate only models the
//! movements it reports and the payload used to record a new one.

pub mod movimiento;

pub use movimiento::{MovimientoStock, NuevoMovimientoStock, TipoMovimientoStock};
