//! Client running-balance accounts ("cuenta corriente").
//!
//! Balances are computed by the server; no arithmetic over movements happens
//! here beyond presentation helpers.

pub mod cuenta;

pub use cuenta::{CuentaCorriente, MovimientoCuenta, RegistrarPago, TipoMovimientoCuenta};
