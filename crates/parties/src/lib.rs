//! Clients and their vehicles.
//!
//! Read models as served by the `clientes` and `vehiculos` collections, plus
//! the validated form inputs used to create or update them.

pub mod cliente;
pub mod vehiculo;

pub use cliente::{Cliente, ClienteInput};
pub use vehiculo::{Vehiculo, VehiculoInput};
