use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taller_core::{open_enum, ClienteId, DomainResult, ServicioId, SucursalId, VehiculoId};

use crate::linea::{validate_lineas, Linea, TipoPago};

open_enum! {
    /// Lifecycle state of a service order.
    pub enum EstadoServicio {
        Pendiente => "pendiente",
        EnProceso => "en_proceso",
        Completado => "completado",
        Anulado => "anulado",
    }
}

/// A billed service order performed on a client's vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Servicio {
    pub id: ServicioId,
    #[serde(default)]
    pub numero: Option<String>,
    pub cliente_id: ClienteId,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    #[serde(default)]
    pub vehiculo_id: Option<VehiculoId>,
    #[serde(default)]
    pub sucursal_id: Option<SucursalId>,
    pub fecha: DateTime<Utc>,
    pub estado: EstadoServicio,
    #[serde(default)]
    pub tipo_pago: Option<TipoPago>,
    #[serde(default)]
    pub items: Vec<Linea>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub observaciones: Option<String>,
}

impl Servicio {
    pub fn is_anulado(&self) -> bool {
        self.estado == EstadoServicio::Anulado
    }
}

/// Payload to open a service order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevoServicio {
    pub cliente_id: ClienteId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehiculo_id: Option<VehiculoId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sucursal_id: Option<SucursalId>,
    pub tipo_pago: TipoPago,
    pub items: Vec<Linea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl NuevoServicio {
    pub fn validate(&self) -> DomainResult<()> {
        validate_lineas(&self.items)
    }

    /// Preview total shown while filling the form. The server recomputes it.
    pub fn total(&self) -> f64 {
        self.items.iter().map(Linea::importe).sum()
    }
}
