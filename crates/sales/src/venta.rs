use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taller_core::{open_enum, ClienteId, DomainError, DomainResult, SucursalId, VentaId};

use crate::linea::{validate_lineas, Linea, TipoPago};

open_enum! {
    /// State of a counter sale.
    pub enum EstadoVenta {
        Completada => "completada",
        Anulada => "anulada",
    }
}

/// A counter sale of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venta {
    pub id: VentaId,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub cliente_id: Option<ClienteId>,
    #[serde(default)]
    pub sucursal_id: Option<SucursalId>,
    pub fecha: DateTime<Utc>,
    pub tipo_pago: TipoPago,
    pub estado: EstadoVenta,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub items: Vec<Linea>,
}

/// Payload to register a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NuevaVenta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<ClienteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sucursal_id: Option<SucursalId>,
    pub tipo_pago: TipoPago,
    pub items: Vec<Linea>,
}

impl NuevaVenta {
    pub fn validate(&self) -> DomainResult<()> {
        validate_lineas(&self.items)?;
        if self.tipo_pago == TipoPago::CuentaCorriente && self.cliente_id.is_none() {
            return Err(DomainError::validation(
                "Las ventas en cuenta corriente requieren un cliente",
            ));
        }
        Ok(())
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(Linea::importe).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_sale_needs_a_client() {
        let mut venta = NuevaVenta {
            cliente_id: None,
            sucursal_id: None,
            tipo_pago: TipoPago::CuentaCorriente,
            items: vec![Linea::new("Lámpara H4", 2.0, 3500.0)],
        };
        assert!(venta.validate().is_err());

        venta.cliente_id = Some(ClienteId::new(8));
        assert!(venta.validate().is_ok());
        assert_eq!(venta.total(), 7000.0);
    }

    #[test]
    fn deserializes_sale() {
        let venta: Venta = serde_json::from_str(
            r#"{"id": 5, "fecha": "2024-06-01T09:00:00Z", "tipo_pago": "tarjeta", "estado": "anulada", "total": 100}"#,
        )
        .unwrap();
        assert_eq!(venta.tipo_pago, TipoPago::Tarjeta);
        assert_eq!(venta.estado, EstadoVenta::Anulada);
        assert!(venta.items.is_empty());
    }
}
