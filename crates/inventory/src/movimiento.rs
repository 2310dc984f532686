use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taller_core::{open_enum, DomainError, DomainResult, MovimientoId, ProductoId, SucursalId, UserId};

open_enum! {
    /// Direction of a stock movement.
    pub enum TipoMovimientoStock {
        Entrada => "entrada",
        Salida => "salida",
        Ajuste => "ajuste",
    }
}

/// One entry of the stock ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovimientoStock {
    pub id: MovimientoId,
    pub producto_id: ProductoId,
    #[serde(default)]
    pub producto_nombre: Option<String>,
    #[serde(default)]
    pub sucursal_id: Option<SucursalId>,
    pub tipo: TipoMovimientoStock,
    pub cantidad: i64,
    /// Stock level after the movement, as computed by the server.
    #[serde(default)]
    pub stock_resultante: Option<i64>,
    #[serde(default)]
    pub motivo: Option<String>,
    pub fecha: DateTime<Utc>,
    #[serde(default)]
    pub usuario_id: Option<UserId>,
}

/// Payload to record a manual stock movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoMovimientoStock {
    pub producto_id: ProductoId,
    pub tipo: TipoMovimientoStock,
    pub cantidad: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sucursal_id: Option<SucursalId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivo: Option<String>,
}

impl NuevoMovimientoStock {
    /// Entries and exits carry a positive quantity; adjustments carry a signed
    /// non-zero delta.
    pub fn validate(&self) -> DomainResult<()> {
        match self.tipo {
            TipoMovimientoStock::Entrada | TipoMovimientoStock::Salida if self.cantidad <= 0 => {
                Err(DomainError::validation("La cantidad debe ser mayor a cero"))
            }
            TipoMovimientoStock::Ajuste if self.cantidad == 0 => {
                Err(DomainError::validation("El ajuste no puede ser cero"))
            }
            TipoMovimientoStock::Otro(ref raw) => Err(DomainError::validation(format!(
                "Tipo de movimiento desconocido: {raw}"
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nuevo(tipo: TipoMovimientoStock, cantidad: i64) -> NuevoMovimientoStock {
        NuevoMovimientoStock {
            producto_id: ProductoId::new(10),
            tipo,
            cantidad,
            sucursal_id: None,
            motivo: None,
        }
    }

    #[test]
    fn quantity_rules_depend_on_type() {
        assert!(nuevo(TipoMovimientoStock::Entrada, 5).validate().is_ok());
        assert!(nuevo(TipoMovimientoStock::Salida, 0).validate().is_err());
        assert!(nuevo(TipoMovimientoStock::Entrada, -1).validate().is_err());
        assert!(nuevo(TipoMovimientoStock::Ajuste, -3).validate().is_ok());
        assert!(nuevo(TipoMovimientoStock::Ajuste, 0).validate().is_err());
        assert!(nuevo(TipoMovimientoStock::Otro("merma".into()), 1).validate().is_err());
    }

    #[test]
    fn deserializes_server_movement() {
        let mov: MovimientoStock = serde_json::from_str(
            r#"{
                "id": 77,
                "producto_id": 10,
                "producto_nombre": "Filtro de aceite",
                "tipo": "salida",
                "cantidad": 2,
                "stock_resultante": 18,
                "fecha": "2024-03-10T14:30:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(mov.tipo, TipoMovimientoStock::Salida);
        assert_eq!(mov.stock_resultante, Some(18));
    }
}
