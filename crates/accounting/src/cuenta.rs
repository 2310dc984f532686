use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taller_core::{open_enum, ClienteId, CuentaId, DomainError, DomainResult, MovimientoId};

open_enum! {
    /// Direction of an account movement.
    pub enum TipoMovimientoCuenta {
        /// Increases what the client owes.
        Cargo => "cargo",
        /// Decreases what the client owes.
        Pago => "pago",
    }
}

/// A client's running-balance account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuentaCorriente {
    pub id: CuentaId,
    pub cliente_id: ClienteId,
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    /// Positive when the client owes money.
    pub saldo: f64,
    #[serde(default)]
    pub limite_credito: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CuentaCorriente {
    pub fn tiene_deuda(&self) -> bool {
        self.saldo > 0.0
    }

    /// Credit left before reaching the limit, when one is set.
    pub fn credito_disponible(&self) -> Option<f64> {
        self.limite_credito.map(|limite| (limite - self.saldo).max(0.0))
    }
}

/// One entry in an account's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovimientoCuenta {
    pub id: MovimientoId,
    #[serde(default)]
    pub cuenta_id: Option<CuentaId>,
    pub tipo: TipoMovimientoCuenta,
    pub monto: f64,
    #[serde(default)]
    pub saldo_resultante: Option<f64>,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub fecha: DateTime<Utc>,
}

/// Payload to post a payment against an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrarPago {
    pub monto: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metodo_pago: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl RegistrarPago {
    pub fn new(monto: f64) -> Self {
        Self {
            monto,
            metodo_pago: None,
            observaciones: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if !(self.monto > 0.0) || !self.monto.is_finite() {
            return Err(DomainError::validation("El monto del pago debe ser mayor a cero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_amount_must_be_positive() {
        assert!(RegistrarPago::new(0.0).validate().is_err());
        assert!(RegistrarPago::new(-10.0).validate().is_err());
        assert!(RegistrarPago::new(f64::INFINITY).validate().is_err());
        assert!(RegistrarPago::new(2500.5).validate().is_ok());
    }

    #[test]
    fn available_credit_never_negative() {
        let cuenta: CuentaCorriente = serde_json::from_str(
            r#"{"id": 1, "cliente_id": 4, "saldo": 12000, "limite_credito": 10000}"#,
        )
        .unwrap();
        assert!(cuenta.tiene_deuda());
        assert_eq!(cuenta.credito_disponible(), Some(0.0));
    }

    #[test]
    fn deserializes_movement() {
        let mov: MovimientoCuenta = serde_json::from_str(
            r#"{"id": 3, "tipo": "pago", "monto": 500, "saldo_resultante": 1500, "fecha": "2024-04-02T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(mov.tipo, TipoMovimientoCuenta::Pago);
        assert_eq!(mov.saldo_resultante, Some(1500.0));
    }
}
