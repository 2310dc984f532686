use serde::{Deserialize, Serialize};

use taller_core::{open_enum, DomainError, DomainResult, ProductoId};

open_enum! {
    /// How a service or sale was paid.
    pub enum TipoPago {
        Efectivo => "efectivo",
        Tarjeta => "tarjeta",
        Transferencia => "transferencia",
        CuentaCorriente => "cuenta_corriente",
    }
}

/// A billed line: labour, part or product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Linea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producto_id: Option<ProductoId>,
    pub descripcion: String,
    pub cantidad: f64,
    pub precio_unitario: f64,
    /// Server-computed subtotal; absent on outgoing payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
}

impl Linea {
    pub fn new(descripcion: impl Into<String>, cantidad: f64, precio_unitario: f64) -> Self {
        Self {
            producto_id: None,
            descripcion: descripcion.into(),
            cantidad,
            precio_unitario,
            subtotal: None,
        }
    }

    /// Subtotal as reported, or `cantidad * precio_unitario` for previews.
    pub fn importe(&self) -> f64 {
        self.subtotal.unwrap_or(self.cantidad * self.precio_unitario)
    }
}

/// Shared line rules for service and sale payloads.
pub fn validate_lineas(lineas: &[Linea]) -> DomainResult<()> {
    if lineas.is_empty() {
        return Err(DomainError::validation("Debe agregar al menos un ítem"));
    }
    for (idx, linea) in lineas.iter().enumerate() {
        let n = idx + 1;
        if linea.descripcion.trim().is_empty() {
            return Err(DomainError::validation(format!("Ítem {n}: la descripción es obligatoria")));
        }
        if !(linea.cantidad > 0.0) {
            return Err(DomainError::validation(format!("Ítem {n}: la cantidad debe ser mayor a cero")));
        }
        if !(linea.precio_unitario >= 0.0) {
            return Err(DomainError::validation(format!("Ítem {n}: el precio no puede ser negativo")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importe_prefers_server_subtotal() {
        let mut linea = Linea::new("Cambio de aceite", 1.0, 15000.0);
        assert_eq!(linea.importe(), 15000.0);
        linea.subtotal = Some(14000.0);
        assert_eq!(linea.importe(), 14000.0);
    }

    #[test]
    fn line_rules() {
        assert!(validate_lineas(&[]).is_err());
        assert!(validate_lineas(&[Linea::new("Filtro", 0.0, 10.0)]).is_err());
        assert!(validate_lineas(&[Linea::new("Filtro", 1.0, -1.0)]).is_err());
        assert!(validate_lineas(&[Linea::new("Filtro", 1.0, f64::NAN)]).is_err());
        assert!(validate_lineas(&[Linea::new(" ", 1.0, 1.0)]).is_err());
        assert!(validate_lineas(&[Linea::new("Filtro", 2.0, 0.0)]).is_ok());
    }

    #[test]
    fn tipo_pago_wire_values() {
        assert_eq!(TipoPago::CuentaCorriente.as_str(), "cuenta_corriente");
        assert_eq!(TipoPago::from("tarjeta"), TipoPago::Tarjeta);
    }
}
