use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taller_core::{ClienteId, DomainError, DomainResult, SucursalId};

/// A client of the business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cliente {
    pub id: ClienteId,
    pub nombre: String,
    #[serde(default)]
    pub apellido: Option<String>,
    /// DNI/CUIT or equivalent tax document.
    #[serde(default)]
    pub documento: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub sucursal_id: Option<SucursalId>,
    #[serde(default = "default_activo")]
    pub activo: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_activo() -> bool {
    true
}

impl Cliente {
    /// "Nombre Apellido", or just the name.
    pub fn nombre_completo(&self) -> String {
        match self.apellido.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            Some(apellido) => format!("{} {}", self.nombre.trim(), apellido),
            None => self.nombre.trim().to_string(),
        }
    }
}

/// Create/update payload for a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClienteInput {
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apellido: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documento: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sucursal_id: Option<SucursalId>,
}

impl ClienteInput {
    pub fn new(nombre: impl Into<String>) -> Self {
        Self {
            nombre: nombre.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.nombre.trim().is_empty() {
            return Err(DomainError::validation("El nombre del cliente es obligatorio"));
        }
        if let Some(email) = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !email.contains('@') {
                return Err(DomainError::validation("El email no es válido"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_missing_optionals() {
        let cliente: Cliente =
            serde_json::from_str(r#"{"id": 4, "nombre": "Marta", "apellido": "Gómez"}"#).unwrap();
        assert!(cliente.activo);
        assert_eq!(cliente.nombre_completo(), "Marta Gómez");
        assert_eq!(cliente.email, None);
    }

    #[test]
    fn input_requires_name_and_plausible_email() {
        assert!(ClienteInput::new("  ").validate().is_err());

        let mut input = ClienteInput::new("Pedro");
        input.email = Some("pedro.at.mail".to_string());
        assert_eq!(
            input.validate(),
            Err(DomainError::Validation("El email no es válido".to_string()))
        );

        input.email = Some("pedro@mail.com".to_string());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn input_omits_absent_fields_on_the_wire() {
        let json = serde_json::to_value(ClienteInput::new("Ana")).unwrap();
        assert_eq!(json, serde_json::json!({"nombre": "Ana"}));
    }
}
