use serde::{Deserialize, Serialize};

use taller_core::{ClienteId, DomainError, DomainResult, VehiculoId};

/// A vehicle owned by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehiculo {
    pub id: VehiculoId,
    pub cliente_id: ClienteId,
    /// License plate.
    pub patente: String,
    #[serde(default)]
    pub marca: String,
    #[serde(default)]
    pub modelo: String,
    #[serde(default, alias = "año")]
    pub anio: Option<i32>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub kilometraje: Option<u64>,
}

impl Vehiculo {
    pub fn descripcion(&self) -> String {
        let mut parts = vec![self.marca.trim(), self.modelo.trim()];
        parts.retain(|p| !p.is_empty());
        let mut label = parts.join(" ");
        if let Some(anio) = self.anio {
            label.push_str(&format!(" ({anio})"));
        }
        format!("{} - {}", self.patente, label.trim())
    }
}

/// Create/update payload for a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiculoInput {
    pub cliente_id: ClienteId,
    pub patente: String,
    pub marca: String,
    pub modelo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anio: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilometraje: Option<u64>,
}

impl VehiculoInput {
    /// Plates are stored upper-case without spaces or dashes.
    pub fn normalize_patente(raw: &str) -> String {
        raw.chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Validate and normalize in place.
    pub fn prepare(mut self) -> DomainResult<Self> {
        self.patente = Self::normalize_patente(&self.patente);
        if self.patente.is_empty() {
            return Err(DomainError::validation("La patente es obligatoria"));
        }
        Ok(self)
    }
}
