//! Resource list filters.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::SucursalId;

/// Filters accepted by the list endpoints, serialized as query parameters
/// next to `page`/`limit`.
///
/// Each resource honours the subset it understands; the server ignores the
/// rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilters {
    pub search: Option<String>,
    pub sucursal_id: Option<SucursalId>,
    pub tipo_pago: Option<String>,
    pub estado: Option<String>,
    pub fecha_desde: Option<NaiveDate>,
    pub fecha_hasta: Option<NaiveDate>,
    /// Resource-specific parameters (e.g. `cliente_id`, `tipo`).
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl ListFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_sucursal(mut self, sucursal_id: SucursalId) -> Self {
        self.sucursal_id = Some(sucursal_id);
        self
    }

    pub fn with_tipo_pago(mut self, tipo_pago: impl Into<String>) -> Self {
        self.tipo_pago = Some(tipo_pago.into());
        self
    }

    pub fn with_estado(mut self, estado: impl Into<String>) -> Self {
        self.estado = Some(estado.into());
        self
    }

    pub fn with_range(mut self, desde: Option<NaiveDate>, hasta: Option<NaiveDate>) -> Self {
        self.fecha_desde = desde;
        self.fecha_hasta = hasta;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.extra.insert(key.into(), value.to_string());
        self
    }

    /// Reject filter combinations the server would answer with an empty page.
    pub fn validate(&self) -> DomainResult<()> {
        if let (Some(desde), Some(hasta)) = (self.fecha_desde, self.fecha_hasta) {
            if desde > hasta {
                return Err(DomainError::validation(
                    "La fecha desde no puede ser posterior a la fecha hasta",
                ));
            }
        }
        Ok(())
    }

    /// Query pairs for the non-empty filters. Blank strings are dropped and
    /// the search term is trimmed.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        let mut push_text = |key: &str, value: &Option<String>| {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                pairs.push((key.to_string(), v.to_string()));
            }
        };
        push_text("search", &self.search);
        push_text("tipo_pago", &self.tipo_pago);
        push_text("estado", &self.estado);

        if let Some(id) = self.sucursal_id {
            pairs.push(("sucursal_id".to_string(), id.to_string()));
        }
        if let Some(desde) = self.fecha_desde {
            pairs.push(("fecha_desde".to_string(), desde.format("%Y-%m-%d").to_string()));
        }
        if let Some(hasta) = self.fecha_hasta {
            pairs.push(("fecha_hasta".to_string(), hasta.format("%Y-%m-%d").to_string()));
        }
        for (key, value) in &self.extra {
            if !value.trim().is_empty() {
                pairs.push((key.clone(), value.clone()));
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_filters_produce_no_pairs() {
        assert!(ListFilters::new().to_query().is_empty());
        assert!(ListFilters::new().with_search("   ").to_query().is_empty());
    }

    #[test]
    fn filters_serialize_in_stable_order() {
        let filters = ListFilters::new()
            .with_search("  perez ")
            .with_sucursal(SucursalId::new(2))
            .with_tipo_pago("efectivo")
            .with_range(Some(date(2024, 1, 1)), Some(date(2024, 1, 31)))
            .with_param("cliente_id", 9);

        assert_eq!(
            filters.to_query(),
            vec![
                ("search".to_string(), "perez".to_string()),
                ("tipo_pago".to_string(), "efectivo".to_string()),
                ("sucursal_id".to_string(), "2".to_string()),
                ("fecha_desde".to_string(), "2024-01-01".to_string()),
                ("fecha_hasta".to_string(), "2024-01-31".to_string()),
                ("cliente_id".to_string(), "9".to_string()),
            ]
        );
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let filters = ListFilters::new().with_range(Some(date(2024, 2, 1)), Some(date(2024, 1, 1)));
        assert!(matches!(filters.validate(), Err(DomainError::Validation(_))));

        let open_ended = ListFilters::new().with_range(Some(date(2024, 2, 1)), None);
        assert!(open_ended.validate().is_ok());
    }
}
