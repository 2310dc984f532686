use serde::{Deserialize, Serialize};

/// A single permission granted to a user.
///
/// Each grant carries a fully-qualified code (e.g. `"view_stock"`) and the
/// coarser module it belongs to (e.g. `"stock"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionGrant {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub modulo: String,
}

impl PermissionGrant {
    pub fn new(codigo: impl Into<String>, modulo: impl Into<String>) -> Self {
        Self {
            codigo: codigo.into(),
            modulo: modulo.into(),
        }
    }
}

/// What a guarded view or action requires.
///
/// Matching is exact and case-sensitive in both variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum RequiredPermission {
    /// Any grant whose `modulo` equals the name.
    Module(String),
    /// A grant whose `codigo` equals the name.
    Specific(String),
}

impl RequiredPermission {
    pub fn module(name: impl Into<String>) -> Self {
        Self::Module(name.into())
    }

    pub fn specific(code: impl Into<String>) -> Self {
        Self::Specific(code.into())
    }

    /// Compatibility shim for untyped permission strings.
    ///
    /// An empty (or blank) string means "no restriction" and yields `None`.
    /// A string containing `_` is read as a specific permission code,
    /// anything else as a module name. A module whose name contains an
    /// underscore is therefore misread as a code; callers that know which one
    /// they mean should build the variant directly.
    pub fn from_legacy(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        if raw.contains('_') {
            Some(Self::Specific(raw.to_string()))
        } else {
            Some(Self::Module(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Module(name) | Self::Specific(name) => name,
        }
    }

    /// Whether a required name was actually given.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    pub fn is_satisfied_by(&self, grant: &PermissionGrant) -> bool {
        match self {
            Self::Module(name) => grant.modulo == *name,
            Self::Specific(code) => grant.codigo == *code,
        }
    }
}

impl core::fmt::Display for RequiredPermission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Module(name) => write!(f, "module '{name}'"),
            Self::Specific(code) => write!(f, "permission '{code}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_strings_are_classified_by_underscore() {
        assert_eq!(
            RequiredPermission::from_legacy("view_stock"),
            Some(RequiredPermission::specific("view_stock"))
        );
        assert_eq!(
            RequiredPermission::from_legacy("stock"),
            Some(RequiredPermission::module("stock"))
        );
        assert_eq!(RequiredPermission::from_legacy(""), None);
        assert_eq!(RequiredPermission::from_legacy("  "), None);
    }

    #[test]
    fn module_names_with_underscores_are_read_as_codes() {
        // Known ambiguity of the string form: "cuentas_corrientes" is a module
        // in the backend but the shim treats it as a specific code.
        assert_eq!(
            RequiredPermission::from_legacy("cuentas_corrientes"),
            Some(RequiredPermission::specific("cuentas_corrientes"))
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let grant = PermissionGrant::new("view_stock", "stock");
        assert!(RequiredPermission::specific("view_stock").is_satisfied_by(&grant));
        assert!(!RequiredPermission::specific("VIEW_STOCK").is_satisfied_by(&grant));
        assert!(RequiredPermission::module("stock").is_satisfied_by(&grant));
        assert!(!RequiredPermission::module("Stock").is_satisfied_by(&grant));
    }

    #[test]
    fn grants_tolerate_missing_fields() {
        let grant: PermissionGrant = serde_json::from_str(r#"{"codigo":"view_stock"}"#).unwrap();
        assert_eq!(grant.modulo, "");
    }
}
