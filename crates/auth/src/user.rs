//! Authenticated user profile as returned by `auth/login` and `auth/me`.

use serde::{Deserialize, Serialize};

use taller_core::{SucursalId, UserId};

use crate::{PermissionGrant, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "rol")]
    pub role: Role,
    /// Unordered set of grants; duplicates are harmless.
    #[serde(default)]
    pub permisos: Vec<PermissionGrant>,
    #[serde(default)]
    pub sucursal_id: Option<SucursalId>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_profile() {
        let user: User = serde_json::from_str(
            r#"{
                "id": 3,
                "nombre": "Ana",
                "email": "ana@taller.com",
                "rol": "admin",
                "permisos": [{"codigo": "view_stock", "modulo": "stock"}],
                "sucursal_id": 1,
                "ultimo_acceso": "2024-05-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(user.id, UserId::new(3));
        assert!(user.is_admin());
        assert_eq!(user.permisos.len(), 1);
        assert_eq!(user.sucursal_id, Some(SucursalId::new(1)));
    }

    #[test]
    fn missing_optional_fields_default() {
        let user: User = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        assert!(!user.is_admin());
        assert!(user.permisos.is_empty());
        assert_eq!(user.sucursal_id, None);
    }
}
