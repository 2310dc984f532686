use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role name as assigned by the backend.
///
/// Roles are opaque strings at this layer; only the administrator role has
/// client-side meaning (it bypasses every permission check).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: &'static str = "admin";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn admin() -> Self {
        Self::new(Self::ADMIN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.as_str().trim().eq_ignore_ascii_case(Self::ADMIN)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::new("user")
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_role_is_case_insensitive() {
        assert!(Role::admin().is_admin());
        assert!(Role::new("ADMIN").is_admin());
        assert!(!Role::new("vendedor").is_admin());
        assert!(!Role::default().is_admin());
    }
}
