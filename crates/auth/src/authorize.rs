use serde::Serialize;

use crate::{PermissionGrant, RequiredPermission, User};

/// The rule that decided an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRule {
    /// Administrators bypass every check.
    AdminBypass,
    /// Nothing was required.
    Unrestricted,
    /// The user holds no grants at all.
    NoGrants,
    /// A grant's `codigo` matched the required code.
    SpecificGranted,
    /// No grant's `codigo` matched the required code.
    SpecificMissing,
    /// A grant's `modulo` matched the required module.
    ModuleGranted,
    /// No grant's `modulo` matched the required module.
    ModuleMissing,
}

/// Outcome of an access check, with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub granted: bool,
    pub rule: AccessRule,
    pub required: Option<RequiredPermission>,
}

impl AccessDecision {
    fn new(granted: bool, rule: AccessRule, required: Option<&RequiredPermission>) -> Self {
        Self {
            granted,
            rule,
            required: required.cloned(),
        }
    }
}

/// Resolve access against a set of grants.
///
/// Rules are evaluated in order and the first match wins:
/// 1. administrators are allowed;
/// 2. an absent or empty requirement is allowed;
/// 3. no grants means denied;
/// 4. a specific requirement needs a grant with that exact `codigo`;
/// 5. a module requirement needs a grant with that exact `modulo`.
///
/// - No IO
/// - No panics
pub fn check_access(
    required: Option<&RequiredPermission>,
    grants: &[PermissionGrant],
    is_admin: bool,
) -> AccessDecision {
    if is_admin {
        return AccessDecision::new(true, AccessRule::AdminBypass, required);
    }

    let required = match required.filter(|r| !r.is_empty()) {
        Some(required) => required,
        None => return AccessDecision::new(true, AccessRule::Unrestricted, None),
    };

    if grants.is_empty() {
        return AccessDecision::new(false, AccessRule::NoGrants, Some(required));
    }

    let matched = grants.iter().any(|grant| required.is_satisfied_by(grant));
    let rule = match (required, matched) {
        (RequiredPermission::Specific(_), true) => AccessRule::SpecificGranted,
        (RequiredPermission::Specific(_), false) => AccessRule::SpecificMissing,
        (RequiredPermission::Module(_), true) => AccessRule::ModuleGranted,
        (RequiredPermission::Module(_), false) => AccessRule::ModuleMissing,
    };

    AccessDecision::new(matched, rule, Some(required))
}

/// Boolean form of [`check_access`] for an optional user.
///
/// A missing user is treated as one without grants.
pub fn has_access(required: Option<&RequiredPermission>, user: Option<&User>, is_admin: bool) -> bool {
    let grants = user.map(|u| u.permisos.as_slice()).unwrap_or(&[]);
    check_access(required, grants, is_admin).granted
}

/// [`has_access`] for untyped permission strings, classified through
/// [`RequiredPermission::from_legacy`].
pub fn has_access_legacy(required: Option<&str>, user: Option<&User>, is_admin: bool) -> bool {
    let required = required.and_then(RequiredPermission::from_legacy);
    has_access(required.as_ref(), user, is_admin)
}
