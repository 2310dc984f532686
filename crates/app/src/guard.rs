//! Permission-gated rendering.
//!
//! A guard pairs a requirement with the session it is checked against and
//! picks one of three outcomes: the protected content, a caller-supplied
//! fallback, or the default restricted placeholder.

use taller_auth::{AccessDecision, RequiredPermission, SessionContext, User, check_access};

pub const RESTRICTED_MESSAGE: &str = "Acceso restringido";

/// What a guarded region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardView<V> {
    Children(V),
    Fallback(V),
    Restricted,
}

impl<V> GuardView<V> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Children(_))
    }

    /// The content to show, with the placeholder turned into `V`.
    pub fn into_inner_or(self, restricted: impl FnOnce(&'static str) -> V) -> V {
        match self {
            Self::Children(v) | Self::Fallback(v) => v,
            Self::Restricted => restricted(RESTRICTED_MESSAGE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionGuard {
    required: Option<RequiredPermission>,
}

impl PermissionGuard {
    pub fn new(required: Option<RequiredPermission>) -> Self {
        Self { required }
    }

    pub fn module(name: impl Into<String>) -> Self {
        Self::new(Some(RequiredPermission::module(name)))
    }

    pub fn specific(code: impl Into<String>) -> Self {
        Self::new(Some(RequiredPermission::specific(code)))
    }

    /// Build from an untyped permission string. A name containing `_` is
    /// read as a specific code, so a module whose name contains one must use
    /// [`PermissionGuard::module`] instead.
    pub fn from_legacy(required: Option<&str>) -> Self {
        Self::new(required.and_then(RequiredPermission::from_legacy))
    }

    pub fn required(&self) -> Option<&RequiredPermission> {
        self.required.as_ref()
    }

    /// Decide against an explicit user and admin flag.
    pub fn evaluate(&self, user: Option<&User>, is_admin: bool) -> AccessDecision {
        let grants = user.map(|u| u.permisos.as_slice()).unwrap_or(&[]);
        check_access(self.required.as_ref(), grants, is_admin)
    }

    /// Decide against the current session.
    pub fn check(&self, session: &SessionContext) -> AccessDecision {
        let decision = session.check(self.required.as_ref());
        tracing::debug!(
            granted = decision.granted,
            rule = ?decision.rule,
            required = ?decision.required,
            "permission check"
        );
        decision
    }

    /// Render `children` when allowed, otherwise `fallback` or the
    /// restricted placeholder. `children` is not evaluated on denial.
    pub fn render<V>(
        &self,
        session: &SessionContext,
        children: impl FnOnce() -> V,
        fallback: Option<V>,
    ) -> GuardView<V> {
        if self.check(session).granted {
            return GuardView::Children(children());
        }
        match fallback {
            Some(v) => GuardView::Fallback(v),
            None => GuardView::Restricted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taller_auth::{AccessRule, Credentials, PermissionGrant, Role};
    use taller_core::UserId;

    fn session_with(role: &'static str, grants: Vec<PermissionGrant>) -> SessionContext {
        let session = SessionContext::in_memory();
        let user = User {
            id: UserId::new(2),
            nombre: "Carla".to_string(),
            email: "carla@taller.com".to_string(),
            role: Role::new(role),
            permisos: grants,
            sucursal_id: None,
        };
        session.login(Credentials::new("t", user)).unwrap();
        session
    }

    #[test]
    fn allowed_renders_children() {
        let session = session_with("vendedor", vec![PermissionGrant::new("view_stock", "stock")]);
        let view = PermissionGuard::from_legacy(Some("stock")).render(&session, || "tabla", None);
        assert_eq!(view, GuardView::Children("tabla"));
    }

    #[test]
    fn denied_prefers_fallback_then_placeholder() {
        let session = session_with("vendedor", vec![PermissionGrant::new("view_stock", "stock")]);
        let guard = PermissionGuard::from_legacy(Some("edit_stock"));

        let view = guard.render(&session, || "tabla", Some("solo lectura"));
        assert_eq!(view, GuardView::Fallback("solo lectura"));

        let view = guard.render(&session, || "tabla".to_string(), None);
        assert_eq!(view, GuardView::Restricted);
        assert_eq!(view.into_inner_or(str::to_string), RESTRICTED_MESSAGE);
    }

    #[test]
    fn children_are_not_built_when_denied() {
        let session = SessionContext::in_memory();
        let guard = PermissionGuard::module("ventas");
        let view = guard.render(&session, || -> &str { panic!("rendered") }, None);
        assert!(!view.is_allowed());
    }

    #[test]
    fn admin_and_unrestricted_pass() {
        let admin = session_with("ADMIN", vec![]);
        assert!(PermissionGuard::specific("anything_at_all").check(&admin).granted);

        let anonymous = SessionContext::in_memory();
        let decision = PermissionGuard::default().check(&anonymous);
        assert_eq!(decision.rule, AccessRule::Unrestricted);
    }

    #[test]
    fn evaluate_uses_the_given_user() {
        let user = User {
            id: UserId::new(1),
            nombre: String::new(),
            email: String::new(),
            role: Role::default(),
            permisos: vec![PermissionGrant::new("view_cuentas", "cuentas_corrientes")],
            sucursal_id: None,
        };
        let typed = PermissionGuard::module("cuentas_corrientes");
        assert!(typed.evaluate(Some(&user), false).granted);

        let legacy = PermissionGuard::from_legacy(Some("cuentas_corrientes"));
        assert_eq!(legacy.evaluate(Some(&user), false).rule, AccessRule::SpecificMissing);
    }
}
