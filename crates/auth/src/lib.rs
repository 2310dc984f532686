//! `taller-auth`: permission resolution and session state for the client.
//!
//! No HTTP and no storage here: credential persistence is a trait the
//! application plugs a backend into.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod session;
pub mod user;

pub use authorize::{check_access, has_access, has_access_legacy, AccessDecision, AccessRule};
pub use permissions::{PermissionGrant, RequiredPermission};
pub use roles::Role;
pub use session::{
    CredentialStore, Credentials, MemoryCredentialStore, SessionContext, SessionError,
};
pub use user::User;
