//! Session state shared by the HTTP client and the views.
//!
//! A session starts with [`SessionContext::login`] (or
//! [`SessionContext::restore`] from a persisted store) and ends with
//! [`SessionContext::logout`], which is also what the HTTP client calls when
//! the server answers 401.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{check_access, AccessDecision, RequiredPermission, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("credential storage failed: {0}")]
    Storage(String),

    #[error("stored credentials are unreadable: {0}")]
    Corrupt(String),
}

/// Bearer token plus the profile it belongs to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub user: User,
}

impl Credentials {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Where credentials survive between runs.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credentials>, SessionError>;
    fn save(&self, credentials: &Credentials) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credentials: Credentials) -> Self {
        Self {
            slot: RwLock::new(Some(credentials)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, SessionError> {
        Ok(self.slot.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), SessionError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Shared, cloneable handle on the current session.
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Credentials>>>,
    store: Arc<dyn CredentialStore>,
}

impl core::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionContext")
            .field("current", &*self.read())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            store,
        }
    }

    /// A session backed by a [`MemoryCredentialStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Credentials>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Credentials>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load persisted credentials into memory. Returns whether a session was found.
    pub fn restore(&self) -> Result<bool, SessionError> {
        let loaded = self.store.load()?;
        let found = loaded.is_some();
        *self.write() = loaded;
        if found {
            tracing::debug!("session restored from credential store");
        }
        Ok(found)
    }

    /// Start a session, replacing whatever was there.
    pub fn login(&self, credentials: Credentials) -> Result<(), SessionError> {
        tracing::info!(user_id = %credentials.user.id, "session started");
        self.store.save(&credentials)?;
        *self.write() = Some(credentials);
        Ok(())
    }

    /// Swap in a freshly fetched profile, keeping the token.
    ///
    /// Returns `false` (and stores nothing) when no session is active.
    pub fn replace_user(&self, user: User) -> Result<bool, SessionError> {
        let updated = {
            let mut guard = self.write();
            match guard.as_mut() {
                Some(credentials) => {
                    credentials.user = user;
                    Some(credentials.clone())
                }
                None => None,
            }
        };

        match updated {
            Some(credentials) => {
                self.store.save(&credentials)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// End the session. In-memory state is always cleared, even when the
    /// store fails to forget its copy.
    pub fn logout(&self) -> Result<(), SessionError> {
        let had_session = self.write().take().is_some();
        if had_session {
            tracing::info!("session cleared");
        }
        self.store.clear()
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|c| c.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.read().as_ref().is_some_and(|c| c.user.is_admin())
    }

    /// Resolve a requirement against the current user.
    pub fn check(&self, required: Option<&RequiredPermission>) -> AccessDecision {
        let guard = self.read();
        let (grants, is_admin) = match guard.as_ref() {
            Some(c) => (c.user.permisos.as_slice(), c.user.is_admin()),
            None => (&[][..], false),
        };
        check_access(required, grants, is_admin)
    }

    pub fn has_access(&self, required: Option<&RequiredPermission>) -> bool {
        self.check(required).granted
    }
}
