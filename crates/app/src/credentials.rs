//! Credentials persisted as a JSON file so a CLI session survives between
//! invocations.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use taller_auth::{CredentialStore, Credentials, SessionError};

pub const PATH_ENV: &str = "TALLER_CREDENTIALS_PATH";

#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `TALLER_CREDENTIALS_PATH`, or `{app_data_dir}/taller/session.json`.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var(PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Ok(Self::new(path)),
            _ => default_path().map(Self::new),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn default_path() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;
    dir.push("taller");
    dir.push("session.json");
    Ok(dir)
}

/// The file holds a bearer token: owner-only on unix.
fn open_private(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;
    // `mode` only applies on creation; tighten files left by older versions.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Storage(format!("{}: {e}", self.path.display()))),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| SessionError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            create_private_dir(dir)
                .map_err(|e| SessionError::Storage(format!("{}: {e}", dir.display())))?;
        }
        let json = serde_json::to_string_pretty(credentials)
            .map_err(|e| SessionError::Storage(e.to_string()))?;
        open_private(&self.path)
            .and_then(|mut file| file.write_all(json.as_bytes()))
            .map_err(|e| SessionError::Storage(format!("{}: {e}", self.path.display())))
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(format!("{}: {e}", self.path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};
    use taller_auth::User;

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        std::env::temp_dir()
            .join(format!("taller-test-{}-{nanos}", std::process::id()))
            .join(name)
    }

    fn creds() -> Credentials {
        let user: User = serde_json::from_str(r#"{"id": 8, "nombre": "Rosa", "rol": "admin"}"#).unwrap();
        Credentials::new("tok-file", user)
    }

    #[test]
    fn missing_file_means_no_session() {
        let store = FileCredentialStore::new(scratch_path("absent.json"));
        assert_eq!(store.load().unwrap(), None);
        assert!(store.clear().is_ok());
    }

    #[test]
    fn save_load_clear_cycle() {
        let path = scratch_path("session.json");
        let store = FileCredentialStore::new(&path);

        store.save(&creds()).unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap(), Some(creds()));

        store.clear().unwrap();
        assert!(!path.exists());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        let path = scratch_path("session.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(matches!(store.load(), Err(SessionError::Corrupt(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_private_to_the_owner() {
        use std::os::unix::fs::PermissionsExt;

        let path = scratch_path("session.json");
        let store = FileCredentialStore::new(&path);
        store.save(&creds()).unwrap();

        let mode = |p: &Path| std::fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), 0o600);
        assert_eq!(mode(path.parent().unwrap()) & 0o077, 0);

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        store.save(&creds()).unwrap();
        assert_eq!(mode(&path), 0o600);
        assert_eq!(store.load().unwrap(), Some(creds()));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
