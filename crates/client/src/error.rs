use thiserror::Error;

use taller_auth::SessionError;
use taller_core::DomainError;

use crate::decode::FieldError;

/// Broad category of an HTTP failure, derived from the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 400 or 422.
    Validation,
    /// 401.
    Unauthorized,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// 409.
    Conflict,
    /// 429.
    RateLimited,
    /// Any other 4xx.
    Client,
    /// 502, 503 or 504.
    Unavailable,
    /// Any other 5xx.
    Server,
    /// A 2xx response whose envelope said `success: false`.
    Rejected,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            429 => Self::RateLimited,
            502..=504 => Self::Unavailable,
            500..=599 => Self::Server,
            200..=299 => Self::Rejected,
            _ => Self::Client,
        }
    }
}

/// Every failure an [`crate::ApiClient`] call can produce.
///
/// `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Http {
        status: u16,
        kind: ErrorKind,
        message: String,
        field_errors: Vec<FieldError>,
    },

    #[error("{0}")]
    Timeout(String),

    #[error("{0}")]
    Network(String),

    #[error("respuesta inválida del servidor: {0}")]
    Decode(String),

    #[error("no se pudo preparar la solicitud: {0}")]
    Encode(String),

    #[error("configuración inválida: {0}")]
    Config(String),

    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Http { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == Some(ErrorKind::Unauthorized)
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Http { field_errors, .. } => field_errors,
            _ => &[],
        }
    }
}
