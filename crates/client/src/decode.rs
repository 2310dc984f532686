//! Error-body decoding.
//!
//! The backend reports failures in several shapes. [`ErrorDetail::decode`]
//! walks a fixed list of extraction rules and keeps the first that yields a
//! non-empty message:
//!
//! 1. `error.validationErrors[0].message`
//! 2. `error.message`
//! 3. `error` as a bare string
//! 4. top-level `message`
//!
//! Transport failures never reach this module; the client maps them to the
//! timeout message or the transport's own text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ErrorKind};

pub const TIMEOUT_MESSAGE: &str = "El servidor tardó demasiado en responder. Intente nuevamente.";
pub const FALLBACK_MESSAGE: &str = "Ocurrió un error inesperado. Intente nuevamente.";

/// One entry of `error.validationErrors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default, alias = "path", alias = "param")]
    pub field: Option<String>,
    #[serde(default, alias = "msg")]
    pub message: String,
}

/// The message-bearing part of an error body, tagged by the rule that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },
    Structured(String),
    Text(String),
    Message(String),
}

type Rule = fn(&Value) -> Option<ErrorDetail>;

const RULES: [Rule; 4] = [validation_rule, structured_rule, text_rule, message_rule];

fn non_empty(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn validation_rule(body: &Value) -> Option<ErrorDetail> {
    let raw = body.get("error")?.get("validationErrors")?;
    let fields: Vec<FieldError> = serde_json::from_value(raw.clone()).ok()?;
    let message = fields
        .first()
        .map(|f| f.message.trim())
        .filter(|m| !m.is_empty())?
        .to_string();
    Some(ErrorDetail::Validation { message, fields })
}

fn structured_rule(body: &Value) -> Option<ErrorDetail> {
    non_empty(body.get("error")?.get("message")).map(ErrorDetail::Structured)
}

fn text_rule(body: &Value) -> Option<ErrorDetail> {
    non_empty(body.get("error")).map(ErrorDetail::Text)
}

fn message_rule(body: &Value) -> Option<ErrorDetail> {
    non_empty(body.get("message")).map(ErrorDetail::Message)
}

impl ErrorDetail {
    /// First rule that matches, in priority order.
    pub fn decode(body: &Value) -> Option<Self> {
        RULES.iter().find_map(|rule| rule(body))
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. } => message,
            Self::Structured(m) | Self::Text(m) | Self::Message(m) => m,
        }
    }

    pub fn into_parts(self) -> (String, Vec<FieldError>) {
        match self {
            Self::Validation { message, fields } => (message, fields),
            Self::Structured(m) | Self::Text(m) | Self::Message(m) => (m, Vec::new()),
        }
    }
}

/// Build the error for a failed response.
///
/// `body` is the raw response text; it need not be JSON.
pub fn http_error(status: u16, body: &str) -> ApiError {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| ErrorDetail::decode(&v));

    let (message, field_errors) = match detail {
        Some(detail) => detail.into_parts(),
        None if (200..300).contains(&status) => (FALLBACK_MESSAGE.to_string(), Vec::new()),
        None => (format!("La solicitud falló con código {status}"), Vec::new()),
    };

    ApiError::Http {
        status,
        kind: ErrorKind::from_status(status),
        message,
        field_errors,
    }
}

/// Map a transport error: timeouts get the fixed message, everything else
/// keeps the transport's text or the generic fallback.
pub fn transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout(TIMEOUT_MESSAGE.to_string());
    }
    let text = err.to_string();
    if text.trim().is_empty() {
        ApiError::Network(FALLBACK_MESSAGE.to_string())
    } else {
        ApiError::Network(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_errors_win_over_everything() {
        let body = json!({
            "success": false,
            "message": "top",
            "error": {
                "message": "structured",
                "validationErrors": [
                    {"field": "email", "message": "X"},
                    {"field": "nombre", "message": "Z"}
                ]
            }
        });
        let detail = ErrorDetail::decode(&body).unwrap();
        assert_eq!(detail.message(), "X");
        let (_, fields) = detail.into_parts();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field.as_deref(), Some("email"));
    }

    #[test]
    fn structured_message_beats_top_level() {
        let body = json!({"message": "top", "error": {"message": "structured"}});
        assert_eq!(
            ErrorDetail::decode(&body),
            Some(ErrorDetail::Structured("structured".to_string()))
        );
    }

    #[test]
    fn bare_string_error() {
        let body = json!({"success": false, "error": "Y"});
        assert_eq!(ErrorDetail::decode(&body), Some(ErrorDetail::Text("Y".to_string())));
    }

    #[test]
    fn top_level_message_is_last_resort() {
        let body = json!({"success": false, "message": "Cliente no encontrado"});
        assert_eq!(
            ErrorDetail::decode(&body),
            Some(ErrorDetail::Message("Cliente no encontrado".to_string()))
        );
    }

    #[test]
    fn empty_values_fall_through() {
        let body = json!({
            "error": {"validationErrors": [], "message": "  "},
            "message": "usable"
        });
        assert_eq!(ErrorDetail::decode(&body).unwrap().message(), "usable");
        assert_eq!(ErrorDetail::decode(&json!({"error": {}})), None);
    }

    #[test]
    fn http_error_uses_status_when_body_is_opaque() {
        let err = http_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "La solicitud falló con código 502");
        assert_eq!(err.kind(), Some(ErrorKind::Unavailable));

        let err = http_error(422, r#"{"error": {"validationErrors": [{"message": "X"}]}}"#);
        assert_eq!(err.to_string(), "X");
        assert_eq!(err.field_errors().len(), 1);
    }
}
