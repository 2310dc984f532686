use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

pub const LOGIN_PATH: &str = "auth/login";

/// A request before it is bound to a base URL and a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Whether this is the login call, which must never trigger the
    /// session-expired redirect.
    pub fn is_login(&self) -> bool {
        self.path.trim_matches('/') == LOGIN_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_detection_ignores_slashes() {
        assert!(ApiRequest::post("/auth/login").is_login());
        assert!(ApiRequest::post("auth/login/").is_login());
        assert!(!ApiRequest::get("auth/me").is_login());
    }

    #[test]
    fn query_and_body_are_collected() {
        let req = ApiRequest::get("ventas")
            .query([("page", "2")])
            .query(vec![("limit".to_string(), "10".to_string())])
            .json(&serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(req.query.len(), 2);
        assert_eq!(req.body, Some(serde_json::json!({"a": 1})));
    }
}
