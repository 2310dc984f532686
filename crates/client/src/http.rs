//! The request/response pipeline.
//!
//! Outbound: resolve the URL, attach the bearer token when a session is
//! active. Inbound: non-2xx bodies and `success: false` envelopes become
//! [`ApiError::Http`]; anything else is unwrapped. Blob responses skip the
//! envelope entirely.

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use taller_auth::SessionContext;
use taller_core::{Page, PageQuery};

use crate::config::ClientConfig;
use crate::decode::{http_error, transport_error};
use crate::envelope::{disposition_filename, ApiEnvelope, Blob, ListData};
use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::request::ApiRequest;

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    session: SessionContext,
    navigator: Arc<dyn Navigator>,
}

/// Cheap to clone; clones share the connection pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl core::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("authenticated", &self.inner.session.is_authenticated())
            .finish()
    }
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        session: SessionContext,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config,
                session,
                navigator,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &SessionContext {
        &self.inner.session
    }

    /// Send and unwrap `data`. A successful envelope without `data` is a
    /// decode error.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let path = request.path.clone();
        self.send_envelope(request)
            .await?
            .into_data()
            .ok_or_else(|| ApiError::Decode(format!("respuesta sin datos para {path}")))
    }

    /// Send a call whose payload is irrelevant (deletes, logout).
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send_envelope::<Value>(request).await.map(|_| ())
    }

    /// Send a list request with `requested` appended as page/limit.
    pub async fn send_page<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        requested: PageQuery,
    ) -> Result<Page<T>, ApiError> {
        let request = request.query(requested.to_pairs());
        let envelope: ApiEnvelope<ListData<T>> = self.send_envelope(request).await?;
        let meta = envelope.pagination;
        Ok(match envelope.data {
            Some(list) => list.into_page(meta, requested),
            None => Page::from_parts(Vec::new(), meta, requested),
        })
    }

    /// Send and return the whole envelope.
    pub async fn send_envelope<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let response = self.dispatch(&request).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| transport_error(&e))?;

        if !(200..300).contains(&status) {
            return Err(self.fail(&request, status, &text));
        }

        if text.trim().is_empty() {
            return Ok(ApiEnvelope {
                success: true,
                data: None,
                pagination: None,
                message: None,
            });
        }

        let value: Value =
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(self.fail(&request, status, &text));
        }

        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(path = %request.path, error = %e, "unexpected response shape");
            ApiError::Decode(e.to_string())
        })
    }

    /// Send and pass the body through as raw bytes.
    pub async fn send_blob(&self, request: ApiRequest) -> Result<Blob, ApiError> {
        let response = self.dispatch(&request).await?;
        let status = response.status().as_u16();

        if !(200..300).contains(&status) {
            let text = response.text().await.map_err(|e| transport_error(&e))?;
            return Err(self.fail(&request, status, &text));
        }

        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let filename = header(CONTENT_DISPOSITION).and_then(|d| disposition_filename(&d));
        let bytes = response.bytes().await.map_err(|e| transport_error(&e))?;

        Ok(Blob {
            bytes: bytes.to_vec(),
            content_type,
            filename,
        })
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<reqwest::Response, ApiError> {
        let url = self.inner.config.url(&request.path);
        let mut builder = self.inner.http.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = self.inner.session.token() {
            builder = builder.bearer_auth(token);
        }

        let started = Instant::now();
        let result = builder.send().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                tracing::debug!(
                    method = %request.method,
                    path = %request.path,
                    status = response.status().as_u16(),
                    elapsed_ms,
                    "api request"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    elapsed_ms,
                    timeout = e.is_timeout(),
                    "api request failed before a response"
                );
                Err(transport_error(&e))
            }
        }
    }

    fn fail(&self, request: &ApiRequest, status: u16, body: &str) -> ApiError {
        let err = http_error(status, body);
        if err.is_unauthorized() {
            self.session_expired(request);
        }
        err
    }

    /// Global 401 policy: outside the login flow, drop the credentials and
    /// route to the login page.
    fn session_expired(&self, request: &ApiRequest) {
        if request.is_login() {
            return;
        }
        let login_route = &self.inner.config.login_route;
        if same_route(&self.inner.navigator.current_path(), login_route) {
            return;
        }

        if let Err(e) = self.inner.session.logout() {
            tracing::warn!(error = %e, "could not clear stored credentials");
        }
        tracing::warn!(path = %request.path, "session expired; redirecting to {}", login_route);
        self.inner.navigator.navigate(login_route);
    }
}

/// Compare two routes by path only: query, fragment and trailing slashes
/// are ignored.
fn same_route(current: &str, route: &str) -> bool {
    fn path(route: &str) -> &str {
        let end = route.find(['?', '#']).unwrap_or(route.len());
        route[..end].trim_end_matches('/')
    }
    path(current) == path(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_compare_by_path() {
        assert!(same_route("/login", "/login"));
        assert!(same_route("/login/", "/login"));
        assert!(same_route("/login?next=/servicios", "/login"));
        assert!(same_route("/login#form", "/login/"));
        assert!(!same_route("/login-help", "/login"));
        assert!(!same_route("/servicios?from=/login", "/login"));
        assert!(same_route("/", "/"));
    }
}
