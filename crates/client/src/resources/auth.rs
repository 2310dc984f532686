use serde::{Deserialize, Serialize};

use taller_auth::{Credentials, User};
use taller_core::DomainError;

use crate::error::ApiError;
use crate::http::ApiClient;
use crate::request::{ApiRequest, LOGIN_PATH};

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl core::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(DomainError::validation("Email y contraseña son obligatorios"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    #[serde(alias = "usuario")]
    user: User,
}

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Authenticate and start a session. The previous session, if any, is
    /// replaced wholesale.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        request.validate()?;
        let response: LoginResponse = self
            .client
            .send(ApiRequest::post(LOGIN_PATH).json(request)?)
            .await?;

        let user = response.user.clone();
        self.client
            .session()
            .login(Credentials::new(response.token, response.user))?;
        Ok(user)
    }

    /// Fetch the current profile and refresh the session with it.
    pub async fn me(&self) -> Result<User, ApiError> {
        let user: User = self.client.send(ApiRequest::get("auth/me")).await?;
        self.client.session().replace_user(user.clone())?;
        Ok(user)
    }

    /// Invalidate the token server-side, then forget it locally. The local
    /// session is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let remote = if self.client.session().is_authenticated() {
            self.client.send_unit(ApiRequest::post("auth/logout")).await
        } else {
            Ok(())
        };
        if let Err(e) = &remote {
            tracing::warn!(error = %e, "server-side logout failed; clearing local session anyway");
        }
        self.client.session().logout()?;
        Ok(())
    }
}
