//! HTTP client for the taller REST API.
//!
//! Every call goes through [`ApiClient`]: the request side attaches the
//! session's bearer token, the response side unwraps the `{ success, data }`
//! envelope and turns error bodies into [`ApiError`]s. A 401 outside the
//! login flow clears the session and sends the [`Navigator`] to the login
//! route.

pub mod config;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod http;
pub mod navigation;
pub mod request;
pub mod resources;
pub mod source;

pub use config::ClientConfig;
pub use decode::{ErrorDetail, FieldError};
pub use envelope::{ApiEnvelope, Blob, ListData};
pub use error::{ApiError, ErrorKind};
pub use http::ApiClient;
pub use navigation::{MemoryNavigator, Navigator};
pub use request::ApiRequest;
pub use source::PagedSource;
