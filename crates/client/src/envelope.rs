use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use taller_core::{Page, PageQuery, PaginationMeta};

/// The `{ success, data, pagination?, message? }` wrapper every JSON
/// response arrives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
    #[serde(default, deserialize_with = "lenient_message")]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

/// Informational only: a `message` that is not a string is dropped rather
/// than failing an otherwise successful response.
fn lenient_message<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// List payloads come either as a bare array or as an object that carries
/// its own pagination block next to the rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListData<T> {
    Plain(Vec<T>),
    Nested {
        #[serde(alias = "items", alias = "rows")]
        data: Vec<T>,
        #[serde(default)]
        pagination: Option<PaginationMeta>,
    },
}

impl<T> ListData<T> {
    /// Normalize into a [`Page`]. A pagination block nested with the rows
    /// takes precedence over the envelope's.
    pub fn into_page(self, envelope_meta: Option<PaginationMeta>, requested: PageQuery) -> Page<T> {
        match self {
            Self::Plain(items) => Page::from_parts(items, envelope_meta, requested),
            Self::Nested { data, pagination } => {
                Page::from_parts(data, pagination.or(envelope_meta), requested)
            }
        }
    }
}

/// A binary response passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// From `Content-Disposition`, when the server names the file.
    pub filename: Option<String>,
}

impl Blob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Pull `filename="..."` out of a `Content-Disposition` header value.
pub(crate) fn disposition_filename(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|part| {
        let value = part.strip_prefix("filename=")?;
        let value = value.trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
