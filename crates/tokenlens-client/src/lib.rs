#![forbid(unsafe_code)]

//! HTTP client for the record store and the scoring service.
//!
//! The remote service keeps `{id, text}` records addressed by integer id
//! under `/api/texts` and scores text into an N×N attention matrix under
//! `/api/visualize`. Every operation is one synchronous round trip: no
//! retries, no caching. Failures map to [`ClientError`] and are surfaced
//! informationally by the caller; none are fatal to the UI.

pub mod scorer;

pub use scorer::{RemoteScorer, Scorer, UniformScorer};

use serde::{Deserialize, Serialize};
use tokenlens_core::attention::{AttentionMatrix, ShapeError};

/// One saved text record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    /// Opaque record id assigned by the store.
    pub id: i64,
    /// The saved text.
    pub text: String,
}

#[derive(Serialize)]
struct TextPayload<'a> {
    text: &'a str,
}

/// Client errors, in decreasing order of distance from the application:
/// the transport failed, the service rejected the request, or the payload
/// did not decode into the expected shape.
#[derive(Debug)]
pub enum ClientError {
    /// Connection or protocol failure.
    Transport(String),
    /// The service answered with a non-success status.
    Status(u16),
    /// The response body was not the expected JSON shape.
    Decode(String),
    /// The decoded matrix was not square.
    Shape(ShapeError),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status(code) => write!(f, "service returned status {code}"),
            Self::Decode(msg) => write!(f, "malformed response: {msg}"),
            Self::Shape(err) => write!(f, "malformed attention matrix: {err}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ShapeError> for ClientError {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Status(code),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Typed client over the remote service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    agent: ureq::Agent,
}

impl ApiClient {
    /// Create a client for a service base URL (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// List all saved texts.
    pub fn list_texts(&self) -> Result<Vec<TextRecord>, ClientError> {
        tracing::debug!(base = %self.base, "list texts");
        // The store encodes an empty table as JSON null.
        let records: Option<Vec<TextRecord>> = self
            .agent
            .get(self.url("/api/texts"))
            .call()?
            .body_mut()
            .read_json()
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(records.unwrap_or_default())
    }

    /// Fetch one record by id.
    pub fn get_text(&self, id: i64) -> Result<TextRecord, ClientError> {
        tracing::debug!(id, "get text");
        self.agent
            .get(self.url(&format!("/api/texts/{id}")))
            .call()?
            .body_mut()
            .read_json()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Save a new text; returns the stored record with its assigned id.
    pub fn create_text(&self, text: &str) -> Result<TextRecord, ClientError> {
        tracing::debug!(len = text.len(), "create text");
        self.agent
            .post(self.url("/api/texts"))
            .send_json(&TextPayload { text })?
            .body_mut()
            .read_json()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Replace the text of an existing record.
    pub fn update_text(&self, id: i64, text: &str) -> Result<TextRecord, ClientError> {
        tracing::debug!(id, len = text.len(), "update text");
        self.agent
            .put(self.url(&format!("/api/texts/{id}")))
            .send_json(&TextPayload { text })?
            .body_mut()
            .read_json()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Delete a record by id.
    pub fn delete_text(&self, id: i64) -> Result<(), ClientError> {
        tracing::debug!(id, "delete text");
        self.agent
            .delete(self.url(&format!("/api/texts/{id}")))
            .call()?;
        Ok(())
    }

    /// Score a text into an attention matrix.
    ///
    /// The matrix shape is validated here, at the trust boundary; all
    /// downstream code may assume squareness.
    pub fn score(&self, text: &str) -> Result<AttentionMatrix, ClientError> {
        tracing::debug!(len = text.len(), "score text");
        let rows: Vec<Vec<f64>> = self
            .agent
            .post(self.url("/api/visualize"))
            .send_json(&TextPayload { text })?
            .body_mut()
            .read_json()
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(AttentionMatrix::new(rows)?)
    }
}
