//! HTTP client for the spreadsheet web endpoint.
//!
//! The endpoint is a single URL that selects its operation through an
//! `action` query parameter and answers every request with a
//! `{success, data|error}` JSON envelope. There is no authentication and
//! no request body.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use tracing::debug;

use crate::models::{Candidate, Student};

use super::ApiError;

/// HTTP request timeout in seconds.
/// Short enough that a stalled connection degrades into the cache fallback
/// quickly; the endpoint normally answers well under a second.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Dataset selector understood by the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    GetStudents,
    GetCandidates,
    GetBoth,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::GetStudents => "getStudents",
            Action::GetCandidates => "getCandidates",
            Action::GetBoth => "getBoth",
        }
    }
}

/// Response envelope returned by the endpoint for every action.
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Combined payload answered for [`Action::GetBoth`].
///
/// Both keys are required: an answer missing either one is rejected as
/// malformed rather than read as an empty dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterPayload {
    pub students: Vec<Student>,
    pub candidates: Vec<Candidate>,
}

/// Client for the spreadsheet web endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct SheetClient {
    client: Client,
    endpoint: String,
}

impl SheetClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Issue one GET for the given action and decode the envelope.
    async fn call<T: DeserializeOwned>(&self, action: Action) -> Result<T, ApiError> {
        debug!(action = action.as_str(), "Calling sheet endpoint");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("action", action.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        Self::decode(&text)
    }

    /// Decode an envelope body into the requested payload type.
    fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
        let envelope: Envelope = serde_json::from_str(text)
            .map_err(|e| ApiError::Validation(format!("undecodable envelope: {e}")))?;

        if !envelope.success {
            return Err(ApiError::Application(envelope.error.unwrap_or_else(|| {
                "endpoint answered success=false with no error message".to_string()
            })));
        }

        let data = envelope
            .data
            .ok_or_else(|| ApiError::Validation("envelope has no data field".to_string()))?;

        serde_json::from_value(data)
            .map_err(|e| ApiError::Validation(format!("unexpected payload shape: {e}")))
    }

    pub async fn get_students(&self) -> Result<Vec<Student>, ApiError> {
        self.call(Action::GetStudents).await
    }

    pub async fn get_candidates(&self) -> Result<Vec<Candidate>, ApiError> {
        self.call(Action::GetCandidates).await
    }

    pub async fn get_both(&self) -> Result<RosterPayload, ApiError> {
        self.call(Action::GetBoth).await
    }
}
