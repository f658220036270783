//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

/// One retained history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HistoryEntryDto {
    Text { content: String },
    Binary { size: usize },
}

/// Body of `POST /api/messages`
///
/// Both fields are optional at the wire level so that a missing field yields
/// the "message required" rejection rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PostMessageRequest {
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
