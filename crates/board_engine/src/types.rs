use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

pub type RecordId = i64;

/// One persisted row as the remote service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Completion events emitted by the engine, one per serviced command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    FetchCompleted {
        result: Result<Vec<Record>, StoreError>,
    },
    InsertCompleted {
        result: Result<Record, StoreError>,
    },
    DeleteCompleted {
        record_id: RecordId,
        result: Result<(), StoreError>,
    },
}

/// A failed remote operation. The message is what the rendering layer
/// ultimately shows; the kind is for callers that want to match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: FailureKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidApiKey,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidApiKey => write!(f, "invalid api key"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
