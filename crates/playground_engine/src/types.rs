use std::fmt;

use playground_core::{DataOutcome, MetaOutcome, SubmissionId};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ServiceAccount(Result<String, FetchError>),
    MetaResolved {
        submission: SubmissionId,
        outcome: MetaOutcome,
    },
    DataFetched {
        submission: SubmissionId,
        outcome: DataOutcome,
    },
}

/// Status and body of an HTTP answer, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedBody,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

// Wire shapes of the backend's JSON answers.

#[derive(Debug, Deserialize)]
pub(crate) struct SheetMetaEnvelope {
    pub data: SheetMetaPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetMetaPayload {
    pub spread_sheet_id: String,
    pub sheet_id_or_name: SheetIdOrName,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SheetIdOrName {
    pub tab_sheet_id: Option<u32>,
    pub tab_sheet_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ServiceAccountPayload {
    pub service_account: String,
}
