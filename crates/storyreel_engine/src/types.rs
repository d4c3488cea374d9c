use std::fmt;

use serde::Deserialize;
use thiserror::Error;

pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Single,
    Multi,
}

/// One item of the server-reported upload queue, exactly as the service
/// describes it. Mirrored locally, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueueEntry {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Failure of a remote operation. The message is user-facing: the
/// remote-supplied error text when the service sent one, a transport
/// description otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiFailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailureKind {
    HttpStatus(u16),
    Timeout,
    Network,
    /// The service answered 2xx but reported failure in its envelope.
    Rejected,
    InvalidResponse,
    Io,
}

impl fmt::Display for ApiFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailureKind::Timeout => write!(f, "timeout"),
            ApiFailureKind::Network => write!(f, "network error"),
            ApiFailureKind::Rejected => write!(f, "rejected by service"),
            ApiFailureKind::InvalidResponse => write!(f, "invalid response"),
            ApiFailureKind::Io => write!(f, "io error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ExtractionCompleted {
        mode: GenerationMode,
        result: Result<String, ApiError>,
    },
    GenerationCompleted {
        mode: GenerationMode,
        caption: String,
        result: Result<Vec<String>, ApiError>,
    },
    UploadStarted {
        job_id: JobId,
        path: String,
    },
    UploadCompleted {
        job_id: JobId,
        path: String,
        result: Result<(), ApiError>,
    },
    QueueFetched {
        entries: Vec<QueueEntry>,
    },
}
