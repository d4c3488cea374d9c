//! Storyreel engine: remote service client and effect execution.
mod api;
mod engine;
mod types;

pub use api::{
    ApiClient, ApiSettings, ReqwestApiClient, API_PREFIX, BASE_URL_ENV, DEFAULT_BASE_URL,
};
pub use engine::{EngineCommand, EngineConfig, EngineHandle};
pub use types::{ApiError, ApiFailureKind, EngineEvent, GenerationMode, JobId, QueueEntry};
