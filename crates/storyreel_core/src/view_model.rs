use url::Url;

use crate::{JobId, JobKind, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub busy: bool,
    pub auto_upload: bool,
    pub last_error: Option<String>,
    pub single_preview_url: Option<String>,
    pub job_count: usize,
    pub jobs: Vec<JobRowView>,
    pub queue: Vec<QueueRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub kind: JobKind,
    pub path: String,
    pub caption: String,
    pub status: JobStatus,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRowView {
    pub path: String,
    pub caption: Option<String>,
    pub status: String,
    pub preview_url: Option<String>,
}

/// Resolves an artifact locator for rendering or linking. A path that
/// already carries a URL scheme passes through untouched; anything else is
/// concatenated onto the configured base origin.
pub fn resolve_artifact_url(base_url: &str, path: &str) -> String {
    if Url::parse(path).is_ok() {
        path.to_string()
    } else {
        format!("{base_url}{path}")
    }
}
