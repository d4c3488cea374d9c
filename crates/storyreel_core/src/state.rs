use std::fmt;

use crate::view_model::{resolve_artifact_url, AppViewModel, JobRowView, QueueRowView};

pub type JobId = u64;

/// Longest caption the remote service accepts as clip metadata.
pub const CAPTION_MAX_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Single,
    Multi,
}

/// What a job's artifact is: the one clip of a single generation, or one
/// chunk of a multi-chunk generation (1-based position in the response).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Single,
    Chunk { idx: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Uploading,
    Uploaded,
    UploadFailed,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Uploading => write!(f, "uploading"),
            JobStatus::Uploaded => write!(f, "uploaded"),
            JobStatus::UploadFailed => write!(f, "upload failed"),
        }
    }
}

/// One locally tracked unit of generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub kind: JobKind,
    pub path: String,
    pub caption: String,
    pub status: JobStatus,
}

/// A remote-service-reported queue item. Authoritative on the server side;
/// the client only mirrors it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueueItem {
    pub path: String,
    pub caption: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    base_url: String,
    source_text: String,
    pdf_file: Option<String>,
    auto_upload: bool,
    busy: bool,
    last_error: Option<String>,
    single_preview: Option<String>,
    /// Most recent first.
    jobs: Vec<Job>,
    queue: Vec<QueueItem>,
    next_job_id: JobId,
    dirty: bool,
}

impl AppState {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            busy: self.busy,
            auto_upload: self.auto_upload,
            last_error: self.last_error.clone(),
            single_preview_url: self
                .single_preview
                .as_deref()
                .map(|path| resolve_artifact_url(&self.base_url, path)),
            job_count: self.jobs.len(),
            jobs: self.jobs.iter().map(|job| self.job_row(job)).collect(),
            queue: self.queue.iter().map(|entry| self.queue_row(entry)).collect(),
        }
    }

    fn job_row(&self, job: &Job) -> JobRowView {
        JobRowView {
            job_id: job.id,
            kind: job.kind,
            path: job.path.clone(),
            caption: job.caption.clone(),
            status: job.status,
            preview_url: (!job.path.is_empty())
                .then(|| resolve_artifact_url(&self.base_url, &job.path)),
        }
    }

    fn queue_row(&self, entry: &QueueItem) -> QueueRowView {
        QueueRowView {
            path: entry.path.clone(),
            caption: entry.caption.clone(),
            status: entry
                .status
                .clone()
                .unwrap_or_else(|| "pending".to_string()),
            preview_url: (!entry.path.is_empty())
                .then(|| resolve_artifact_url(&self.base_url, &entry.path)),
        }
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        let was = self.dirty;
        self.dirty = false;
        was
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_source_text(&mut self, text: String) {
        self.source_text = text;
        self.mark_dirty();
    }

    pub(crate) fn set_pdf_file(&mut self, file: Option<String>) {
        self.pdf_file = file;
        self.mark_dirty();
    }

    pub(crate) fn set_auto_upload(&mut self, enabled: bool) {
        self.auto_upload = enabled;
        self.mark_dirty();
    }

    pub(crate) fn source_text(&self) -> &str {
        &self.source_text
    }

    pub(crate) fn pdf_file(&self) -> Option<&str> {
        self.pdf_file.as_deref()
    }

    pub(crate) fn auto_upload(&self) -> bool {
        self.auto_upload
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy
    }

    /// Marks a generation request in flight. A single generation also drops
    /// the previous preview.
    pub(crate) fn begin_generation(&mut self, mode: GenerationMode) {
        self.busy = true;
        self.last_error = None;
        if mode == GenerationMode::Single {
            self.single_preview = None;
        }
        self.mark_dirty();
    }

    /// Clears the in-flight flag, recording a user-facing error if the
    /// request ended in one.
    pub(crate) fn finish_generation(&mut self, error: Option<String>) {
        self.busy = false;
        if error.is_some() {
            self.last_error = error;
        }
        self.mark_dirty();
    }

    pub(crate) fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
        self.mark_dirty();
    }

    pub(crate) fn set_single_preview(&mut self, path: String) {
        self.single_preview = Some(path);
        self.mark_dirty();
    }

    pub(crate) fn job(&self, job_id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == job_id)
    }

    pub(crate) fn push_single_job(&mut self, path: String, caption: String) -> JobId {
        let id = self.alloc_job_id();
        self.jobs.insert(
            0,
            Job {
                id,
                kind: JobKind::Single,
                path,
                caption,
                status: JobStatus::Queued,
            },
        );
        self.mark_dirty();
        id
    }

    /// Prepends one job per artifact path, preserving the response order
    /// within the new block. Returns the created (id, path) pairs in that
    /// same order.
    pub(crate) fn push_chunk_jobs(
        &mut self,
        paths: Vec<String>,
        caption: String,
    ) -> Vec<(JobId, String)> {
        let mut created = Vec::with_capacity(paths.len());
        let mut block = Vec::with_capacity(paths.len() + self.jobs.len());
        for (offset, path) in paths.into_iter().enumerate() {
            let id = self.alloc_job_id();
            block.push(Job {
                id,
                kind: JobKind::Chunk { idx: offset + 1 },
                path: path.clone(),
                caption: caption.clone(),
                status: JobStatus::Queued,
            });
            created.push((id, path));
        }
        block.extend(self.jobs.drain(..));
        self.jobs = block;
        self.mark_dirty();
        created
    }

    /// Applies an upload status transition. The job id is the primary key;
    /// any other job sharing the same path is updated together with it,
    /// which tolerates duplicate paths from the service.
    pub(crate) fn apply_upload_status(&mut self, job_id: JobId, path: &str, status: JobStatus) {
        for job in &mut self.jobs {
            if job.id == job_id || job.path == path {
                job.status = status;
            }
        }
        self.mark_dirty();
    }

    /// Wholesale replacement of the queue mirror. No diffing.
    pub(crate) fn replace_queue(&mut self, entries: Vec<QueueItem>) {
        self.queue = entries;
        self.mark_dirty();
    }

    fn alloc_job_id(&mut self) -> JobId {
        self.next_job_id += 1;
        self.next_job_id
    }
}
