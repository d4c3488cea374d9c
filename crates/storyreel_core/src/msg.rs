#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the story text box.
    SourceTextChanged(String),
    /// User attached a PDF file, or cleared the attachment.
    PdfSelected(Option<String>),
    /// User toggled the auto-upload setting.
    AutoUploadToggled(bool),
    /// User requested clip generation.
    GenerateClicked(crate::GenerationMode),
    /// Engine finished the PDF extraction step for a pending generation.
    ExtractionFinished {
        mode: crate::GenerationMode,
        result: Result<String, String>,
    },
    /// Engine finished a generation request.
    GenerationFinished {
        mode: crate::GenerationMode,
        caption: String,
        result: Result<Vec<String>, String>,
    },
    /// User requested upload of a tracked job.
    UploadClicked { job_id: crate::JobId },
    /// Engine dequeued the upload for a job and began the remote call.
    UploadStarted { job_id: crate::JobId, path: String },
    /// Engine completed the upload for a job.
    UploadFinished {
        job_id: crate::JobId,
        path: String,
        result: Result<(), String>,
    },
    /// User asked for an immediate queue refresh.
    RefreshQueueClicked,
    /// A queue snapshot arrived, from the poller or a manual refresh.
    QueueRefreshed { entries: Vec<crate::QueueItem> },
    /// User asked the service to repost its top reels.
    RepostClicked,
}
