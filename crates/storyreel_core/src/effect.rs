#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ExtractSource {
        mode: crate::GenerationMode,
        file: String,
    },
    RequestGeneration {
        mode: crate::GenerationMode,
        caption: String,
    },
    UploadVideo {
        job_id: crate::JobId,
        path: String,
        caption: String,
    },
    FetchQueue,
    RepostTopReels,
}
