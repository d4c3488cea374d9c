//! Storyreel core: pure job/queue reconciler state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, GenerationMode, Job, JobId, JobKind, JobStatus, QueueItem, CAPTION_MAX_CHARS,
};
pub use update::{update, EMPTY_SOURCE_MESSAGE};
pub use view_model::{resolve_artifact_url, AppViewModel, JobRowView, QueueRowView};
