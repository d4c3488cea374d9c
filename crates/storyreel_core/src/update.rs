use crate::{AppState, Effect, GenerationMode, JobId, JobStatus, Msg, CAPTION_MAX_CHARS};

/// Shown when generation is requested without any usable source text.
pub const EMPTY_SOURCE_MESSAGE: &str = "Paste text or upload PDF first.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SourceTextChanged(text) => {
            state.set_source_text(text);
            Vec::new()
        }
        Msg::PdfSelected(file) => {
            state.set_pdf_file(file);
            Vec::new()
        }
        Msg::AutoUploadToggled(enabled) => {
            state.set_auto_upload(enabled);
            Vec::new()
        }
        Msg::GenerateClicked(mode) => {
            if state.is_busy() {
                return (state, Vec::new());
            }
            state.begin_generation(mode);
            // A file attachment always wins over the text box; the raw text
            // path validates before any network call is issued.
            match state.pdf_file().map(ToOwned::to_owned) {
                Some(file) => vec![Effect::ExtractSource { mode, file }],
                None => {
                    let base = state.source_text().trim().to_owned();
                    start_generation(&mut state, mode, base)
                }
            }
        }
        Msg::ExtractionFinished { mode, result } => match result {
            Ok(text) => start_generation(&mut state, mode, text.trim().to_owned()),
            Err(message) => {
                state.finish_generation(Some(message));
                Vec::new()
            }
        },
        Msg::GenerationFinished {
            mode,
            caption,
            result,
        } => match result {
            Ok(paths) => apply_generated(&mut state, mode, caption, paths),
            Err(message) => {
                state.finish_generation(Some(message));
                Vec::new()
            }
        },
        Msg::UploadClicked { job_id } => match state.job(job_id) {
            // An in-flight upload is never doubled from this session.
            Some(job) if job.status != JobStatus::Uploading => vec![Effect::UploadVideo {
                job_id,
                path: job.path.clone(),
                caption: job.caption.clone(),
            }],
            _ => Vec::new(),
        },
        Msg::UploadStarted { job_id, path } => {
            state.apply_upload_status(job_id, &path, JobStatus::Uploading);
            Vec::new()
        }
        Msg::UploadFinished {
            job_id,
            path,
            result,
        } => {
            match result {
                Ok(()) => state.apply_upload_status(job_id, &path, JobStatus::Uploaded),
                Err(message) => {
                    state.apply_upload_status(job_id, &path, JobStatus::UploadFailed);
                    state.set_error(Some(message));
                }
            }
            Vec::new()
        }
        Msg::RefreshQueueClicked => vec![Effect::FetchQueue],
        Msg::QueueRefreshed { entries } => {
            state.replace_queue(entries);
            Vec::new()
        }
        Msg::RepostClicked => vec![Effect::RepostTopReels],
    };

    (state, effects)
}

/// Validates the source text and emits the generation request. The caption
/// is the first `CAPTION_MAX_CHARS` characters of the (already trimmed)
/// source, whichever generation mode is in play.
fn start_generation(state: &mut AppState, mode: GenerationMode, base: String) -> Vec<Effect> {
    if base.is_empty() {
        state.finish_generation(Some(EMPTY_SOURCE_MESSAGE.to_string()));
        return Vec::new();
    }
    vec![Effect::RequestGeneration {
        mode,
        caption: derive_caption(&base),
    }]
}

fn apply_generated(
    state: &mut AppState,
    mode: GenerationMode,
    caption: String,
    paths: Vec<String>,
) -> Vec<Effect> {
    state.finish_generation(None);

    let created: Vec<(JobId, String)> = match mode {
        GenerationMode::Single => match paths.into_iter().next() {
            Some(path) => {
                let id = state.push_single_job(path.clone(), caption.clone());
                state.set_single_preview(path.clone());
                vec![(id, path)]
            }
            None => Vec::new(),
        },
        GenerationMode::Multi => state.push_chunk_jobs(paths, caption.clone()),
    };

    if !state.auto_upload() {
        return Vec::new();
    }

    // Auto-upload follows the response order; the engine serializes these.
    created
        .into_iter()
        .map(|(job_id, path)| Effect::UploadVideo {
            job_id,
            path,
            caption: caption.clone(),
        })
        .collect()
}

fn derive_caption(text: &str) -> String {
    text.chars().take(CAPTION_MAX_CHARS).collect()
}
