use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reel_logging::reel_info;
use storyreel_core::{Effect, Msg, QueueItem};
use storyreel_engine::{
    ApiError, ApiSettings, EngineCommand, EngineConfig, EngineEvent, EngineHandle, QueueEntry,
};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(api: ApiSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, ApiError> {
        let engine = EngineHandle::new(EngineConfig::new(api))?;
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ExtractSource { mode, file } => {
                    reel_info!("ExtractSource file={file}");
                    self.engine.submit(EngineCommand::ExtractSource {
                        mode: map_mode(mode),
                        file,
                    });
                }
                Effect::RequestGeneration { mode, caption } => {
                    reel_info!("RequestGeneration caption_len={}", caption.len());
                    self.engine.submit(EngineCommand::Generate {
                        mode: map_mode(mode),
                        caption,
                    });
                }
                Effect::UploadVideo {
                    job_id,
                    path,
                    caption,
                } => {
                    reel_info!("UploadVideo job_id={job_id} path={path}");
                    self.engine.submit(EngineCommand::Upload {
                        job_id,
                        path,
                        caption,
                    });
                }
                Effect::FetchQueue => self.engine.submit(EngineCommand::FetchQueue),
                Effect::RepostTopReels => self.engine.submit(EngineCommand::RepostTopReels),
            }
        }
    }

    /// Cancels the engine's background queue poll.
    pub fn stop(&self) {
        self.engine.stop();
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionCompleted { mode, result } => Msg::ExtractionFinished {
            mode: map_mode_back(mode),
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::GenerationCompleted {
            mode,
            caption,
            result,
        } => Msg::GenerationFinished {
            mode: map_mode_back(mode),
            caption,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::UploadStarted { job_id, path } => Msg::UploadStarted { job_id, path },
        EngineEvent::UploadCompleted {
            job_id,
            path,
            result,
        } => Msg::UploadFinished {
            job_id,
            path,
            result: result.map_err(|err| err.to_string()),
        },
        EngineEvent::QueueFetched { entries } => Msg::QueueRefreshed {
            entries: entries.into_iter().map(map_queue_entry).collect(),
        },
    }
}

fn map_mode(mode: storyreel_core::GenerationMode) -> storyreel_engine::GenerationMode {
    match mode {
        storyreel_core::GenerationMode::Single => storyreel_engine::GenerationMode::Single,
        storyreel_core::GenerationMode::Multi => storyreel_engine::GenerationMode::Multi,
    }
}

fn map_mode_back(mode: storyreel_engine::GenerationMode) -> storyreel_core::GenerationMode {
    match mode {
        storyreel_engine::GenerationMode::Single => storyreel_core::GenerationMode::Single,
        storyreel_engine::GenerationMode::Multi => storyreel_core::GenerationMode::Multi,
    }
}

fn map_queue_entry(entry: QueueEntry) -> QueueItem {
    QueueItem {
        path: entry.path,
        caption: entry.caption,
        status: entry.status,
    }
}
