use std::path::Path;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use reel_logging::{reel_debug, reel_info, reel_warn};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, ApiSettings, ReqwestApiClient};
use crate::types::{ApiError, EngineEvent, GenerationMode, JobId};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub api: ApiSettings,
}

impl EngineConfig {
    pub fn new(api: ApiSettings) -> Self {
        Self { api }
    }

    pub fn from_env() -> Self {
        Self {
            api: ApiSettings::from_env(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    ExtractSource {
        mode: GenerationMode,
        file: String,
    },
    Generate {
        mode: GenerationMode,
        caption: String,
    },
    Upload {
        job_id: JobId,
        path: String,
        caption: String,
    },
    FetchQueue,
    RepostTopReels,
}

struct PendingUpload {
    job_id: JobId,
    path: String,
    caption: String,
}

/// Owns the poller's cancellation token. Dropping the last engine handle
/// cancels the recurring poll before the runtime itself winds down.
struct PollerGuard {
    token: CancellationToken,
}

impl Drop for PollerGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
    poller: Arc<PollerGuard>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, ApiError> {
        let client = Arc::new(ReqwestApiClient::new(config.api.clone())?);
        Ok(Self::with_client(client, config.api.poll_interval))
    }

    /// Builds an engine over any client implementation. The queue poller
    /// fires immediately and then repeats at `poll_interval`.
    pub fn with_client(client: Arc<dyn ApiClient>, poll_interval: Duration) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let token = CancellationToken::new();
        let poll_token = token.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let (upload_tx, upload_rx) = unbounded_channel::<PendingUpload>();
            runtime.spawn(upload_worker(client.clone(), upload_rx, event_tx.clone()));
            runtime.spawn(poll_queue(
                client.clone(),
                event_tx.clone(),
                poll_token,
                poll_interval,
            ));

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    // Uploads go through a dedicated lane so they run one
                    // at a time, in submission order.
                    EngineCommand::Upload {
                        job_id,
                        path,
                        caption,
                    } => {
                        let _ = upload_tx.send(PendingUpload {
                            job_id,
                            path,
                            caption,
                        });
                    }
                    other => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            handle_command(client.as_ref(), other, event_tx).await;
                        });
                    }
                }
            }
            // Command channel closed: every handle is gone. The runtime is
            // dropped here, taking the poller and upload lane with it.
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
            poller: Arc::new(PollerGuard { token }),
        }
    }

    pub fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Stops the background queue poll without waiting for drop.
    pub fn stop(&self) {
        self.poller.token.cancel();
    }
}

async fn handle_command(
    client: &dyn ApiClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::ExtractSource { mode, file } => {
            let result = client.extract_text(Path::new(&file)).await;
            let _ = event_tx.send(EngineEvent::ExtractionCompleted { mode, result });
        }
        EngineCommand::Generate { mode, caption } => {
            let result = match mode {
                GenerationMode::Single => {
                    client.generate_single(&caption).await.map(|file| vec![file])
                }
                GenerationMode::Multi => client.generate_multi(&caption).await,
            };
            let _ = event_tx.send(EngineEvent::GenerationCompleted {
                mode,
                caption,
                result,
            });
        }
        EngineCommand::FetchQueue => match client.fetch_queue().await {
            Ok(entries) => {
                let _ = event_tx.send(EngineEvent::QueueFetched { entries });
            }
            // The mirror is best-effort; a failed refresh leaves it as-is.
            Err(err) => reel_debug!("queue refresh failed: {err}"),
        },
        EngineCommand::RepostTopReels => match client.repost_top_reels().await {
            Ok(body) => reel_info!(
                "reels reposted: {}",
                body.get("posted").cloned().unwrap_or(serde_json::Value::Null)
            ),
            Err(err) => reel_warn!("repost request failed: {err}"),
        },
        // Routed to the upload lane before this function is reached.
        EngineCommand::Upload { .. } => {}
    }
}

/// Uploads run strictly one at a time, in submission order. A failed item
/// emits its completion event and the lane moves on to the next.
async fn upload_worker(
    client: Arc<dyn ApiClient>,
    mut pending: UnboundedReceiver<PendingUpload>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    while let Some(upload) = pending.recv().await {
        let _ = event_tx.send(EngineEvent::UploadStarted {
            job_id: upload.job_id,
            path: upload.path.clone(),
        });
        let result = client.enqueue_upload(&upload.path, &upload.caption).await;
        let _ = event_tx.send(EngineEvent::UploadCompleted {
            job_id: upload.job_id,
            path: upload.path,
            result,
        });
    }
}

/// Recurring queue snapshot. Poll failures are logged at debug level and
/// otherwise ignored; the tick in flight finishes before cancellation
/// takes effect.
async fn poll_queue(
    client: Arc<dyn ApiClient>,
    event_tx: mpsc::Sender<EngineEvent>,
    token: CancellationToken,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => match client.fetch_queue().await {
                Ok(entries) => {
                    let _ = event_tx.send(EngineEvent::QueueFetched { entries });
                }
                Err(err) => reel_debug!("queue poll failed: {err}"),
            },
        }
    }
}
