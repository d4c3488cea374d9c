use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use storyreel_core::{update, AppState, Msg};
use storyreel_engine::{ApiError, ApiSettings};

use super::effects::EffectRunner;
use super::{input, logging, render};

/// Message pump for the dashboard: stdin commands and engine events both
/// arrive as `Msg` on one channel; each is applied through the pure update
/// function, effects are handed to the engine, and the view is re-rendered
/// whenever the state marks itself dirty.
pub fn run_app() -> Result<(), ApiError> {
    logging::initialize(logging::LogDestination::File);

    let mut api = ApiSettings::from_env();
    if let Some(base_url) = std::env::args().nth(1) {
        api.base_url = base_url;
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(api.clone(), msg_tx.clone())?;

    let running = Arc::new(AtomicBool::new(true));
    input::spawn_input_thread(msg_tx, running.clone());

    println!("storyreel dashboard — service at {}", api.base_url);
    render::print_help();

    let mut state = AppState::new(api.base_url.clone());
    while running.load(Ordering::Relaxed) {
        match msg_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(msg) => {
                let current = std::mem::take(&mut state);
                let (next, effects) = update(current, msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    render::render(&state.view());
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    runner.stop();
    Ok(())
}
