//! Stdin command parsing for the dashboard loop.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use storyreel_core::{GenerationMode, JobId, Msg};

use super::render;

/// One parsed line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Core(Msg),
    Help,
    Quit,
    Unknown(String),
}

/// Reads stdin line by line, forwarding core messages to the pump. Clears
/// `running` when the operator quits or stdin closes.
pub fn spawn_input_thread(msg_tx: mpsc::Sender<Msg>, running: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Command::Core(msg) => {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                Command::Help => render::print_help(),
                Command::Quit => break,
                Command::Unknown(word) => {
                    println!("unknown command: {word} (try `help`)");
                }
            }
        }
        running.store(false, Ordering::Relaxed);
    });
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word {
        "text" => Command::Core(Msg::SourceTextChanged(rest.to_string())),
        "pdf" => match rest {
            "" | "off" | "none" => Command::Core(Msg::PdfSelected(None)),
            path => Command::Core(Msg::PdfSelected(Some(path.to_string()))),
        },
        "auto" => match rest {
            "on" => Command::Core(Msg::AutoUploadToggled(true)),
            "off" => Command::Core(Msg::AutoUploadToggled(false)),
            _ => Command::Unknown(line.to_string()),
        },
        "single" => Command::Core(Msg::GenerateClicked(GenerationMode::Single)),
        "multi" => Command::Core(Msg::GenerateClicked(GenerationMode::Multi)),
        "upload" => match rest.parse::<JobId>() {
            Ok(job_id) => Command::Core(Msg::UploadClicked { job_id }),
            Err(_) => Command::Unknown(line.to_string()),
        },
        "refresh" => Command::Core(Msg::RefreshQueueClicked),
        "repost" => Command::Core(Msg::RepostClicked),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(word.to_string()),
    }
}
