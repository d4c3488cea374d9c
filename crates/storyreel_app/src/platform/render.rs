//! Text rendering of the dashboard view model.

use storyreel_core::{AppViewModel, JobKind, JobRowView, QueueRowView};

pub fn render(view: &AppViewModel) {
    println!();
    if let Some(error) = &view.last_error {
        println!("!! {error}");
    }
    if view.busy {
        println!("-- generating...");
    }
    println!(
        "auto-upload: {}",
        if view.auto_upload { "on" } else { "off" }
    );
    if let Some(url) = &view.single_preview_url {
        println!("latest single clip: {url}");
    }
    if view.jobs.is_empty() {
        println!("jobs: none yet");
    } else {
        println!("jobs ({}):", view.job_count);
        for job in &view.jobs {
            println!("  {}", job_line(job));
        }
    }
    if view.queue.is_empty() {
        println!("server queue: empty");
    } else {
        println!("server queue:");
        for (position, entry) in view.queue.iter().enumerate() {
            println!("  {}", queue_line(position + 1, entry));
        }
    }
}

pub fn print_help() {
    println!("commands:");
    println!("  text <story text>   set the story text");
    println!("  pdf <path> | off    attach or clear a PDF source");
    println!("  auto on|off         toggle auto-upload after generation");
    println!("  single              generate one clip");
    println!("  multi               generate chunked clips");
    println!("  upload <job-id>     upload a generated clip");
    println!("  refresh             refresh the server queue now");
    println!("  repost              repost the top reels");
    println!("  help | quit");
}

fn job_line(job: &JobRowView) -> String {
    let kind = match job.kind {
        JobKind::Single => "single".to_string(),
        JobKind::Chunk { idx } => format!("chunk {idx}"),
    };
    let preview = job.preview_url.as_deref().unwrap_or("-");
    format!(
        "#{} {:<8} {:<14} {}  {preview}",
        job.job_id,
        kind,
        job.status.to_string(),
        job.path
    )
}

fn queue_line(position: usize, entry: &QueueRowView) -> String {
    format!(
        "#{position} {:<10} {}  caption: {}",
        entry.status,
        entry.path,
        entry.caption.as_deref().unwrap_or("-")
    )
}
