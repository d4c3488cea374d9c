use storyreel_core::{update, AppState, Effect, GenerationMode, JobStatus, Msg};

const BASE: &str = "http://localhost:8080";

/// One finished single generation: job id 1, path `/out/clip.mp4`.
fn state_with_single_job() -> AppState {
    let state = AppState::new(BASE);
    let (state, _) = update(state, Msg::SourceTextChanged("A story".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked(GenerationMode::Single));
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            mode: GenerationMode::Single,
            caption: "A story".to_string(),
            result: Ok(vec!["/out/clip.mp4".to_string()]),
        },
    );
    state
}

fn job_status(state: &AppState, job_id: u64) -> JobStatus {
    state
        .view()
        .jobs
        .iter()
        .find(|job| job.job_id == job_id)
        .expect("job present")
        .status
}

#[test]
fn manual_upload_walks_the_status_chain() {
    reel_logging::initialize_for_tests();
    let state = state_with_single_job();

    let (state, effects) = update(state, Msg::UploadClicked { job_id: 1 });
    assert_eq!(
        effects,
        vec![Effect::UploadVideo {
            job_id: 1,
            path: "/out/clip.mp4".to_string(),
            caption: "A story".to_string(),
        }]
    );
    // The transition happens when the engine picks the upload up.
    assert_eq!(job_status(&state, 1), JobStatus::Queued);

    let (state, _) = update(
        state,
        Msg::UploadStarted {
            job_id: 1,
            path: "/out/clip.mp4".to_string(),
        },
    );
    assert_eq!(job_status(&state, 1), JobStatus::Uploading);

    let (state, _) = update(
        state,
        Msg::UploadFinished {
            job_id: 1,
            path: "/out/clip.mp4".to_string(),
            result: Ok(()),
        },
    );
    assert_eq!(job_status(&state, 1), JobStatus::Uploaded);
}

#[test]
fn failed_upload_sets_status_and_surfaces_the_message() {
    let state = state_with_single_job();
    let (state, _) = update(
        state,
        Msg::UploadStarted {
            job_id: 1,
            path: "/out/clip.mp4".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            job_id: 1,
            path: "/out/clip.mp4".to_string(),
            result: Err("rate limited".to_string()),
        },
    );

    assert_eq!(job_status(&state, 1), JobStatus::UploadFailed);
    assert_eq!(state.view().last_error.as_deref(), Some("rate limited"));
}

#[test]
fn duplicate_paths_update_together() {
    let state = AppState::new(BASE);
    let (state, _) = update(state, Msg::SourceTextChanged("A story".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked(GenerationMode::Multi));
    let (state, _) = update(
        state,
        Msg::GenerationFinished {
            mode: GenerationMode::Multi,
            caption: "A story".to_string(),
            result: Ok(vec![
                "/out/same.mp4".to_string(),
                "/out/same.mp4".to_string(),
            ]),
        },
    );

    let (state, _) = update(
        state,
        Msg::UploadStarted {
            job_id: 1,
            path: "/out/same.mp4".to_string(),
        },
    );

    assert_eq!(job_status(&state, 1), JobStatus::Uploading);
    assert_eq!(job_status(&state, 2), JobStatus::Uploading);
}

#[test]
fn upload_request_for_unknown_job_is_ignored() {
    let state = state_with_single_job();
    let (_, effects) = update(state, Msg::UploadClicked { job_id: 99 });
    assert!(effects.is_empty());
}

#[test]
fn upload_request_is_ignored_while_uploading() {
    let state = state_with_single_job();
    let (state, _) = update(
        state,
        Msg::UploadStarted {
            job_id: 1,
            path: "/out/clip.mp4".to_string(),
        },
    );
    let (_, effects) = update(state, Msg::UploadClicked { job_id: 1 });
    assert!(effects.is_empty());
}

#[test]
fn reupload_after_failure_is_allowed() {
    let state = state_with_single_job();
    let (state, _) = update(
        state,
        Msg::UploadFinished {
            job_id: 1,
            path: "/out/clip.mp4".to_string(),
            result: Err("rate limited".to_string()),
        },
    );

    let (_, effects) = update(state, Msg::UploadClicked { job_id: 1 });
    assert_eq!(effects.len(), 1);
}

#[test]
fn auto_upload_single_triggers_the_upload_pathway() {
    let state = AppState::new(BASE);
    let (state, _) = update(state, Msg::AutoUploadToggled(true));
    let (state, _) = update(state, Msg::SourceTextChanged("A story".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked(GenerationMode::Single));
    let (_, effects) = update(
        state,
        Msg::GenerationFinished {
            mode: GenerationMode::Single,
            caption: "A story".to_string(),
            result: Ok(vec!["/out/clip.mp4".to_string()]),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::UploadVideo {
            job_id: 1,
            path: "/out/clip.mp4".to_string(),
            caption: "A story".to_string(),
        }]
    );
}

#[test]
fn auto_upload_multi_orders_uploads_by_response_order() {
    let state = AppState::new(BASE);
    let (state, _) = update(state, Msg::AutoUploadToggled(true));
    let (state, _) = update(state, Msg::SourceTextChanged("A story".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked(GenerationMode::Multi));
    let (_, effects) = update(
        state,
        Msg::GenerationFinished {
            mode: GenerationMode::Multi,
            caption: "A story".to_string(),
            result: Ok(vec![
                "/out/a.mp4".to_string(),
                "/out/b.mp4".to_string(),
                "/out/c.mp4".to_string(),
            ]),
        },
    );

    let paths: Vec<_> = effects
        .iter()
        .map(|effect| match effect {
            Effect::UploadVideo { job_id, path, .. } => (*job_id, path.clone()),
            other => panic!("unexpected effect: {other:?}"),
        })
        .collect();
    assert_eq!(
        paths,
        vec![
            (1, "/out/a.mp4".to_string()),
            (2, "/out/b.mp4".to_string()),
            (3, "/out/c.mp4".to_string()),
        ]
    );
}

#[test]
fn auto_upload_is_off_by_default() {
    let state = AppState::new(BASE);
    let (state, _) = update(state, Msg::SourceTextChanged("A story".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked(GenerationMode::Single));
    let (_, effects) = update(
        state,
        Msg::GenerationFinished {
            mode: GenerationMode::Single,
            caption: "A story".to_string(),
            result: Ok(vec!["/out/clip.mp4".to_string()]),
        },
    );
    assert!(effects.is_empty());
}
