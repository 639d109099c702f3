use audiohub_core::{
    render, update, AppState, DownloadTarget, Effect, HoldTicket, MediaKind, Msg, NoticeLevel,
    PresentationPatch, ProgressEvent, RegistryChange, TaskId, TaskStatus, HOLD_WINDOW,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    audiohub_logging::initialize_for_tests();
}

fn target(video_id: &str, title: &str) -> DownloadTarget {
    DownloadTarget {
        url: format!("https://www.youtube.com/watch?v={video_id}"),
        video_id: Some(video_id.to_string()),
        title: Some(title.to_string()),
    }
}

fn progress(id: &str, status: TaskStatus, value: f64) -> Msg {
    Msg::Progress(ProgressEvent::new(TaskId::remote(id), status, value))
}

fn removal_ticket(effects: &[Effect]) -> HoldTicket {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScheduleRemoval { ticket, after, .. } => {
                assert_eq!(*after, HOLD_WINDOW);
                Some(*ticket)
            }
            _ => None,
        })
        .expect("removal scheduled")
}

#[test]
fn download_request_seeds_queued_task_and_submits() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::DownloadRequested(target("v1", "Song")));

    let task = state.registry().get(&TaskId::remote("v1")).expect("task");
    assert_eq!(task.status, TaskStatus::Queued);
    assert_eq!(task.progress, 0.0);
    assert_eq!(task.title, "Song");
    assert!(state.consume_dirty());

    assert_eq!(effects.len(), 1);
    let Effect::SubmitDownload { task_id, spec } = &effects[0] else {
        panic!("expected submit, got {effects:?}");
    };
    assert_eq!(task_id, &TaskId::remote("v1"));
    assert_eq!(spec.video_id.as_deref(), Some("v1"));
    assert_eq!(spec.kind, MediaKind::Audio);
    assert!(!spec.is_playlist);
}

#[test]
fn repeated_click_does_not_resubmit() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DownloadRequested(target("v1", "Song")));
    let (state, effects) = update(state, Msg::DownloadRequested(target("v1", "Song")));

    assert!(effects.is_empty());
    assert_eq!(state.registry().len(), 1);
}

#[test]
fn target_without_id_gets_distinct_local_keys() {
    init_logging();
    let raw = DownloadTarget {
        url: "https://example.com/a.mp3".to_string(),
        video_id: None,
        title: None,
    };
    let (state, first) = update(AppState::new(), Msg::DownloadRequested(raw.clone()));
    let (state, second) = update(state, Msg::DownloadRequested(raw));

    assert_eq!(state.registry().len(), 2);
    let ids: Vec<_> = [first, second]
        .iter()
        .map(|effects| match &effects[0] {
            Effect::SubmitDownload { task_id, .. } => task_id.clone(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert!(ids.iter().all(TaskId::is_local));
    assert_ne!(ids[0], ids[1]);
    assert_eq!(state.registry().tasks()[0].title, "Processing...");
}

#[test]
fn rejected_submission_removes_task_and_notifies() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DownloadRequested(target("v1", "Song")));
    let (state, effects) = update(
        state,
        Msg::DownloadSubmitted {
            task_id: TaskId::remote("v1"),
            result: Err("Please provide a YouTube URL".to_string()),
        },
    );

    assert!(state.registry().is_empty());
    assert_eq!(
        effects,
        vec![Effect::Notify {
            level: NoticeLevel::Error,
            message: "Please provide a YouTube URL".to_string(),
        }]
    );
}

#[test]
fn acceptance_after_early_progress_keeps_progress() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DownloadRequested(target("v1", "Song")));
    let (state, _) = update(state, progress("v1", TaskStatus::Downloading, 20.0));
    let (state, effects) = update(
        state,
        Msg::DownloadSubmitted {
            task_id: TaskId::remote("v1"),
            result: Ok("a1b2c3d4".to_string()),
        },
    );

    let task = state.registry().get(&TaskId::remote("v1")).unwrap();
    assert_eq!(task.status, TaskStatus::Downloading);
    assert_eq!(task.progress, 20.0);
    assert_eq!(
        effects,
        vec![Effect::Notify {
            level: NoticeLevel::Info,
            message: "Video download started (MP3)".to_string(),
        }]
    );
}

#[test]
fn end_to_end_progress_to_removal() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DownloadRequested(target("v1", "Song")));
    let (state, _) = update(
        state,
        Msg::DownloadSubmitted {
            task_id: TaskId::remote("v1"),
            result: Ok("v1".to_string()),
        },
    );
    let id = TaskId::remote("v1");
    assert_eq!(state.registry().get(&id).unwrap().status, TaskStatus::Queued);

    let (state, effects) = update(state, progress("v1", TaskStatus::Downloading, 55.0));
    assert!(effects.is_empty());
    let task = state.registry().get(&id).unwrap();
    assert_eq!((task.status, task.progress), (TaskStatus::Downloading, 55.0));

    let (state, effects) = update(state, progress("v1", TaskStatus::Completed, 100.0));
    let task = state.registry().get(&id).unwrap();
    assert_eq!((task.status, task.progress), (TaskStatus::Completed, 100.0));
    assert!(effects.contains(&Effect::ListFiles));
    assert!(effects.contains(&Effect::Notify {
        level: NoticeLevel::Success,
        message: "Download complete: \"Song\"".to_string(),
    }));
    let ticket = removal_ticket(&effects);

    let (state, _) = update(state, Msg::HoldElapsed { task_id: id.clone(), ticket });
    assert!(state.registry().is_empty());
}

#[test]
fn error_frame_notifies_with_server_message() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DownloadRequested(target("v1", "Song")));
    let mut event = ProgressEvent::new(TaskId::remote("v1"), TaskStatus::Error, 0.0);
    event.error = Some("Video unavailable".to_string());
    let (state, effects) = update(state, Msg::Progress(event));

    assert!(effects.contains(&Effect::Notify {
        level: NoticeLevel::Error,
        message: "Error: Video unavailable".to_string(),
    }));
    removal_ticket(&effects);
    let task = state.registry().get(&TaskId::remote("v1")).unwrap();
    assert_eq!(task.error_message.as_deref(), Some("Video unavailable"));
}

#[test]
fn progress_for_unknown_task_is_silent() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), progress("ghost", TaskStatus::Downloading, 50.0));

    assert!(effects.is_empty());
    assert!(state.registry().is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn frames_after_terminal_state_are_ignored() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DownloadRequested(target("v1", "Song")));
    let (state, _) = update(state, progress("v1", TaskStatus::Completed, 100.0));
    let mut state = state;
    state.drain_changes();

    let (mut state, effects) = update(state, progress("v1", TaskStatus::Downloading, 10.0));
    assert!(effects.is_empty());
    assert!(state.drain_changes().is_empty());
}

#[test]
fn registry_changes_project_onto_patches() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::DownloadRequested(target("v1", "Song")));
    let (mut state, _) = update(state, progress("v1", TaskStatus::Downloading, 42.0));

    let changes = state.drain_changes();
    assert_eq!(changes.len(), 2);
    let RegistryChange::Upserted(latest) = &changes[1] else {
        panic!("expected upsert");
    };
    let PresentationPatch::Upsert(patch) = render(latest) else {
        panic!("expected upsert patch");
    };
    assert_eq!(patch.button_label, "42%");
}

#[test]
fn selected_options_flow_into_submission() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::FormatSelected(MediaKind::Video));
    let (state, _) = update(state, Msg::PlaylistToggled(true));
    let (state, _) = update(state, Msg::VideoQualitySelected(audiohub_core::Quality::Best));
    let (state, effects) = update(state, Msg::DownloadRequested(target("PL1", "Mix")));

    let Effect::SubmitDownload { spec, .. } = &effects[0] else {
        panic!("expected submit");
    };
    assert_eq!(spec.kind, MediaKind::Video);
    assert!(spec.is_playlist);
    assert_eq!(spec.video_quality, audiohub_core::Quality::Best);
    assert_eq!(state.registry().tasks()[0].kind, MediaKind::Video);

    let (_, effects) = update(
        state,
        Msg::DownloadSubmitted {
            task_id: TaskId::remote("PL1"),
            result: Ok("x".to_string()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Notify {
            level: NoticeLevel::Info,
            message: "Playlist download started (MP4)".to_string(),
        }]
    );
}
