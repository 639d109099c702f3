use crate::{
    AppState, DownloadSpec, DownloadTarget, Effect, FileKind, Msg, NoticeLevel, ProgressEvent,
    ProgressOutcome, TaskStatus,
};

const UNTITLED: &str = "Processing...";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchInputChanged(raw) => {
            let min_chars = state.settings().min_suggestion_chars;
            let had_suggestions = !state.suggestions.shown().is_empty();
            state.input = raw;
            let scheduled = state.suggestions.input_changed(&state.input, min_chars);
            if had_suggestions || scheduled.is_none() {
                state.mark_dirty();
            }
            match scheduled {
                Some(generation) => vec![Effect::ScheduleSuggestions {
                    generation,
                    after: state.settings().debounce_window,
                }],
                None => Vec::new(),
            }
        }
        Msg::SuggestionKey(key) => {
            if let Some(value) = state.suggestions.navigate(key).map(ToOwned::to_owned) {
                state.input = value;
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::SuggestionPicked(index) => match state.suggestions.shown().get(index).cloned() {
            Some(value) => {
                state.input = value;
                submit_search(&mut state)
            }
            None => Vec::new(),
        },
        Msg::SuggestionTimerElapsed { generation } => {
            match state.suggestions.timer_elapsed(generation) {
                Some(query) => vec![Effect::FetchSuggestions { generation, query }],
                None => Vec::new(),
            }
        }
        Msg::SuggestionsLoaded { generation, result } => {
            // A failed lookup simply leaves the list as it was.
            if let Ok(suggestions) = result {
                if state.suggestions.loaded(generation, suggestions) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::SearchSubmitted => submit_search(&mut state),
        Msg::SearchCompleted(result) => {
            state.searching = false;
            state.mark_dirty();
            match result {
                Ok(results) if !results.is_empty() => {
                    let message = format!("{} videos found", results.len());
                    state.results = results;
                    vec![notify(NoticeLevel::Success, message)]
                }
                Ok(_) => {
                    state.results.clear();
                    vec![notify(NoticeLevel::Error, "No videos found")]
                }
                Err(message) => {
                    state.results.clear();
                    vec![notify(NoticeLevel::Error, message)]
                }
            }
        }
        Msg::FormatSelected(kind) => {
            state.options.kind = kind;
            state.mark_dirty();
            Vec::new()
        }
        Msg::PlaylistToggled(playlist) => {
            state.options.playlist = playlist;
            state.mark_dirty();
            Vec::new()
        }
        Msg::AudioQualitySelected(quality) => {
            state.options.audio_quality = quality;
            state.mark_dirty();
            Vec::new()
        }
        Msg::VideoQualitySelected(quality) => {
            state.options.video_quality = quality;
            state.mark_dirty();
            Vec::new()
        }
        Msg::DownloadRequested(target) => request_download(&mut state, target),
        Msg::DownloadSubmitted { task_id, result } => match result {
            Ok(_server_ref) => {
                // The task was seeded as Queued before the call went out; frames
                // that raced ahead of this reply have already been applied.
                let mode = if state.options.playlist {
                    "Playlist"
                } else {
                    "Video"
                };
                let format = state
                    .registry
                    .get(&task_id)
                    .map_or(state.options.kind, |task| task.kind)
                    .format_label();
                vec![notify(
                    NoticeLevel::Info,
                    format!("{mode} download started ({format})"),
                )]
            }
            Err(message) => {
                if state.registry.remove(&task_id) {
                    state.mark_dirty();
                }
                vec![notify(NoticeLevel::Error, message)]
            }
        },
        Msg::Progress(event) => apply_progress(&mut state, event),
        Msg::HoldElapsed { task_id, ticket } => {
            if state.registry.expire(&task_id, ticket) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ConnectionChanged(connection) => {
            if state.connection != connection {
                state.connection = connection;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FilesRequested => vec![Effect::ListFiles],
        Msg::FilesLoaded(result) => match result {
            Ok(files) => {
                state.files = files;
                state.mark_dirty();
                Vec::new()
            }
            // The listing shown so far stays in place.
            Err(message) => vec![notify(NoticeLevel::Error, message)],
        },
        Msg::DeleteFileRequested(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                Vec::new()
            } else {
                vec![Effect::DeleteFile { name }]
            }
        }
        Msg::FileDeleted { name, result } => match result {
            Ok(()) => {
                state.files.retain(|file| file.name != name);
                state.mark_dirty();
                vec![
                    notify(NoticeLevel::Success, format!("Deleted \"{name}\"")),
                    Effect::ListFiles,
                ]
            }
            Err(message) => vec![notify(NoticeLevel::Error, message)],
        },
        Msg::PlayFileRequested(name) => {
            let playable = state
                .files
                .iter()
                .find(|file| file.name == name && file.kind == FileKind::Audio);
            match playable {
                Some(file) => vec![Effect::PlayAudio {
                    name: file.name.clone(),
                    download_url: file.download_url.clone(),
                }],
                None => vec![notify(
                    NoticeLevel::Error,
                    format!("No audio file named \"{name}\""),
                )],
            }
        }
        Msg::PreviewRequested(index) => match state.results.get(index) {
            Some(result) => vec![Effect::OpenPreview {
                video_id: result.video_id.clone(),
                url: result.url.clone(),
                title: result.title.clone(),
            }],
            None => Vec::new(),
        },
    };

    (state, effects)
}

fn submit_search(state: &mut AppState) -> Vec<Effect> {
    let query = state.input.trim().to_string();
    if query.is_empty() {
        return vec![notify(NoticeLevel::Error, "Enter a search term or URL")];
    }
    state.suggestions.cancel();
    state.searching = true;
    state.results.clear();
    state.mark_dirty();
    vec![Effect::Search {
        query,
        max_results: state.settings().max_results,
    }]
}

fn request_download(state: &mut AppState, target: DownloadTarget) -> Vec<Effect> {
    let url = target.url.trim();
    if url.is_empty() {
        return vec![notify(NoticeLevel::Error, "Provide a URL to download")];
    }

    let task_id = match target.video_id.as_deref().map(str::trim) {
        Some(video_id) if !video_id.is_empty() => crate::TaskId::remote(video_id),
        _ => state.registry.allocate_local_id(),
    };
    let title = target
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED)
        .to_string();

    // Already tracked: the button is busy or showing its terminal state.
    if !state
        .registry
        .create(task_id.clone(), title, state.options.kind)
    {
        return Vec::new();
    }
    state.mark_dirty();

    let spec = DownloadSpec::new(
        DownloadTarget {
            url: url.to_string(),
            ..target
        },
        state.options,
    );
    vec![Effect::SubmitDownload { task_id, spec }]
}

fn apply_progress(state: &mut AppState, event: ProgressEvent) -> Vec<Effect> {
    let outcome = state.registry.apply_progress(&event);
    let ticket = match outcome {
        ProgressOutcome::Ignored => return Vec::new(),
        ProgressOutcome::Updated => {
            state.mark_dirty();
            return Vec::new();
        }
        ProgressOutcome::Terminal(ticket) => ticket,
    };
    state.mark_dirty();

    let title = state
        .registry
        .get(&event.id)
        .map(|task| task.title.clone())
        .unwrap_or_default();
    let mut effects = Vec::with_capacity(3);
    match event.status {
        TaskStatus::Completed => {
            effects.push(notify(
                NoticeLevel::Success,
                format!("Download complete: \"{title}\""),
            ));
            effects.push(Effect::ListFiles);
        }
        _ => {
            let reason = event
                .error
                .as_deref()
                .filter(|message| !message.is_empty())
                .unwrap_or("download failed");
            effects.push(notify(NoticeLevel::Error, format!("Error: {reason}")));
        }
    }
    effects.push(Effect::ScheduleRemoval {
        task_id: event.id,
        ticket,
        after: state.settings().hold_window,
    });
    effects
}

fn notify(level: NoticeLevel, message: impl Into<String>) -> Effect {
    Effect::Notify {
        level,
        message: message.into(),
    }
}
