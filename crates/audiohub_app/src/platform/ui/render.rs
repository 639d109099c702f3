use audiohub_core::{
    AppViewModel, ConnectionState, Effect, FileKind, NoticeLevel, PresentationPatch, TaskId,
};

use super::screen::{Row, Screen};

const BAR_WIDTH: usize = 20;

pub fn patch_line(patch: &PresentationPatch, screen: &Screen) -> String {
    match patch {
        PresentationPatch::Upsert(patch) => match screen.row(&patch.task_id) {
            Some(row) => row_line(row),
            None => format!("[{}] {}", patch.task_id, patch.button_label),
        },
        PresentationPatch::Remove {
            task_id,
            button_label,
        } => format!("[{task_id}] {button_label}"),
    }
}

pub fn row_line(row: &Row) -> String {
    let mut line = format!(
        "[{}] {} {:<14} {}",
        row.task_id,
        bar(row.bar),
        row.button_label,
        row.title
    );
    if let Some(error) = row.error.as_deref().filter(|error| !error.is_empty()) {
        if !row.button_label.contains(error) {
            line.push_str(&format!(" ({error})"));
        }
    }
    line
}

pub fn notice_line(level: NoticeLevel, message: &str) -> String {
    let tag = match level {
        NoticeLevel::Info => "info",
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
    };
    format!("{tag}: {message}")
}

/// Lines for effects the front end handles itself.
pub fn local_effect_line(effect: &Effect) -> Option<String> {
    match effect {
        Effect::Notify { level, message } => Some(notice_line(*level, message)),
        Effect::PlayAudio { name, download_url } => Some(format!("play: {name} <{download_url}>")),
        Effect::OpenPreview {
            video_id,
            url,
            title,
        } => Some(format!("preview: {title} [{video_id}] <{url}>")),
        _ => None,
    }
}

/// Lines describing what changed between two views.
pub fn view_lines(previous: &AppViewModel, next: &AppViewModel, screen: &Screen) -> Vec<String> {
    let mut lines = Vec::new();

    if previous.connection != next.connection {
        lines.push(format!("connection: {}", connection_label(next.connection)));
    }
    if previous.options != next.options {
        lines.push(options_line(next));
    }
    if previous.suggestions != next.suggestions
        || previous.selected_suggestion != next.selected_suggestion
    {
        lines.extend(suggestion_lines(next));
    } else if previous.input != next.input {
        lines.push(format!("input: {}", next.input));
    }
    if !previous.searching && next.searching {
        lines.push("searching...".to_string());
    }
    let labels_stale = previous.options.kind != next.options.kind;
    if previous.results != next.results || labels_stale {
        lines.extend(result_lines(next, screen));
    }
    if previous.files != next.files {
        lines.extend(file_lines(next));
    }
    lines
}

pub fn status_lines(view: &AppViewModel, screen: &Screen) -> Vec<String> {
    let mut lines = vec![
        format!("connection: {}", connection_label(view.connection)),
        options_line(view),
        format!("input: {}", view.input),
    ];
    if screen.rows().is_empty() {
        lines.push("downloads: none".to_string());
    } else {
        lines.push("downloads:".to_string());
        lines.extend(screen.rows().iter().map(|row| format!("  {}", row_line(row))));
    }
    lines.extend(result_lines(view, screen));
    lines.extend(file_lines(view));
    lines
}

fn suggestion_lines(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("input: {}", view.input)];
    for (index, suggestion) in view.suggestions.iter().enumerate() {
        let marker = if view.selected_suggestion == Some(index) {
            '>'
        } else {
            ' '
        };
        lines.push(format!(" {marker}{}. {suggestion}", index + 1));
    }
    lines
}

fn result_lines(view: &AppViewModel, screen: &Screen) -> Vec<String> {
    if view.results.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("results ({}):", view.results.len())];
    for (index, result) in view.results.iter().enumerate() {
        let label = screen.button_label(&TaskId::remote(result.video_id.as_str()), view.options.kind);
        let details: Vec<&str> = [&result.channel, &result.duration, &result.views]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .collect();
        let mut line = format!("  {}. {} [{}]", index + 1, result.title, label);
        if !details.is_empty() {
            line.push_str(&format!(" {}", details.join(" | ")));
        }
        lines.push(line);
    }
    lines
}

fn file_lines(view: &AppViewModel) -> Vec<String> {
    if view.files.is_empty() {
        return vec!["files: none".to_string()];
    }
    let mut lines = vec![format!("files ({}):", view.files.len())];
    lines.extend(view.files.iter().map(|file| {
        let kind = match file.kind {
            FileKind::Audio => "audio",
            FileKind::Video => "video",
            FileKind::Playlist => "playlist",
        };
        format!("  {} ({kind}, {}, {})", file.name, file.size, file.created)
    }));
    lines
}

fn options_line(view: &AppViewModel) -> String {
    let options = &view.options;
    format!(
        "options: {} playlist={} audio={:?} video={:?}",
        options.kind.format_label(),
        if options.playlist { "on" } else { "off" },
        options.audio_quality,
        options.video_quality
    )
}

fn connection_label(state: ConnectionState) -> &'static str {
    match state {
        ConnectionState::Disconnected => "offline",
        ConnectionState::Connecting => "connecting",
        ConnectionState::Connected => "live",
    }
}

fn bar(progress: f64) -> String {
    let filled = ((progress.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
