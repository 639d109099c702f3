//! Projection of a task snapshot onto its download button and progress row.

use crate::{DownloadTask, MediaKind, RegistryChange, TaskId, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Busy,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarUpdate {
    Set(f64),
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskPatch {
    pub task_id: TaskId,
    pub title: String,
    pub button: ButtonState,
    pub button_label: String,
    pub status_label: String,
    pub bar: BarUpdate,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresentationPatch {
    Upsert(TaskPatch),
    /// Drop the progress row and put the button back to its idle label.
    Remove { task_id: TaskId, button_label: String },
}

impl PresentationPatch {
    pub fn task_id(&self) -> &TaskId {
        match self {
            PresentationPatch::Upsert(patch) => &patch.task_id,
            PresentationPatch::Remove { task_id, .. } => task_id,
        }
    }
}

pub fn idle_label(kind: MediaKind) -> String {
    format!("Download {}", kind.format_label())
}

pub fn percent_label(progress: f64) -> String {
    format!("{}%", progress.round() as i64)
}

/// Pure: equal snapshots always give equal patches.
pub fn render(task: &DownloadTask) -> PresentationPatch {
    let (button, button_label, status_label, bar) = match task.status {
        TaskStatus::Queued => (
            ButtonState::Busy,
            format!("Queued ({})...", task.kind.format_label()),
            "Queued".to_string(),
            BarUpdate::Set(0.0),
        ),
        TaskStatus::Downloading => {
            let percent = percent_label(task.progress);
            (
                ButtonState::Busy,
                percent.clone(),
                percent,
                BarUpdate::Set(task.progress),
            )
        }
        TaskStatus::Converting => (
            ButtonState::Busy,
            "Processing...".to_string(),
            "Processing...".to_string(),
            BarUpdate::Unchanged,
        ),
        TaskStatus::Completed => (
            ButtonState::Completed,
            "Done!".to_string(),
            "Done".to_string(),
            BarUpdate::Set(100.0),
        ),
        TaskStatus::Error => (
            ButtonState::Failed,
            match task.error_message.as_deref() {
                Some(message) if !message.is_empty() => format!("Error: {message}"),
                _ => "Error".to_string(),
            },
            "Error".to_string(),
            BarUpdate::Unchanged,
        ),
    };

    PresentationPatch::Upsert(TaskPatch {
        task_id: task.id.clone(),
        title: task.title.clone(),
        button,
        button_label,
        status_label,
        bar,
        error: task.error_message.clone(),
    })
}

pub fn render_removal(task: &DownloadTask) -> PresentationPatch {
    PresentationPatch::Remove {
        task_id: task.id.clone(),
        button_label: idle_label(task.kind),
    }
}

pub fn render_change(change: &RegistryChange) -> PresentationPatch {
    match change {
        RegistryChange::Upserted(task) => render(task),
        RegistryChange::Removed(task) => render_removal(task),
    }
}
