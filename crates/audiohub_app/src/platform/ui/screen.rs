//! Presentation state the reconciler's patches are applied to.

use audiohub_core::{idle_label, BarUpdate, ButtonState, MediaKind, PresentationPatch, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub task_id: TaskId,
    pub title: String,
    pub button: ButtonState,
    pub button_label: String,
    pub status_label: String,
    /// Last value written; `BarUpdate::Unchanged` leaves it alone.
    pub bar: f64,
    pub error: Option<String>,
}

/// One progress row per tracked task, in the order they first appeared.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    rows: Vec<Row>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, patch: &PresentationPatch) {
        match patch {
            PresentationPatch::Upsert(patch) => {
                let bar = match patch.bar {
                    BarUpdate::Set(value) => Some(value),
                    BarUpdate::Unchanged => None,
                };
                match self.rows.iter_mut().find(|row| row.task_id == patch.task_id) {
                    Some(row) => {
                        row.title = patch.title.clone();
                        row.button = patch.button;
                        row.button_label = patch.button_label.clone();
                        row.status_label = patch.status_label.clone();
                        row.error = patch.error.clone();
                        if let Some(bar) = bar {
                            row.bar = bar;
                        }
                    }
                    None => self.rows.push(Row {
                        task_id: patch.task_id.clone(),
                        title: patch.title.clone(),
                        button: patch.button,
                        button_label: patch.button_label.clone(),
                        status_label: patch.status_label.clone(),
                        bar: bar.unwrap_or(0.0),
                        error: patch.error.clone(),
                    }),
                }
            }
            PresentationPatch::Remove { task_id, .. } => {
                self.rows.retain(|row| &row.task_id != task_id);
            }
        }
    }

    pub fn row(&self, task_id: &TaskId) -> Option<&Row> {
        self.rows.iter().find(|row| &row.task_id == task_id)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Label of the download button for `task_id`: the row's label while the
    /// task is tracked, the idle label for the selected format otherwise.
    pub fn button_label(&self, task_id: &TaskId, kind: MediaKind) -> String {
        self.row(task_id)
            .map(|row| row.button_label.clone())
            .unwrap_or_else(|| idle_label(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiohub_core::{render, render_removal, DownloadTask, TaskStatus};

    fn task(status: TaskStatus, progress: f64) -> DownloadTask {
        DownloadTask {
            status,
            progress,
            ..DownloadTask::queued(TaskId::remote("v1"), "Song", MediaKind::Audio)
        }
    }

    #[test]
    fn converting_keeps_last_bar_value() {
        let mut screen = Screen::new();
        screen.apply(&render(&task(TaskStatus::Downloading, 64.0)));
        screen.apply(&render(&task(TaskStatus::Converting, 0.0)));

        let row = screen.row(&TaskId::remote("v1")).unwrap();
        assert_eq!(row.bar, 64.0);
        assert_eq!(row.button_label, "Processing...");
    }

    #[test]
    fn removal_restores_idle_label() {
        let mut screen = Screen::new();
        let done = task(TaskStatus::Completed, 100.0);
        screen.apply(&render(&done));
        assert_eq!(screen.button_label(&done.id, MediaKind::Audio), "Done!");

        screen.apply(&render_removal(&done));
        assert!(screen.rows().is_empty());
        assert_eq!(screen.button_label(&done.id, MediaKind::Video), "Download MP4");
    }
}
