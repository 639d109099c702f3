use std::time::Duration;

use crate::{DownloadSpec, HoldTicket, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start (or restart) the debounce timer; feeds back `SuggestionTimerElapsed`.
    ScheduleSuggestions { generation: u64, after: Duration },
    FetchSuggestions { generation: u64, query: String },
    Search { query: String, max_results: usize },
    SubmitDownload { task_id: TaskId, spec: DownloadSpec },
    /// Feeds back `HoldElapsed` once `after` has passed.
    ScheduleRemoval {
        task_id: TaskId,
        ticket: HoldTicket,
        after: Duration,
    },
    ListFiles,
    DeleteFile { name: String },
    /// Play command for the audio preview collaborator.
    PlayAudio { name: String, download_url: String },
    /// Open command for the video preview collaborator.
    OpenPreview {
        video_id: String,
        url: String,
        title: String,
    },
    Notify { level: NoticeLevel, message: String },
}
