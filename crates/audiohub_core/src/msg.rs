use crate::{
    ConnectionState, DownloadTarget, FileEntry, HoldTicket, MediaKind, ProgressEvent, Quality,
    SearchResult, SuggestionKey, TaskId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the search box.
    SearchInputChanged(String),
    /// Arrow/escape keys while the search box has focus.
    SuggestionKey(SuggestionKey),
    /// User picked a rendered suggestion by position.
    SuggestionPicked(usize),
    SuggestionTimerElapsed { generation: u64 },
    SuggestionsLoaded {
        generation: u64,
        result: Result<Vec<String>, String>,
    },
    /// User submitted the current search box contents.
    SearchSubmitted,
    SearchCompleted(Result<Vec<SearchResult>, String>),
    FormatSelected(MediaKind),
    PlaylistToggled(bool),
    AudioQualitySelected(Quality),
    VideoQualitySelected(Quality),
    /// User clicked a download button.
    DownloadRequested(DownloadTarget),
    /// The submit-download call answered.
    DownloadSubmitted {
        task_id: TaskId,
        result: Result<String, String>,
    },
    /// Push channel progress report.
    Progress(ProgressEvent),
    /// A terminal hold window ran out.
    HoldElapsed { task_id: TaskId, ticket: HoldTicket },
    ConnectionChanged(ConnectionState),
    FilesRequested,
    FilesLoaded(Result<Vec<FileEntry>, String>),
    DeleteFileRequested(String),
    FileDeleted {
        name: String,
        result: Result<(), String>,
    },
    PlayFileRequested(String),
    /// Open the search result at this position in the video preview.
    PreviewRequested(usize),
}
