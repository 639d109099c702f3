use crate::{ConnectionState, DownloadOptions, DownloadTask, FileEntry, SearchResult};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub connection: ConnectionState,
    pub input: String,
    pub suggestions: Vec<String>,
    pub selected_suggestion: Option<usize>,
    pub searching: bool,
    pub results: Vec<SearchResult>,
    pub files: Vec<FileEntry>,
    /// Tracked downloads in submission order.
    pub tasks: Vec<DownloadTask>,
    pub options: DownloadOptions,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn task(&self, id: &crate::TaskId) -> Option<&DownloadTask> {
        self.tasks.iter().find(|task| &task.id == id)
    }
}
