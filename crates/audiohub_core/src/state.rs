use std::time::Duration;

use crate::view_model::AppViewModel;
use crate::{
    DownloadOptions, FileEntry, RegistryChange, SearchResult, SuggestionState, TaskRegistry,
};

/// How long a `Completed`/`Error` task stays visible before removal.
pub const HOLD_WINDOW: Duration = Duration::from_millis(5000);
/// Quiescence required before a suggestion call is issued.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);
pub const MIN_SUGGESTION_CHARS: usize = 2;
pub const DEFAULT_MAX_RESULTS: usize = 15;

/// State of the push channel, mirrored here for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreSettings {
    pub hold_window: Duration,
    pub debounce_window: Duration,
    pub min_suggestion_chars: usize,
    pub max_results: usize,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            hold_window: HOLD_WINDOW,
            debounce_window: DEBOUNCE_WINDOW,
            min_suggestion_chars: MIN_SUGGESTION_CHARS,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    settings: CoreSettings,
    pub(crate) registry: TaskRegistry,
    pub(crate) suggestions: SuggestionState,
    pub(crate) input: String,
    pub(crate) searching: bool,
    pub(crate) results: Vec<SearchResult>,
    pub(crate) files: Vec<FileEntry>,
    pub(crate) options: DownloadOptions,
    pub(crate) connection: ConnectionState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CoreSettings, options: DownloadOptions) -> Self {
        Self {
            settings,
            options,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &CoreSettings {
        &self.settings
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            connection: self.connection,
            input: self.input.clone(),
            suggestions: self.suggestions.shown().to_vec(),
            selected_suggestion: self.suggestions.selected(),
            searching: self.searching,
            results: self.results.clone(),
            files: self.files.clone(),
            tasks: self.registry.tasks().into_iter().cloned().collect(),
            options: self.options,
            dirty: self.dirty,
        }
    }

    /// Registry mutations since the last call, for the reconciler.
    pub fn drain_changes(&mut self) -> Vec<RegistryChange> {
        self.registry.drain_changes()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
