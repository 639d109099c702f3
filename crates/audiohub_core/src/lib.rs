//! AudioHub core: task registry, reconciler projection and the pure update loop.
//!
//! Nothing in here performs IO or reads a clock. Timers are requested as
//! [`Effect`]s and complete by feeding a [`Msg`] back into [`update`].
mod effect;
mod media;
mod msg;
mod reconcile;
mod registry;
mod state;
mod suggest;
mod task;
mod update;
mod view_model;

pub use effect::{Effect, NoticeLevel};
pub use media::{FileEntry, FileKind, SearchResult};
pub use msg::Msg;
pub use reconcile::{
    idle_label, percent_label, render, render_change, render_removal, BarUpdate, ButtonState,
    PresentationPatch, TaskPatch,
};
pub use registry::{HoldTicket, ProgressOutcome, RegistryChange, TaskRegistry};
pub use state::{
    AppState, ConnectionState, CoreSettings, DEBOUNCE_WINDOW, DEFAULT_MAX_RESULTS, HOLD_WINDOW,
    MIN_SUGGESTION_CHARS,
};
pub use suggest::{looks_like_media_url, SuggestionKey, SuggestionState};
pub use task::{
    DownloadOptions, DownloadSpec, DownloadTarget, DownloadTask, MediaKind, ProgressEvent,
    Quality, TaskId, TaskStatus,
};
pub use update::update;
pub use view_model::AppViewModel;
