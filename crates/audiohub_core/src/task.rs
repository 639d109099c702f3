use std::fmt;

use serde::{Deserialize, Serialize};

const LOCAL_PREFIX: &str = "local:";

/// Key a download is tracked under.
///
/// Provider media ids never contain `:`, so locally generated keys (prefixed
/// with `local:`) cannot collide with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn remote(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn local(seq: u64) -> Self {
        Self(format!("{LOCAL_PREFIX}{seq}"))
    }

    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[serde(alias = "waiting")]
    Queued,
    Downloading,
    Converting,
    Completed,
    Error,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Audio,
    Video,
}

impl MediaKind {
    /// Container label shown to the user.
    pub fn format_label(self) -> &'static str {
        match self {
            MediaKind::Audio => "MP3",
            MediaKind::Video => "MP4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    #[default]
    High,
    Best,
}

impl Quality {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Quality::Low),
            "medium" => Some(Quality::Medium),
            "high" => Some(Quality::High),
            "best" => Some(Quality::Best),
            _ => None,
        }
    }
}

/// One tracked background job, from submission to removal after its hold.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadTask {
    pub id: TaskId,
    pub title: String,
    pub kind: MediaKind,
    pub status: TaskStatus,
    /// Always within `0.0..=100.0`.
    pub progress: f64,
    pub error_message: Option<String>,
}

impl DownloadTask {
    pub fn queued(id: TaskId, title: impl Into<String>, kind: MediaKind) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            status: TaskStatus::Queued,
            progress: 0.0,
            error_message: None,
        }
    }
}

/// Server-reported progress for a task, already validated at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub id: TaskId,
    pub title: Option<String>,
    pub status: TaskStatus,
    pub progress: f64,
    pub filename: Option<String>,
    pub error: Option<String>,
    pub speed: Option<String>,
    pub eta: Option<String>,
}

impl ProgressEvent {
    pub fn new(id: TaskId, status: TaskStatus, progress: f64) -> Self {
        Self {
            id,
            title: None,
            status,
            progress,
            filename: None,
            error: None,
            speed: None,
            eta: None,
        }
    }
}

/// User-selected options applied to the next submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DownloadOptions {
    pub kind: MediaKind,
    pub playlist: bool,
    pub audio_quality: Quality,
    pub video_quality: Quality,
}

/// What the user asked to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub video_id: Option<String>,
    pub title: Option<String>,
}

impl From<&crate::SearchResult> for DownloadTarget {
    fn from(result: &crate::SearchResult) -> Self {
        Self {
            url: result.url.clone(),
            video_id: Some(result.video_id.clone()),
            title: Some(result.title.clone()),
        }
    }
}

/// Body of a submit-download call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadSpec {
    pub url: String,
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub kind: MediaKind,
    pub is_playlist: bool,
    pub audio_quality: Quality,
    pub video_quality: Quality,
}

impl DownloadSpec {
    pub fn new(target: DownloadTarget, options: DownloadOptions) -> Self {
        Self {
            url: target.url,
            video_id: target.video_id,
            title: target.title,
            kind: options.kind,
            is_playlist: options.playlist,
            audio_quality: options.audio_quality,
            video_quality: options.video_quality,
        }
    }
}
