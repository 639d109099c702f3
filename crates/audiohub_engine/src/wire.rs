//! JSON shapes exchanged with the backend.

use audiohub_core::{DownloadSpec, FileEntry, MediaKind, Quality, SearchResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{FailureKind, GatewayError};

#[derive(Debug, Serialize)]
pub(crate) struct SearchBody<'a> {
    pub query: &'a str,
    pub max_results: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitBody<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    pub download_type: MediaKind,
    pub is_playlist: bool,
    pub audio_quality: Quality,
    pub video_quality: Quality,
}

impl<'a> From<&'a DownloadSpec> for SubmitBody<'a> {
    fn from(spec: &'a DownloadSpec) -> Self {
        Self {
            url: &spec.url,
            video_id: spec.video_id.as_deref(),
            title: spec.title.as_deref(),
            download_type: spec.kind,
            is_playlist: spec.is_playlist,
            audio_quality: spec.audio_quality,
            video_quality: spec.video_quality,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteBody<'a> {
    pub filename: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchReply {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitReply {
    pub task_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FilesReply {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteReply {
    #[serde(default)]
    pub success: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestReply {
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Reply<T> {
    Rejected { error: String },
    Accepted(T),
}

/// Maps a response body to the typed reply or to a [`GatewayError`].
pub(crate) fn decode_reply<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, GatewayError> {
    let success = (200..300).contains(&status);
    match serde_json::from_str::<Reply<T>>(body) {
        Ok(Reply::Rejected { error }) => Err(GatewayError::new(FailureKind::Rejected, error)),
        Ok(Reply::Accepted(reply)) if success => Ok(reply),
        Err(err) if success => Err(GatewayError::new(
            FailureKind::Decode,
            format!("unexpected response: {err}"),
        )),
        _ => Err(GatewayError::new(
            FailureKind::HttpStatus(status),
            format!("server responded with status {status}"),
        )),
    }
}
