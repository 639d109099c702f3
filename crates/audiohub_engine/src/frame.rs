use audiohub_core::{ProgressEvent, TaskId, TaskStatus};
use serde::Deserialize;
use thiserror::Error;

use crate::PushEvent;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("progress frame without video_id")]
    MissingId,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ProgressFrame {
    video_id: String,
    title: Option<String>,
    status: TaskStatus,
    #[serde(default)]
    progress: f64,
    filename: Option<String>,
    error: Option<String>,
    speed: Option<String>,
    eta: Option<String>,
}

/// Decodes one inbound text frame.
///
/// `Ok(None)` means a well-formed frame of a type this client does not handle.
pub fn decode_frame(text: &str) -> Result<Option<PushEvent>, FrameError> {
    let raw: RawFrame = serde_json::from_str(text)?;
    match raw.kind.as_str() {
        "progress" => {
            let frame: ProgressFrame = serde_json::from_value(raw.data)?;
            if frame.video_id.trim().is_empty() {
                return Err(FrameError::MissingId);
            }
            Ok(Some(PushEvent::Progress(ProgressEvent {
                id: TaskId::remote(frame.video_id),
                title: frame.title,
                status: frame.status,
                progress: frame.progress,
                filename: frame.filename,
                error: frame.error,
                speed: frame.speed.filter(|s| !s.is_empty()),
                eta: frame.eta.filter(|s| !s.is_empty()),
            })))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(text: &str) -> ProgressEvent {
        match decode_frame(text).unwrap() {
            Some(PushEvent::Progress(event)) => event,
            other => panic!("expected progress, got {other:?}"),
        }
    }

    #[test]
    fn decodes_full_progress_frame() {
        let event = progress(
            r#"{"type":"progress","data":{"video_id":"v1","title":"Song","status":"downloading",
                "progress":55.5,"filename":null,"error":null,"speed":"1.2MiB/s","eta":""}}"#,
        );
        assert_eq!(event.id, TaskId::remote("v1"));
        assert_eq!(event.title.as_deref(), Some("Song"));
        assert_eq!(event.status, TaskStatus::Downloading);
        assert_eq!(event.progress, 55.5);
        assert_eq!(event.speed.as_deref(), Some("1.2MiB/s"));
        assert_eq!(event.eta, None);
    }

    #[test]
    fn waiting_maps_to_queued() {
        let event = progress(r#"{"type":"progress","data":{"video_id":"v1","status":"waiting","progress":0}}"#);
        assert_eq!(event.status, TaskStatus::Queued);
    }

    #[test]
    fn unknown_types_are_skipped() {
        assert!(decode_frame(r#"{"type":"heartbeat","data":{"n":1}}"#).unwrap().is_none());
        assert!(decode_frame(r#"{"type":"stats"}"#).unwrap().is_none());
    }

    #[test]
    fn malformed_frames_are_errors() {
        assert!(matches!(decode_frame("pong"), Err(FrameError::Malformed(_))));
        assert!(matches!(
            decode_frame(r#"{"type":"progress","data":{"video_id":"v1","status":"exploded"}}"#),
            Err(FrameError::Malformed(_))
        ));
        assert!(matches!(
            decode_frame(r#"{"type":"progress","data":{"video_id":"","status":"error"}}"#),
            Err(FrameError::MissingId)
        ));
    }
}
