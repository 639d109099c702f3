use serde::{Deserialize, Serialize};

/// A search hit as returned by the backend. Read-only to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub video_id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub views: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Audio,
    Video,
    Playlist,
}

/// A completed file available on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// Human readable, e.g. `"3.52 MB"`.
    pub size: String,
    pub created: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_entry_reads_type_field() {
        let entry: FileEntry = serde_json::from_str(
            r#"{"name":"mix","size":"12.0 MB","created":"2024-05-01 10:00:00",
                "type":"playlist","download_url":"/download/mix"}"#,
        )
        .unwrap();
        assert_eq!(entry.kind, FileKind::Playlist);
    }

    #[test]
    fn search_result_optional_fields_may_be_absent() {
        let result: SearchResult = serde_json::from_str(
            r#"{"video_id":"v1","title":"Song","url":"https://youtu.be/v1"}"#,
        )
        .unwrap();
        assert_eq!(result.channel, None);
        assert_eq!(result.thumbnail, None);
    }
}
