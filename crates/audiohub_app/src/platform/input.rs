//! Line commands typed at the console.

use audiohub_core::{MediaKind, Quality, SuggestionKey};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Key(SuggestionKey),
    /// Zero-based position in the suggestion list.
    Pick(usize),
    Search(Option<String>),
    /// Zero-based position in the result list.
    Get(usize),
    Url(String),
    Format(MediaKind),
    Playlist(bool),
    Quality(MediaKind, Quality),
    Files,
    Remove(String),
    Play(String),
    Preview(usize),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty line")]
    Empty,
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &[&str] = &[
    "type <text>            edit the search box",
    "up | down | esc        move through suggestions",
    "pick <n>               search for suggestion n",
    "search [text]          run a search",
    "get <n>                download search result n",
    "url <link>             download a link",
    "format audio|video     choose MP3 or MP4",
    "playlist on|off        download whole playlists",
    "quality audio|video <low|medium|high|best>",
    "files | rm <name> | play <name>",
    "preview <n>            open search result n",
    "status | help | quit",
];

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(ParseError::Empty),
        // Raw text: surrounding spaces already stripped.
        "type" => Ok(Command::Type(rest.to_string())),
        "up" => Ok(Command::Key(SuggestionKey::Up)),
        "down" => Ok(Command::Key(SuggestionKey::Down)),
        "esc" => Ok(Command::Key(SuggestionKey::Escape)),
        "pick" => position(rest, "pick <n>").map(Command::Pick),
        "search" => Ok(Command::Search((!rest.is_empty()).then(|| rest.to_string()))),
        "get" => position(rest, "get <n>").map(Command::Get),
        "url" => required(rest, "url <link>").map(Command::Url),
        "format" => kind(rest)
            .map(Command::Format)
            .ok_or(ParseError::Usage("format audio|video")),
        "playlist" => match rest.to_ascii_lowercase().as_str() {
            "on" => Ok(Command::Playlist(true)),
            "off" => Ok(Command::Playlist(false)),
            _ => Err(ParseError::Usage("playlist on|off")),
        },
        "quality" => {
            let usage = ParseError::Usage("quality audio|video <low|medium|high|best>");
            let (target, level) = rest.split_once(char::is_whitespace).ok_or(usage.clone())?;
            match (kind(target), Quality::parse(level)) {
                (Some(target), Some(level)) => Ok(Command::Quality(target, level)),
                _ => Err(usage),
            }
        }
        "files" => Ok(Command::Files),
        "rm" => required(rest, "rm <name>").map(Command::Remove),
        "play" => required(rest, "play <name>").map(Command::Play),
        "preview" => position(rest, "preview <n>").map(Command::Preview),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Lists are shown one-based.
fn position(raw: &str, usage: &'static str) -> Result<usize, ParseError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ParseError::Usage(usage)),
    }
}

fn required(raw: &str, usage: &'static str) -> Result<String, ParseError> {
    if raw.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(raw.to_string())
    }
}

fn kind(raw: &str) -> Option<MediaKind> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "audio" | "mp3" => Some(MediaKind::Audio),
        "video" | "mp4" => Some(MediaKind::Video),
        _ => None,
    }
}
