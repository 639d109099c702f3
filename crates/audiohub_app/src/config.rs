//! Client configuration: an optional RON file overlaid with command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use audiohub_core::{CoreSettings, DownloadOptions, MediaKind, Quality, DEFAULT_MAX_RESULTS};
use audiohub_engine::{parse_base_url, EndpointError, PushSettings, RECONNECT_DELAY};
use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::platform::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "audiohub.ron";
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid server address: {0}")]
    Server(#[from] EndpointError),
}

/// Terminal client for a media download server.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "audiohub", version, about)]
pub struct Cli {
    /// Configuration file (RON). Defaults to ./audiohub.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Server page origin, e.g. http://127.0.0.1:8000.
    #[arg(long)]
    pub server: Option<String>,
    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub server: String,
    pub max_results: usize,
    pub format: MediaKind,
    pub playlist: bool,
    pub audio_quality: Quality,
    pub video_quality: Quality,
    pub reconnect_delay_ms: u64,
    pub log: LogDestination,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            format: MediaKind::default(),
            playlist: false,
            audio_quality: Quality::default(),
            video_quality: Quality::default(),
            reconnect_delay_ms: RECONNECT_DELAY.as_millis() as u64,
            log: LogDestination::default(),
        }
    }
}

impl ClientConfig {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the file named by `--config` (or the default file) and applies
    /// the remaining flags on top.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
        let mut config = Self::load(&path)?;
        if let Some(server) = &cli.server {
            config.server = server.clone();
        }
        if let Some(log) = cli.log {
            config.log = log;
        }
        config.base_url()?;
        Ok(config)
    }

    pub fn base_url(&self) -> Result<Url, EndpointError> {
        parse_base_url(&self.server)
    }

    pub fn core_settings(&self) -> CoreSettings {
        CoreSettings {
            max_results: self.max_results.max(1),
            ..CoreSettings::default()
        }
    }

    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            kind: self.format,
            playlist: self.playlist,
            audio_quality: self.audio_quality,
            video_quality: self.video_quality,
        }
    }

    pub fn push_settings(&self) -> PushSettings {
        PushSettings {
            reconnect_delay: Duration::from_millis(self.reconnect_delay_ms),
        }
    }
}
