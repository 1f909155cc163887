/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_site")]
    pub site: SiteSettings,

    #[serde(default = "default_transcoding")]
    pub transcoding: TranscodingSettings,

    #[serde(default = "default_skill")]
    pub skill: SkillSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Episode bucket
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Directory holding the episode objects
    #[serde(default = "default_bucket_path")]
    pub bucket_path: PathBuf,

    /// Public prefix the platform streams episodes from
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

/// Upstream website (weekly question, search, podcast feed)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteSettings {
    #[serde(default = "default_site_base_url")]
    pub base_url: String,

    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Fixed output profile for ingested episodes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranscodingSettings {
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    #[serde(default = "default_channels")]
    pub channels: u8,

    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// FFmpeg bitrate notation, e.g. `48k`
    #[serde(default = "default_bitrate")]
    pub bitrate: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SkillSettings {
    #[serde(default = "default_card_title")]
    pub card_title: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` when given, otherwise `config.toml` in the working
    /// directory if present. `SPEAKCA_` environment variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with SPEAKCA_)
        settings = settings.add_source(
            config::Environment::with_prefix("SPEAKCA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("storage.public_base_url", &self.storage.public_base_url),
            ("site.base_url", &self.site.base_url),
            ("site.feed_url", &self.site.feed_url),
        ] {
            let url = Url::parse(value)
                .map_err(|e| ServerError::Config(format!("{name} is not a valid URL: {e}")))?;
            if url.cannot_be_a_base() {
                return Err(ServerError::Config(format!(
                    "{name} must be an http(s) URL, got {value}"
                )));
            }
        }

        if self.transcoding.channels == 0 || self.transcoding.sample_rate == 0 {
            return Err(ServerError::Config(
                "Transcoding channels and sample rate must be non-zero".to_string(),
            ));
        }

        if self.site.timeout_secs == 0 {
            return Err(ServerError::Config(
                "site.timeout_secs must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        bucket_path: default_bucket_path(),
        public_base_url: default_public_base_url(),
    }
}

fn default_bucket_path() -> PathBuf {
    PathBuf::from("./data/episodes")
}

fn default_public_base_url() -> String {
    "http://localhost:5000/episodes".to_string()
}

fn default_site() -> SiteSettings {
    SiteSettings {
        base_url: default_site_base_url(),
        feed_url: default_feed_url(),
        timeout_secs: default_timeout_secs(),
    }
}

fn default_site_base_url() -> String {
    "https://speakca.net/".to_string()
}

fn default_feed_url() -> String {
    "https://speakca.net/feed/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_transcoding() -> TranscodingSettings {
    TranscodingSettings {
        ffmpeg_path: default_ffmpeg_path(),
        channels: default_channels(),
        sample_rate: default_sample_rate(),
        bitrate: default_bitrate(),
    }
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("/usr/bin/ffmpeg")
}

fn default_channels() -> u8 {
    2
}

fn default_sample_rate() -> u32 {
    16_000
}

fn default_bitrate() -> String {
    "48k".to_string()
}

fn default_skill() -> SkillSettings {
    SkillSettings {
        card_title: default_card_title(),
    }
}

fn default_card_title() -> String {
    "California Speaks".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            site: default_site(),
            transcoding: default_transcoding(),
            skill: default_skill(),
        }
    }
}
