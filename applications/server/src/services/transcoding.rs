/// Transcoding service - FFmpeg wrapper for the fixed episode profile
use crate::{
    config::TranscodingSettings,
    error::{Result, ServerError},
};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Output audio profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioProfile {
    pub channels: u8,
    pub sample_rate: u32,
    pub bitrate: String,
}

impl Default for AudioProfile {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 16_000,
            bitrate: "48k".to_string(),
        }
    }
}

impl From<&TranscodingSettings> for AudioProfile {
    fn from(settings: &TranscodingSettings) -> Self {
        Self {
            channels: settings.channels,
            sample_rate: settings.sample_rate,
            bitrate: settings.bitrate.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TranscodingService {
    ffmpeg_path: PathBuf,
    profile: AudioProfile,
}

impl TranscodingService {
    pub fn new(ffmpeg_path: PathBuf, profile: AudioProfile) -> Self {
        Self {
            ffmpeg_path,
            profile,
        }
    }

    pub fn from_settings(settings: &TranscodingSettings) -> Self {
        Self::new(settings.ffmpeg_path.clone(), AudioProfile::from(settings))
    }

    pub fn profile(&self) -> &AudioProfile {
        &self.profile
    }

    /// FFmpeg arguments for converting `input` into an MP3 at `output`
    pub fn arguments(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            input.display().to_string(),
            "-y".to_string(),
            "-vn".to_string(),
            "-ac".to_string(),
            self.profile.channels.to_string(),
            "-ar".to_string(),
            self.profile.sample_rate.to_string(),
            "-b:a".to_string(),
            self.profile.bitrate.clone(),
            "-f".to_string(),
            "mp3".to_string(),
            output.display().to_string(),
        ]
    }

    /// Transcode an episode to the profile
    ///
    /// The output carries the input's modification time, which the catalog
    /// uses as publish order.
    pub async fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.ffmpeg_path);
        cmd.args(self.arguments(input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(input = ?input, output = ?output, "Running FFmpeg");
        let output_result = cmd.output().await.map_err(|e| {
            ServerError::Transcoding(format!(
                "Failed to run FFmpeg at {:?}: {}",
                self.ffmpeg_path, e
            ))
        })?;

        if !output_result.status.success() {
            let stderr = String::from_utf8_lossy(&output_result.stderr);
            return Err(ServerError::Transcoding(format!(
                "FFmpeg failed: {}",
                stderr
            )));
        }

        copy_modified_time(input, output).await
    }
}

/// Give `to` the modification time of `from`
pub async fn copy_modified_time(from: &Path, to: &Path) -> Result<()> {
    let modified = tokio::fs::metadata(from).await?.modified()?;
    set_modified_time(to, modified).await
}

/// Set the modification time of an existing file
pub async fn set_modified_time(path: &Path, modified: std::time::SystemTime) -> Result<()> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        std::fs::OpenOptions::new()
            .write(true)
            .open(&path)?
            .set_modified(modified)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Set modified task failed: {}", e)))??;
    Ok(())
}
