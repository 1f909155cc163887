/// Episode catalog - the storage bucket the skill plays from
use crate::{
    error::{Result, ServerError},
    services::transcoding::copy_modified_time,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use speakca_playback::Episode;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

/// Directory inside the bucket holding per-object metadata
const METADATA_DIR: &str = ".metadata";

/// Metadata stored alongside an episode object
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ObjectMetadata {
    /// Canonical link of the episode on the website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One object in the bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: String,
    pub episode: Episode,
    pub last_modified: DateTime<Utc>,
    pub metadata: ObjectMetadata,
}

#[derive(Debug, Clone)]
pub struct EpisodeCatalog {
    bucket_path: PathBuf,
    public_base_url: Url,
}

impl EpisodeCatalog {
    pub fn new(bucket_path: PathBuf, public_base_url: &str) -> Result<Self> {
        let public_base_url = Url::parse(public_base_url)
            .map_err(|e| ServerError::Config(format!("Invalid public base URL: {}", e)))?;
        if public_base_url.cannot_be_a_base() {
            return Err(ServerError::Config(format!(
                "Public base URL cannot hold object keys: {}",
                public_base_url
            )));
        }

        Ok(Self {
            bucket_path,
            public_base_url,
        })
    }

    pub fn bucket_path(&self) -> &Path {
        &self.bucket_path
    }

    /// Initialize bucket directories
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(self.bucket_path.join(METADATA_DIR)).await?;
        Ok(())
    }

    /// Public stream URL for an object key
    pub fn public_url(&self, key: &str) -> Episode {
        let mut url = self.public_base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(key);
        }
        Episode::new(url.to_string())
    }

    /// All episode objects, most recently modified first
    pub async fn list(&self) -> Result<Vec<CatalogEntry>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.bucket_path).await?;

        while let Some(item) = dir.next_entry().await? {
            let file_type = item.file_type().await?;
            if !file_type.is_file() {
                continue;
            }

            let Some(key) = item.file_name().to_str().map(str::to_string) else {
                tracing::warn!(path = ?item.path(), "Skipping object with non UTF-8 name");
                continue;
            };
            if key.starts_with('.') {
                continue;
            }

            let modified = item.metadata().await?.modified()?;
            let metadata = self.read_metadata(&key).await?;

            entries.push(CatalogEntry {
                episode: self.public_url(&key),
                last_modified: DateTime::<Utc>::from(modified),
                metadata,
                key,
            });
        }

        entries.sort_by(|a, b| {
            b.last_modified
                .cmp(&a.last_modified)
                .then_with(|| a.key.cmp(&b.key))
        });

        tracing::debug!(count = entries.len(), "Listed episode bucket");
        Ok(entries)
    }

    /// Playlist for the queue manager, newest first
    pub async fn playlist(&self) -> Result<Vec<Episode>> {
        Ok(self.list().await?.into_iter().map(|e| e.episode).collect())
    }

    /// Canonical website link -> episode, for search results
    pub async fn link_index(&self) -> Result<HashMap<String, Episode>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter_map(|entry| entry.metadata.url.map(|link| (link, entry.episode)))
            .collect())
    }

    /// Canonical links already in the bucket
    pub async fn known_links(&self) -> Result<HashSet<String>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter_map(|entry| entry.metadata.url)
            .collect())
    }

    /// Store an episode object with its canonical link
    ///
    /// The stored object keeps the source file's modification time so the
    /// listing order keeps following publish order.
    pub async fn upload(&self, source: &Path, key: &str, link: &str) -> Result<CatalogEntry> {
        validate_key(key)?;

        let destination = self.bucket_path.join(key);
        fs::copy(source, &destination).await?;

        copy_modified_time(source, &destination).await?;
        let modified = fs::metadata(&destination).await?.modified()?;

        let metadata = ObjectMetadata {
            url: Some(link.to_string()),
        };
        fs::create_dir_all(self.bucket_path.join(METADATA_DIR)).await?;
        fs::write(self.metadata_path(key), serde_json::to_vec_pretty(&metadata)?).await?;

        tracing::info!(key = %key, link = %link, "Uploaded episode");

        Ok(CatalogEntry {
            key: key.to_string(),
            episode: self.public_url(key),
            last_modified: DateTime::<Utc>::from(modified),
            metadata,
        })
    }

    fn metadata_path(&self, key: &str) -> PathBuf {
        self.bucket_path
            .join(METADATA_DIR)
            .join(format!("{}.json", key))
    }

    async fn read_metadata(&self, key: &str) -> Result<ObjectMetadata> {
        let path = self.metadata_path(key);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(metadata) => Ok(metadata),
                Err(e) => {
                    tracing::warn!(key = %key, "Ignoring unreadable metadata: {}", e);
                    Ok(ObjectMetadata::default())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ObjectMetadata::default()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reject keys that could escape the bucket directory
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(ServerError::BadRequest(format!("Invalid object key: {:?}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_appends_key() {
        let catalog =
            EpisodeCatalog::new(PathBuf::from("/tmp"), "https://cdn.example.org/speakca/").unwrap();
        assert_eq!(
            catalog.public_url("water.mp3").url(),
            "https://cdn.example.org/speakca/water.mp3"
        );

        let catalog =
            EpisodeCatalog::new(PathBuf::from("/tmp"), "https://cdn.example.org/speakca").unwrap();
        assert_eq!(
            catalog.public_url("water.mp3").url(),
            "https://cdn.example.org/speakca/water.mp3"
        );
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("2018-05-water.mp3").is_ok());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("nested/key.mp3").is_err());
        assert!(validate_key(".metadata").is_err());
        assert!(validate_key("").is_err());
    }
}
