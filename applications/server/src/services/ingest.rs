/// Feed ingestion - incremental sync of the podcast feed into the bucket
use crate::{
    error::{Result, ServerError},
    services::{
        catalog::{validate_key, CatalogEntry, EpisodeCatalog},
        feed::FeedEntry,
        site::SiteClient,
        transcoding::{set_modified_time, TranscodingService},
    },
};
use std::sync::Arc;
use url::Url;

/// Outcome of one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries in the feed
    pub discovered: usize,
    /// Already stored, or without audio
    pub skipped: usize,
    pub uploaded: usize,
    pub failed: usize,
}

pub struct Ingestor {
    site: Arc<SiteClient>,
    catalog: Arc<EpisodeCatalog>,
    transcoder: Arc<TranscodingService>,
}

impl Ingestor {
    pub fn new(
        site: Arc<SiteClient>,
        catalog: Arc<EpisodeCatalog>,
        transcoder: Arc<TranscodingService>,
    ) -> Self {
        Self {
            site,
            catalog,
            transcoder,
        }
    }

    /// Download, transcode and upload every feed entry not yet stored
    ///
    /// New entries are uploaded oldest first. A failing entry is logged and
    /// counted; the rest of the sync continues.
    pub async fn sync(&self, dry_run: bool) -> Result<SyncReport> {
        let entries = self.site.feed().await?;
        let known = self.catalog.known_links().await?;

        let mut report = SyncReport {
            discovered: entries.len(),
            ..Default::default()
        };

        let mut pending = Vec::new();
        for entry in &entries {
            if known.contains(&entry.link) {
                tracing::debug!(link = %entry.link, "Already stored");
                report.skipped += 1;
            } else if entry.enclosure_url.is_none() {
                tracing::warn!(link = %entry.link, "Feed entry has no audio enclosure");
                report.skipped += 1;
            } else {
                pending.push(entry);
            }
        }

        // Feed lists newest first; upload in reverse discovery order
        for entry in pending.into_iter().rev() {
            if dry_run {
                tracing::info!(link = %entry.link, "Would ingest episode");
                continue;
            }

            match self.ingest(entry).await {
                Ok(stored) => {
                    tracing::info!(key = %stored.key, link = %entry.link, "Ingested episode");
                    report.uploaded += 1;
                }
                Err(e) => {
                    tracing::error!(link = %entry.link, "Failed to ingest episode: {}", e);
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            discovered = report.discovered,
            skipped = report.skipped,
            uploaded = report.uploaded,
            failed = report.failed,
            "Feed sync finished"
        );
        Ok(report)
    }

    async fn ingest(&self, entry: &FeedEntry) -> Result<CatalogEntry> {
        let audio_url = entry
            .enclosure_url
            .as_deref()
            .ok_or_else(|| ServerError::BadRequest(format!("No enclosure for {}", entry.link)))?;

        let key = episode_key(&entry.link)?;
        let workdir = tempfile::tempdir()?;
        let downloaded = workdir.path().join("download");
        let transcoded = workdir.path().join(&key);

        self.site.download(audio_url, &downloaded).await?;
        if let Some(published) = entry.published {
            set_modified_time(&downloaded, published.into()).await?;
        }

        self.transcoder.transcode(&downloaded, &transcoded).await?;
        self.catalog.upload(&transcoded, &key, &entry.link).await
    }
}

/// Object key for an episode, derived from its canonical link
///
/// `https://speakca.net/2018/05/water/` becomes `2018-05-water.mp3`.
pub fn episode_key(link: &str) -> Result<String> {
    let url = Url::parse(link)
        .map_err(|e| ServerError::BadRequest(format!("Invalid episode link {}: {}", link, e)))?;

    let mut slug = String::new();
    for c in url.path().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        return Err(ServerError::BadRequest(format!(
            "Cannot derive a key from {}",
            link
        )));
    }

    let key = format!("{}.mp3", slug);
    validate_key(&key)?;
    Ok(key)
}
