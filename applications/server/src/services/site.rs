/// Website client - weekly question, search and podcast feed
use crate::{
    config::SiteSettings,
    error::{Result, ServerError},
    services::feed::{parse_feed, FeedEntry},
};
use regex::Regex;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// The question is the first extra-large span on the home page
const QUESTION_PATTERN: &str = r#"<span style="font-size: x-large;">(.*?)</span>"#;

#[derive(Debug, Clone)]
pub struct SiteClient {
    http: Client,
    base_url: Url,
    feed_url: Url,
    question_re: Regex,
}

impl SiteClient {
    pub fn new(settings: &SiteSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| ServerError::Config(format!("Invalid site URL: {}", e)))?;
        let feed_url = Url::parse(&settings.feed_url)
            .map_err(|e| ServerError::Config(format!("Invalid feed URL: {}", e)))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(format!("speakca-server/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let question_re = Regex::new(QUESTION_PATTERN)
            .map_err(|e| ServerError::Internal(format!("Invalid question pattern: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            feed_url,
            question_re,
        })
    }

    /// This week's question, as shown on the home page
    pub async fn weekly_question(&self) -> Result<String> {
        let page = self.get_text(self.base_url.clone()).await?;

        let question = self
            .question_re
            .captures(&page)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|q| !q.is_empty())
            .ok_or_else(|| {
                ServerError::UpstreamUnavailable("No question found on home page".to_string())
            })?;

        tracing::debug!(question = %question, "Fetched weekly question");
        Ok(question)
    }

    /// Links of posts matching `term`, best match first
    pub async fn search(&self, term: &str) -> Result<Vec<String>> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("s", term)
            .append_pair("feed", "rss2");

        let body = self.get_text(url).await?;
        let links: Vec<String> = parse_feed(&body)?.into_iter().map(|e| e.link).collect();

        tracing::debug!(term = %term, results = links.len(), "Searched site");
        Ok(links)
    }

    /// Entries of the podcast feed, newest first
    pub async fn feed(&self) -> Result<Vec<FeedEntry>> {
        let body = self.get_text(self.feed_url.clone()).await?;
        parse_feed(&body)
    }

    /// Download `url` into `destination`
    pub async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ServerError::UpstreamUnavailable(format!("GET {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServerError::UpstreamUnavailable(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServerError::UpstreamUnavailable(format!("GET {}: {}", url, e)))?;
        tokio::fs::write(destination, &bytes).await?;

        tracing::debug!(url = %url, bytes = bytes.len(), "Downloaded episode");
        Ok(bytes.len() as u64)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            ServerError::UpstreamUnavailable(format!("GET {}: {}", url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServerError::UpstreamUnavailable(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| ServerError::UpstreamUnavailable(format!("GET {}: {}", url, e)))
    }
}
