/// RSS feed parsing
///
/// Used by search (WordPress search results as RSS) and by ingestion (the
/// podcast feed).
use crate::error::{Result, ServerError};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One `<item>` of an RSS channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    /// Canonical link of the post
    pub link: String,
    pub published: Option<DateTime<Utc>>,
    /// Audio enclosure, when the post carries one
    pub enclosure_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    enclosure: Option<Enclosure>,
}

#[derive(Debug, Deserialize)]
struct Enclosure {
    #[serde(rename = "@url")]
    url: String,
}

/// Parse an RSS 2.0 document into entries, in feed order
///
/// Items without a link are dropped: they cannot be matched or deduplicated.
pub fn parse_feed(xml: &str) -> Result<Vec<FeedEntry>> {
    let rss: Rss = quick_xml::de::from_str(xml)
        .map_err(|e| ServerError::UpstreamUnavailable(format!("Invalid feed: {}", e)))?;

    let entries = rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| {
            let link = item.link.map(|l| l.trim().to_string()).filter(|l| !l.is_empty())?;
            let published = item
                .pub_date
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc2822(d.trim()).ok())
                .map(|d| d.with_timezone(&Utc));

            Some(FeedEntry {
                title: item.title,
                link,
                published,
                enclosure_url: item.enclosure.map(|e| e.url),
            })
        })
        .collect();

    Ok(entries)
}
