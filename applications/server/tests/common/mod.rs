/// Common test utilities and fixtures
use speakca_playback::{Episode, SharedQueueManager};
use speakca_server::{
    config::{SiteSettings, SkillSettings},
    services::SiteClient,
    state::AppState,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

pub const CDN: &str = "https://cdn.example.org/speakca";

/// Episode served from the test CDN
pub fn episode(name: &str) -> Episode {
    Episode::new(format!("{}/{}.mp3", CDN, name))
}

/// Site settings pointing at a mock server
pub fn site_settings(base_url: &str) -> SiteSettings {
    SiteSettings {
        base_url: format!("{}/", base_url.trim_end_matches('/')),
        feed_url: format!("{}/feed/", base_url.trim_end_matches('/')),
        timeout_secs: 5,
    }
}

pub fn skill_settings() -> SkillSettings {
    SkillSettings {
        card_title: "California Speaks".to_string(),
    }
}

/// Application state over `playlist`, talking to the site at `site_url`
pub fn create_test_state(
    playlist: Vec<Episode>,
    link_index: HashMap<String, Episode>,
    site_url: &str,
) -> AppState {
    let site = SiteClient::new(&site_settings(site_url)).unwrap();
    AppState::new(
        SharedQueueManager::from_playlist(playlist),
        Arc::new(site),
        link_index,
        skill_settings(),
    )
}

/// Write a fake episode object with the given modification time
pub fn write_object(dir: &Path, key: &str, secs_since_epoch: u64) {
    let path = dir.join(key);
    std::fs::write(&path, b"ID3").unwrap();
    let file = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs_since_epoch))
        .unwrap();
}

/// Request envelope fixtures
pub mod requests {
    use serde_json::{json, Value};

    pub fn launch() -> Value {
        json!({
            "version": "1.0",
            "session": { "new": true, "sessionId": "amzn1.echo-api.session.test" },
            "request": { "type": "LaunchRequest", "requestId": "amzn1.echo-api.request.launch" }
        })
    }

    pub fn intent(name: &str) -> Value {
        json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.intent",
                "intent": { "name": name }
            }
        })
    }

    pub fn search(term: &str) -> Value {
        json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "intent": {
                    "name": "SearchIntent",
                    "slots": { "term": { "name": "term", "value": term } }
                }
            }
        })
    }

    pub fn audio_player(kind: &str, token: &str, offset_ms: u64) -> Value {
        json!({
            "version": "1.0",
            "context": { "AudioPlayer": { "token": token, "playerActivity": "PLAYING" } },
            "request": {
                "type": format!("AudioPlayer.{}", kind),
                "requestId": "amzn1.echo-api.request.audio",
                "token": token,
                "offsetInMilliseconds": offset_ms
            }
        })
    }
}

/// Minimal RSS 2.0 document with one item per `(link, enclosure)`
pub fn rss_feed(items: &[(&str, Option<&str>)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>California Speaks</title>"#,
    );
    for (link, enclosure) in items {
        xml.push_str("<item><title>Episode</title>");
        xml.push_str(&format!("<link>{}</link>", link));
        xml.push_str("<pubDate>Tue, 15 May 2018 16:00:00 +0000</pubDate>");
        if let Some(url) = enclosure {
            xml.push_str(&format!(
                r#"<enclosure url="{}" length="1024" type="audio/mpeg"/>"#,
                url
            ));
        }
        xml.push_str("</item>");
    }
    xml.push_str("</channel></rss>");
    xml
}
