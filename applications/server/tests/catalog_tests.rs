/// Episode catalog tests
/// Bucket listing order, metadata index and uploads against a temp directory
mod common;

use common::write_object;
use speakca_server::{services::EpisodeCatalog, ServerError};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const PUBLIC_URL: &str = "https://cdn.example.org/speakca/";

async fn create_test_catalog() -> (EpisodeCatalog, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let catalog = EpisodeCatalog::new(temp_dir.path().to_path_buf(), PUBLIC_URL).unwrap();
    catalog.initialize().await.unwrap();
    (catalog, temp_dir)
}

fn write_metadata(dir: &std::path::Path, key: &str, link: &str) {
    std::fs::write(
        dir.join(".metadata").join(format!("{}.json", key)),
        serde_json::json!({ "url": link }).to_string(),
    )
    .unwrap();
}

#[tokio::test]
async fn test_list_newest_first() {
    let (catalog, temp_dir) = create_test_catalog().await;
    write_object(temp_dir.path(), "2018-04-housing.mp3", 1_523_000_000);
    write_object(temp_dir.path(), "2018-05-water.mp3", 1_526_400_000);
    write_object(temp_dir.path(), "2018-03-schools.mp3", 1_520_000_000);

    let keys: Vec<String> = catalog
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.key)
        .collect();

    assert_eq!(
        keys,
        vec![
            "2018-05-water.mp3",
            "2018-04-housing.mp3",
            "2018-03-schools.mp3"
        ]
    );
}

#[tokio::test]
async fn test_list_breaks_ties_by_key() {
    let (catalog, temp_dir) = create_test_catalog().await;
    write_object(temp_dir.path(), "b.mp3", 1_526_400_000);
    write_object(temp_dir.path(), "a.mp3", 1_526_400_000);

    let playlist = catalog.playlist().await.unwrap();

    assert_eq!(
        playlist.iter().map(|e| e.url()).collect::<Vec<_>>(),
        vec![
            "https://cdn.example.org/speakca/a.mp3",
            "https://cdn.example.org/speakca/b.mp3"
        ]
    );
}

#[tokio::test]
async fn test_list_skips_hidden_entries_and_directories() {
    let (catalog, temp_dir) = create_test_catalog().await;
    write_object(temp_dir.path(), "a.mp3", 1_526_400_000);
    write_object(temp_dir.path(), ".DS_Store", 1_526_400_000);
    std::fs::create_dir(temp_dir.path().join("drafts")).unwrap();

    let entries = catalog.list().await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, "a.mp3");
}

#[tokio::test]
async fn test_empty_bucket() {
    let (catalog, _temp_dir) = create_test_catalog().await;

    assert!(catalog.playlist().await.unwrap().is_empty());
    assert!(catalog.link_index().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_link_index_from_metadata() {
    let (catalog, temp_dir) = create_test_catalog().await;
    write_object(temp_dir.path(), "2018-05-water.mp3", 1_526_400_000);
    write_object(temp_dir.path(), "untagged.mp3", 1_526_000_000);
    write_metadata(
        temp_dir.path(),
        "2018-05-water.mp3",
        "https://speakca.net/2018/05/water/",
    );

    let index = catalog.link_index().await.unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(
        index["https://speakca.net/2018/05/water/"].url(),
        "https://cdn.example.org/speakca/2018-05-water.mp3"
    );

    let known = catalog.known_links().await.unwrap();
    assert!(known.contains("https://speakca.net/2018/05/water/"));
}

#[tokio::test]
async fn test_unreadable_metadata_is_ignored() {
    let (catalog, temp_dir) = create_test_catalog().await;
    write_object(temp_dir.path(), "a.mp3", 1_526_400_000);
    std::fs::write(temp_dir.path().join(".metadata").join("a.mp3.json"), b"{not json").unwrap();

    let entries = catalog.list().await.unwrap();

    assert_eq!(entries.len(), 1);
    assert!(entries[0].metadata.url.is_none());
}

#[tokio::test]
async fn test_upload_preserves_modified_time() {
    let (catalog, temp_dir) = create_test_catalog().await;
    let source_dir = TempDir::new().unwrap();
    write_object(source_dir.path(), "transcoded.mp3", 1_526_400_000);

    let entry = catalog
        .upload(
            &source_dir.path().join("transcoded.mp3"),
            "2018-05-water.mp3",
            "https://speakca.net/2018/05/water/",
        )
        .await
        .unwrap();

    assert_eq!(
        entry.episode.url(),
        "https://cdn.example.org/speakca/2018-05-water.mp3"
    );
    assert_eq!(entry.last_modified.timestamp(), 1_526_400_000);

    let stored = std::fs::metadata(temp_dir.path().join("2018-05-water.mp3"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(
        stored,
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_526_400_000)
    );

    let listed = catalog.list().await.unwrap();
    assert_eq!(
        listed[0].metadata.url.as_deref(),
        Some("https://speakca.net/2018/05/water/")
    );
}

#[tokio::test]
async fn test_upload_rejects_escaping_keys() {
    let (catalog, _temp_dir) = create_test_catalog().await;
    let source_dir = TempDir::new().unwrap();
    write_object(source_dir.path(), "x.mp3", 1_526_400_000);

    let result = catalog
        .upload(
            &source_dir.path().join("x.mp3"),
            "../x.mp3",
            "https://speakca.net/x/",
        )
        .await;

    assert!(matches!(result, Err(ServerError::BadRequest(_))));
}

#[test]
fn test_invalid_public_url() {
    let result = EpisodeCatalog::new(std::path::PathBuf::from("/tmp"), "not a url");
    assert!(matches!(result, Err(ServerError::Config(_))));
}
