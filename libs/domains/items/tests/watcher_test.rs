//! File watcher tests: edits to the data file invalidate the stats cache.

use domain_items::{JsonFileItemRepository, StatsService, watcher};
use std::time::Duration;

async fn wait_until_invalidated(stats: &StatsService<JsonFileItemRepository>) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        if !stats.is_cached().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    false
}

#[tokio::test]
async fn test_external_edit_invalidates_stats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(
        &path,
        r#"[{ "id": 1, "name": "a", "category": "c", "price": 10.0 }]"#,
    )
    .unwrap();

    let repository = JsonFileItemRepository::new(&path);
    let stats = StatsService::new(repository.clone());
    let _guard = watcher::watch_data_file(repository.path(), stats.clone()).unwrap();

    assert_eq!(stats.get_stats().await.unwrap().total, 1);
    assert!(stats.is_cached().await);

    std::fs::write(
        &path,
        r#"[{ "id": 1, "name": "a", "category": "c", "price": 10.0 },
            { "id": 2, "name": "b", "category": "c", "price": 30.0 }]"#,
    )
    .unwrap();

    assert!(wait_until_invalidated(&stats).await, "cache was never invalidated");

    let fresh = stats.get_stats().await.unwrap();
    assert_eq!(fresh.total, 2);
    assert_eq!(fresh.average_price, 20.0);
}

#[tokio::test]
async fn test_sibling_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(&path, "[]").unwrap();

    let repository = JsonFileItemRepository::new(&path);
    let stats = StatsService::new(repository.clone());
    let _guard = watcher::watch_data_file(repository.path(), stats.clone()).unwrap();

    stats.get_stats().await.unwrap();
    std::fs::write(dir.path().join("notes.txt"), "unrelated").unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(stats.is_cached().await);
}

#[tokio::test]
async fn test_path_without_file_name_is_rejected() {
    let repository = JsonFileItemRepository::new("/");
    let stats = StatsService::new(repository);

    assert!(watcher::watch_data_file("/", stats).is_err());
}
