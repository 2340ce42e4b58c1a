use tempfile::TempDir;

use crate::models::{RepositoryError, Service, ServiceForm};
use crate::repositories::{JsonFileRepository, ServiceRepository};

fn new_service(name: &str) -> Service {
    let form = ServiceForm {
        name: Some(name.to_string()),
        home_short_description: Some(format!("{name} short")),
        details_short_description: Some(format!("{name} details")),
        description: Some(format!("{name} description")),
        ..Default::default()
    };
    Service::new(&form, String::new(), vec![])
}

async fn open_store() -> (TempDir, JsonFileRepository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileRepository::open(dir.path().join("services.json"))
        .await
        .unwrap();
    (dir, repo)
}

#[tokio::test]
async fn test_open_initializes_empty_store() {
    let (dir, repo) = open_store().await;
    assert_eq!(repo.count().await.unwrap(), 0);
    let contents = std::fs::read_to_string(dir.path().join("services.json")).unwrap();
    assert_eq!(contents, "[]");
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let (_dir, repo) = open_store().await;
    let first = repo.create(new_service("A")).await.unwrap();
    let second = repo.create(new_service("B")).await.unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn test_next_id_is_max_plus_one_after_delete() {
    let (_dir, repo) = open_store().await;
    repo.create(new_service("A")).await.unwrap();
    let b = repo.create(new_service("B")).await.unwrap();
    repo.create(new_service("C")).await.unwrap();

    repo.delete(b.id).await.unwrap();
    let d = repo.create(new_service("D")).await.unwrap();
    // max surviving id is 3, so the new record gets 4, not b's old id
    assert_eq!(d.id, 4);
}

#[tokio::test]
async fn test_find_by_id_and_exists() {
    let (_dir, repo) = open_store().await;
    let created = repo.create(new_service("A")).await.unwrap();

    let found = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found.name, "A");
    assert!(repo.exists(created.id).await.unwrap());
    assert!(!repo.exists(99).await.unwrap());
    assert!(repo.find_by_id(99).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_replaces_record() {
    let (_dir, repo) = open_store().await;
    let mut created = repo.create(new_service("A")).await.unwrap();
    created.name = "Renamed".to_string();

    let updated = repo.update(created.clone()).await.unwrap();
    assert_eq!(updated.name, "Renamed");
    let reread = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reread.name, "Renamed");
}

#[tokio::test]
async fn test_update_missing_record_is_not_found() {
    let (_dir, repo) = open_store().await;
    let mut ghost = new_service("Ghost");
    ghost.id = 42;
    assert!(matches!(
        repo.update(ghost).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn test_delete_missing_record_is_not_found() {
    let (_dir, repo) = open_store().await;
    assert!(matches!(
        repo.delete(42).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn test_replace_order_appends_stragglers_and_drops_unknowns() {
    let (_dir, repo) = open_store().await;
    for name in ["A", "B", "C"] {
        repo.create(new_service(name)).await.unwrap();
    }

    // id 99 is unknown, id 2 is omitted
    let reordered = repo.replace_order(vec![3, 99, 1]).await.unwrap();
    let ids: Vec<u64> = reordered.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    let stored: Vec<u64> = repo
        .find_all()
        .await
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(stored, vec![3, 1, 2]);
}

#[tokio::test]
async fn test_replace_order_with_repeated_ids_stores_each_record_once() {
    let (_dir, repo) = open_store().await;
    for name in ["A", "B"] {
        repo.create(new_service(name)).await.unwrap();
    }

    let reordered = repo.replace_order(vec![1, 1, 2]).await.unwrap();
    let ids: Vec<u64> = reordered.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let stored: Vec<u64> = repo
        .find_all()
        .await
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(stored, vec![1, 2]);
}

#[tokio::test]
async fn test_corrupt_store_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("services.json");
    std::fs::write(&path, "{{{ not json").unwrap();

    let repo = JsonFileRepository::open(path.clone()).await.unwrap();
    assert!(matches!(
        repo.find_all().await,
        Err(RepositoryError::Serialization { .. })
    ));
    // the corrupt document was not overwritten
    let contents = std::fs::read_to_string(path).unwrap();
    assert_eq!(contents, "{{{ not json");
}

#[tokio::test]
async fn test_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("services.json");

    let repo = JsonFileRepository::open(path.clone()).await.unwrap();
    repo.create(new_service("A")).await.unwrap();
    drop(repo);

    let reopened = JsonFileRepository::open(path).await.unwrap();
    assert_eq!(reopened.count().await.unwrap(), 1);
}
