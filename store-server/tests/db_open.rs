//! On-disk database bootstrap: RocksDB open plus schema definition.

use shared::models::UserRole;
use store_server::db::DbService;
use store_server::db::repository::{RepoError, UserRepository};

#[tokio::test]
async fn opens_on_disk_database_and_enforces_unique_email() {
    let tmp = tempfile::tempdir().unwrap();
    let service = DbService::open(tmp.path().to_str().unwrap()).await.unwrap();

    let users = UserRepository::new(service.db.clone());
    let created = users
        .create(
            "Disk User".to_string(),
            "disk@example.com".to_string(),
            "hash".to_string(),
            UserRole::User,
        )
        .await
        .unwrap();
    assert!(created.id.is_some());

    let found = users.find_by_email("disk@example.com").await.unwrap();
    assert!(found.is_some());

    let err = users
        .create(
            "Other".to_string(),
            "disk@example.com".to_string(),
            "hash".to_string(),
            UserRole::User,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));
}
