use storage::repository::{ClientStorage, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_client_state_round_trip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_client_state?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert_eq!(repo.get("token").await.unwrap(), None);

    repo.set(&[("token", "abc"), ("user", r#"{"email":"a@b.com"}"#)])
        .await
        .unwrap();
    assert_eq!(repo.get("token").await.unwrap().as_deref(), Some("abc"));
    assert_eq!(
        repo.get("user").await.unwrap().as_deref(),
        Some(r#"{"email":"a@b.com"}"#)
    );

    repo.set(&[("token", "rotated")]).await.unwrap();
    assert_eq!(repo.get("token").await.unwrap().as_deref(), Some("rotated"));

    repo.clear().await.unwrap();
    assert_eq!(repo.get("token").await.unwrap(), None);
    assert_eq!(repo.get("user").await.unwrap(), None);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn file_backed_state_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("client.sqlite3").display());

    {
        let storage = Storage::sqlite(&url).await.expect("open");
        storage
            .client_state
            .set(&[("token", "persisted"), ("user", "{}")])
            .await
            .unwrap();
    }

    let reopened = Storage::sqlite(&url).await.expect("reopen");
    assert_eq!(
        reopened.client_state.get("token").await.unwrap().as_deref(),
        Some("persisted")
    );
}
