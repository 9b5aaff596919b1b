#![cfg(feature = "sqlite")]

use orders_repo::{build_repo, service, Repo};
use orders_types::domain::order::OrderChanges;
use orders_types::ports::order_repository::OrderRepository;

#[tokio::test]
async fn builds_sqlite_repo_from_url() {
    // Use a temp DB path for isolation.
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("orders-test.db");
    let url = format!("sqlite://{}", db_path.display());

    let repo: Repo = build_repo(Some(&url)).await.expect("build repo");
    assert_eq!(repo.backend(), "sqlite");
    // basic sanity: list should succeed and be empty
    let list = repo.get_all().await.expect("list");
    assert!(list.is_empty());
    assert!(db_path.exists());
}

#[tokio::test]
async fn sqlite_data_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("orders.db").display());

    let created = {
        let repo = build_repo(Some(&url)).await.unwrap();
        let created = service::create_order(&repo, "A", "P1").await.unwrap();
        service::update_order(&repo, created.id, OrderChanges::new().product_code("P9"))
            .await
            .unwrap()
            .unwrap()
    };

    let reopened = build_repo(Some(&url)).await.unwrap();
    let fetched = service::get_order(&reopened, created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}
