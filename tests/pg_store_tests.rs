//! Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use formsheet::db::postgres::{self, PgSheetStore};
use formsheet::db::SheetStore;
use formsheet::models::Cell;
use formsheet::submission::schema::{ensure_schema, TableSchema};
use formsheet::submission::{pipeline, SubmissionRequest};

async fn store() -> PgSheetStore {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    PgSheetStore::new(pool)
}

fn unique_sheet() -> String {
    format!("test-{}", Uuid::now_v7())
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn ensure_sheet_is_idempotent() {
    let store = store().await;
    let name = unique_sheet();

    assert!(postgres::create_sheet(store.pool(), &name).await.unwrap());
    assert!(!postgres::create_sheet(store.pool(), &name).await.unwrap());
    store.ensure_sheet(&name).await.unwrap();
    assert_eq!(store.row_count(&name).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn rows_keep_append_order() {
    let store = store().await;
    let name: &'static str = Box::leak(unique_sheet().into_boxed_str());
    let sheet = TableSchema {
        name,
        columns: &["Timestamp", "Value"],
    };

    assert!(ensure_schema(&store, &sheet).await.unwrap());
    for v in ["a", "b", "c"] {
        store.append_row(name, &[Cell::now(), Cell::text(v)]).await.unwrap();
    }
    assert!(!ensure_schema(&store, &sheet).await.unwrap());

    let rows = postgres::list_rows(store.pool(), name).await.unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].cells, serde_json::json!(["Timestamp", "Value"]));
    let values: Vec<&str> = rows[1..]
        .iter()
        .map(|r| r.cells[1].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["a", "b", "c"]);
    assert_eq!(
        rows.iter().map(|r| r.position).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn append_to_missing_sheet_fails() {
    let store = store().await;
    let err = store
        .append_row(&unique_sheet(), &[Cell::empty()])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn newsletter_submission_round_trip() {
    let store = store().await;
    let before = store.row_count("Newsletter").await.unwrap();

    let mut req = SubmissionRequest::new();
    req.append("newsletter", "yes");
    req.append("email", "pg@example.com");
    let envelope = pipeline::classify_and_handle(&store, &req).await.unwrap();
    assert!(envelope.is_success());

    let after = store.row_count("Newsletter").await.unwrap();
    assert_eq!(after, if before == 0 { 2 } else { before + 1 });
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_header_writes_leave_one_header() {
    let store = store().await;
    let name = unique_sheet();
    let header = vec![Cell::text("Timestamp"), Cell::text("Value")];

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let store = store.clone();
            let name = name.clone();
            let header = header.clone();
            tokio::spawn(async move { store.ensure_header(&name, &header).await })
        })
        .collect();

    let mut written = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            written += 1;
        }
    }
    assert_eq!(written, 1);
    assert_eq!(store.row_count(&name).await.unwrap(), 1);
}
