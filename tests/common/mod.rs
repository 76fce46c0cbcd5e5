use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use formsheet::config::Config;
use formsheet::db::{MemorySheetStore, SheetStore, StoreError};
use formsheet::models::Cell;

/// A running test server instance backed by the given store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit form-urlencoded data, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit JSON data, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit a multipart body built from (name, value) pairs, return (body, status).
    pub async fn submit_multipart(&self, fields: &[(&str, &str)]) -> (Value, StatusCode) {
        let boundary = "formsheet-test-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        let resp = self
            .client
            .post(self.url("/"))
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await
            .expect("submit multipart failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        log_level: "warn".to_string(),
        ..Config::default()
    }
}

/// Spawn a test app over an arbitrary store.
pub async fn spawn_app(store: Arc<dyn SheetStore>) -> TestApp {
    let app = formsheet::build_app(store, test_config());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}

/// Spawn a test app over a fresh in-memory store the test can inspect.
pub async fn spawn_memory_app() -> (TestApp, Arc<MemorySheetStore>) {
    let store = Arc::new(MemorySheetStore::new());
    let app = spawn_app(store.clone()).await;
    (app, store)
}

/// Text of every cell in a row; timestamps render as RFC 3339.
pub fn texts(row: &[Cell]) -> Vec<String> {
    row.iter().map(|c| c.to_string()).collect()
}

/// Accepts sheet creation but refuses every append.
pub struct FailingStore;

#[async_trait]
impl SheetStore for FailingStore {
    async fn ensure_sheet(&self, _name: &str) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append_row(&self, name: &str, _row: &[Cell]) -> Result<(), StoreError> {
        Err(StoreError::MissingSheet(name.to_string()))
    }

    async fn ensure_header(&self, name: &str, _header: &[Cell]) -> Result<bool, StoreError> {
        Err(StoreError::MissingSheet(name.to_string()))
    }

    async fn row_count(&self, _name: &str) -> Result<u64, StoreError> {
        Ok(0)
    }
}

/// In-memory store that yields to the scheduler before every call, so concurrent
/// requests interleave the way they do against a networked database.
#[derive(Default)]
pub struct YieldingStore {
    pub inner: MemorySheetStore,
}

#[async_trait]
impl SheetStore for YieldingStore {
    async fn ensure_sheet(&self, name: &str) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        self.inner.ensure_sheet(name).await
    }

    async fn append_row(&self, name: &str, row: &[Cell]) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        self.inner.append_row(name, row).await
    }

    async fn ensure_header(&self, name: &str, header: &[Cell]) -> Result<bool, StoreError> {
        tokio::task::yield_now().await;
        self.inner.ensure_header(name, header).await
    }

    async fn row_count(&self, name: &str) -> Result<u64, StoreError> {
        tokio::task::yield_now().await;
        self.inner.row_count(name).await
    }
}
