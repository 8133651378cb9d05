#![allow(dead_code)]
use async_trait::async_trait;
use contact_intake::adapters::storage::{MemoryStore, StorageError, SubmissionStore};
use contact_intake::api::{self, MgmtState};
use contact_intake::config::Config;
use contact_intake::domain::submission::SubmissionRecord;
use contact_intake::AppBuilder;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::net::TcpListener;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("contact_intake=debug".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

pub fn get_test_config() -> Config {
    use clap::Parser;
    Config::try_parse_from([
        "contact-intake",
        "--host",
        "127.0.0.1",
        "--port",
        "0",
        "--mgmt-port",
        "0",
        "--storage-backend",
        "memory",
        "--dynamodb-table",
        "test-contact-table",
        "--health-storage-timeout-ms",
        "200",
    ])
    .unwrap()
}

/// Always fails, standing in for an unreachable DynamoDB table.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl SubmissionStore for FailingStore {
    async fn put(&self, _record: &SubmissionRecord) -> Result<(), StorageError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Write { table: "test-contact-table".into(), reason: "DynamoDB error".into() })
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("DynamoDB error".into()))
    }
}

/// Answers pings slower than any sane readiness timeout.
#[derive(Debug, Default)]
pub struct SlowStore;

#[async_trait]
impl SubmissionStore for SlowStore {
    async fn put(&self, _record: &SubmissionRecord) -> Result<(), StorageError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    }
}

/// Takes a while to acknowledge each write, then keeps the record.
#[derive(Debug, Default)]
pub struct SlowWriteStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl SubmissionStore for SlowWriteStore {
    async fn put(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        self.inner.put(record).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub config: Config,
}

impl TestApp {
    /// Spawns the app over a fresh in-memory store and hands the store back for inspection.
    pub async fn spawn() -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let app = Self::spawn_with_store(store.clone()).await;
        (app, store)
    }

    pub async fn spawn_with_store(store: Arc<dyn SubmissionStore>) -> Self {
        setup_tracing();
        let config = get_test_config();

        let app = AppBuilder::new(config.clone()).with_store(store).build().unwrap();
        let app_router = api::app_router(&config, app.services);
        let mgmt_router = api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(api_listener, app_router).await.unwrap();
        });
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_router).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new(), config }
    }

    pub fn contact_url(&self) -> String {
        format!("{}/contact", self.server_url)
    }

    pub async fn post_json(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client.post(self.contact_url()).json(body).send().await.unwrap()
    }
}
