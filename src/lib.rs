#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::storage::{DynamoStore, MemoryStore, SubmissionStore, dynamodb};
use crate::api::ServiceContainer;
use crate::config::{Config, StorageBackend};
use crate::services::health_service::HealthService;
use crate::services::submission_service::SubmissionService;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug)]
pub struct App {
    pub services: ServiceContainer,
    pub health_service: HealthService,
}

/// Wires the services around a single shared submission store.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    store: Option<Arc<dyn SubmissionStore>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, store: None }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn SubmissionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the application services.
    ///
    /// # Errors
    /// Returns an error if no submission store was provided.
    pub fn build(self) -> anyhow::Result<App> {
        let store = self.store.ok_or_else(|| anyhow::anyhow!("submission store is required"))?;

        let submission_service = SubmissionService::new(Arc::clone(&store));
        let health_service = HealthService::new(store, self.config.health);

        Ok(App { services: ServiceContainer { submission_service }, health_service })
    }
}

/// Creates the configured submission store. Called once at startup; the result is shared by every request.
pub async fn initialize_store(config: &Config) -> Arc<dyn SubmissionStore> {
    match config.storage.backend {
        StorageBackend::Dynamodb => {
            let client = dynamodb::initialize_client(&config.storage).await;
            tracing::info!(table = %config.storage.table, region = %config.storage.region, "Using DynamoDB store");
            Arc::new(DynamoStore::new(client, config.storage.table.clone()))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store; submissions will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Routes panics through `tracing` so they reach the configured log sinks.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info.location().map(ToString::to_string).unwrap_or_default();
        tracing::error!(panic = %info, location = %location, "Panic occurred");
        default_hook(info);
    }));
}

/// Flips the shutdown flag on Ctrl+C or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
