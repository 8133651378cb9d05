use crate::domain::submission::SubmissionRecord;
use async_trait::async_trait;
use thiserror::Error;

pub mod dynamodb;
pub mod memory;

pub use dynamodb::DynamoStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to encode record: {0}")]
    Encode(String),
    #[error("Write to {table} failed: {reason}")]
    Write { table: String, reason: String },
    #[error("Storage unreachable: {0}")]
    Unavailable(String),
}

/// Write-only sink for contact submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Issues a single write of `record`, keyed by its id.
    async fn put(&self, record: &SubmissionRecord) -> Result<(), StorageError>;

    /// Cheap connectivity check used by the readiness probe.
    async fn ping(&self) -> Result<(), StorageError>;
}
