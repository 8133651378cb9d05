use crate::adapters::storage::{StorageError, SubmissionStore};
use crate::domain::submission::SubmissionRecord;
use async_trait::async_trait;
use std::sync::Mutex;

/// In-process store for local development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record written so far, in write order.
    #[must_use]
    pub fn records(&self) -> Vec<SubmissionRecord> {
        self.records.lock().map_or_else(|poisoned| poisoned.into_inner().clone(), |records| records.clone())
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn put(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(|_| StorageError::Unavailable("memory store poisoned".into()))?;
        records.push(record.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::submission::validate;

    #[tokio::test]
    async fn test_put_appends_in_order() {
        let store = MemoryStore::new();
        let first = SubmissionRecord::new(validate("Ada", "ada@example.com", "one").unwrap());
        let second = SubmissionRecord::new(validate("Bob", "bob@example.com", "two").unwrap());

        store.put(&first).await.unwrap();
        store.put(&second).await.unwrap();

        let records = store.records();
        assert_eq!(records, vec![first, second]);
        assert!(store.ping().await.is_ok());
    }
}
