use crate::adapters::storage::SubmissionStore;
use crate::api::schemas::contact::ContactForm;
use crate::domain::submission::SubmissionRecord;
use crate::error::Result;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub(crate) struct Metrics {
    pub(crate) submissions_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("contact-intake");
        Self {
            submissions_total: meter
                .u64_counter("contact_submissions_total")
                .with_description("Contact form submissions by outcome (stored/rejected/failed)")
                .build(),
        }
    }

    fn record(&self, outcome: &'static str) {
        self.submissions_total.add(1, &[KeyValue::new("outcome", outcome)]);
    }
}

#[derive(Clone, Debug)]
pub struct SubmissionService {
    store: Arc<dyn SubmissionStore>,
    metrics: Metrics,
}

impl SubmissionService {
    #[must_use]
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store, metrics: Metrics::new() }
    }

    /// Validates a contact form and writes exactly one record for it.
    ///
    /// # Errors
    /// Returns `AppError::Validation` if a field is missing or the email is malformed; nothing is written.
    /// Returns `AppError::Storage` if the write fails.
    #[tracing::instrument(err(level = "warn"), skip(self, form), fields(submission_id = tracing::field::Empty))]
    pub async fn submit(&self, form: &ContactForm) -> Result<Uuid> {
        let details = form.validate().inspect_err(|_| self.metrics.record("rejected"))?;

        let record = SubmissionRecord::new(details);
        tracing::Span::current().record("submission_id", tracing::field::display(record.id));

        self.store.put(&record).await.inspect_err(|_| self.metrics.record("failed"))?;

        self.metrics.record("stored");
        tracing::info!("Contact submission stored");
        Ok(record.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::domain::submission::ValidationError;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_submit_writes_normalized_record() {
        let store = Arc::new(MemoryStore::new());
        let service = SubmissionService::new(store.clone());

        let id = service.submit(&ContactForm::new("  John Doe  ", "  JOHN@EXAMPLE.COM  ", "  Hi  ")).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].name, "John Doe");
        assert_eq!(records[0].email, "john@example.com");
        assert_eq!(records[0].message, "Hi");
    }

    #[tokio::test]
    async fn test_rejected_submission_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let service = SubmissionService::new(store.clone());

        let res = service.submit(&ContactForm::new("John Doe", "invalid-email", "Test message")).await;
        assert!(matches!(res, Err(AppError::Validation(ValidationError::InvalidEmail))));

        let res = service.submit(&ContactForm { name: Some("John Doe".into()), ..ContactForm::default() }).await;
        assert!(matches!(res, Err(AppError::Validation(ValidationError::MissingFields))));

        assert!(store.records().is_empty());
    }
}
