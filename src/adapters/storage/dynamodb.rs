use crate::adapters::storage::{StorageError, SubmissionStore};
use crate::config::StorageConfig;
use crate::domain::submission::SubmissionRecord;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;

#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    #[must_use]
    pub const fn new(client: Client, table: String) -> Self {
        Self { client, table }
    }
}

/// Builds the DynamoDB client once for the lifetime of the process.
pub async fn initialize_client(config: &StorageConfig) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
        loader = loader.credentials_provider(aws_credential_types::Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "static",
        ));
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

/// Converts a record into the item written to the table. Every attribute is a string and
/// `created_at` is RFC 3339 in UTC.
///
/// # Errors
/// Returns `StorageError::Encode` if the timestamp cannot be formatted.
pub fn to_item(record: &SubmissionRecord) -> Result<HashMap<String, AttributeValue>, StorageError> {
    let created_at = record.created_at.format(&Rfc3339).map_err(|e| StorageError::Encode(e.to_string()))?;

    Ok(HashMap::from([
        ("id".to_string(), AttributeValue::S(record.id.to_string())),
        ("name".to_string(), AttributeValue::S(record.name.clone())),
        ("email".to_string(), AttributeValue::S(record.email.clone())),
        ("message".to_string(), AttributeValue::S(record.message.clone())),
        ("created_at".to_string(), AttributeValue::S(created_at)),
    ]))
}

#[async_trait]
impl SubmissionStore for DynamoStore {
    async fn put(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        let item = to_item(record)?;

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| StorageError::Write { table: self.table.clone(), reason: DisplayErrorContext(&e).to_string() })?;

        tracing::debug!(submission_id = %record.id, table = %self.table, "DynamoDB put succeeded");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.client
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
