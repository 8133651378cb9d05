use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub storage: StorageConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "CONTACT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CONTACT_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management (health) server
    #[arg(long, env = "CONTACT_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight work during shutdown
    #[arg(long, env = "CONTACT_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,

    /// Largest accepted request body in bytes
    #[arg(long, env = "CONTACT_MAX_BODY_BYTES", default_value_t = 65_536)]
    pub max_body_bytes: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    #[default]
    Dynamodb,
    Memory,
}

#[derive(Clone, Debug, Args)]
pub struct StorageConfig {
    /// Where submissions are written
    #[arg(long = "storage-backend", env = "CONTACT_STORAGE_BACKEND", value_enum, default_value_t = StorageBackend::Dynamodb)]
    pub backend: StorageBackend,

    /// DynamoDB table receiving submission records
    #[arg(long = "dynamodb-table", env = "CONTACT_DYNAMODB_TABLE", default_value = "contact-submissions")]
    pub table: String,

    /// DynamoDB region
    #[arg(long = "dynamodb-region", env = "CONTACT_DYNAMODB_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Custom DynamoDB endpoint (useful for DynamoDB Local)
    #[arg(long = "dynamodb-endpoint", env = "CONTACT_DYNAMODB_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Static access key; the default AWS credential chain is used when unset
    #[arg(long = "dynamodb-access-key", env = "CONTACT_DYNAMODB_ACCESS_KEY")]
    pub access_key: Option<String>,

    /// Static secret key
    #[arg(long = "dynamodb-secret-key", env = "CONTACT_DYNAMODB_SECRET_KEY")]
    pub secret_key: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the storage readiness check
    #[arg(long = "health-storage-timeout-ms", env = "CONTACT_HEALTH_STORAGE_TIMEOUT_MS", default_value_t = 2000)]
    pub storage_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// OTLP collector endpoint; telemetry export is disabled when unset
    #[arg(long, env = "CONTACT_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "CONTACT_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
