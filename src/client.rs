//! HTTP client for the contact endpoint, as used by a page or script that submits the form.
//!
//! The same validator the server runs is applied locally first, so obviously bad input never leaves the
//! caller. Every call ends in a [`SubmitOutcome`]; nothing is raised.

use crate::api::schemas::contact::{ContactForm, ContactResponse};
use crate::domain::submission::ValidationError;
use reqwest::header::ACCEPT;
use uuid::Uuid;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/contact";

/// Shown when the server rejects a submission without saying why.
pub const GENERIC_REJECTION: &str = "Error sending message. Please try again.";

/// Picks the endpoint URL: the build-time value when it is set and non-blank, otherwise the default.
#[must_use]
pub fn resolve_api_url(build_time: Option<&str>) -> String {
    build_time.map(str::trim).filter(|url| !url.is_empty()).unwrap_or(DEFAULT_API_URL).to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    /// Resolves the endpoint from `CONTACT_API_URL` as seen at compile time.
    #[must_use]
    pub fn resolve() -> Self {
        Self { api_url: resolve_api_url(option_env!("CONTACT_API_URL")) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent { id: Option<Uuid> },
    Invalid(ValidationError),
    Rejected { status: u16, message: String },
    NetworkError(String),
}

#[derive(Clone, Debug)]
pub struct ContactClient {
    http: reqwest::Client,
    api_url: String,
}

impl ContactClient {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { http: reqwest::Client::new(), api_url: config.api_url }
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[tracing::instrument(skip(self, form), fields(api_url = %self.api_url))]
    pub async fn submit(&self, form: &ContactForm) -> SubmitOutcome {
        let details = match form.validate() {
            Ok(details) => details,
            Err(e) => return SubmitOutcome::Invalid(e),
        };

        let payload = ContactForm::new(details.name, details.email, details.message);

        let response =
            match self.http.post(self.api_url.as_str()).header(ACCEPT, "application/json").json(&payload).send().await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = %e, "Contact request failed");
                    return SubmitOutcome::NetworkError(e.to_string());
                }
            };

        let status = response.status();
        let body = match response.json::<ContactResponse>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, status = %status.as_u16(), "Unreadable contact response");
                return SubmitOutcome::NetworkError(e.to_string());
            }
        };

        if status.is_success() && body.success {
            return SubmitOutcome::Sent { id: body.id };
        }

        let message = if body.message.is_empty() { GENERIC_REJECTION.to_string() } else { body.message };
        SubmitOutcome::Rejected { status: status.as_u16(), message }
    }
}
