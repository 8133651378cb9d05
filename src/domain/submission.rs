use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: name, email, and message are required")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

/// Normalized contact details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Trims every field, lowercases the email, and checks the result.
///
/// # Errors
/// Returns `ValidationError::MissingFields` if any field is empty after trimming.
/// Returns `ValidationError::InvalidEmail` if the email is not shaped like `local@domain.tld`.
pub fn validate(name: &str, email: &str, message: &str) -> Result<ContactDetails, ValidationError> {
    let name = name.trim_matches(is_form_whitespace);
    let email = email.trim_matches(is_form_whitespace).to_lowercase();
    let message = message.trim_matches(is_form_whitespace);

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if !is_email_shaped(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(ContactDetails { name: name.to_string(), email, message: message.to_string() })
}

// Unicode whitespace plus U+FEFF, matching what form input treats as blank; `char::is_whitespace` excludes U+FEFF.
fn is_form_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

// Shallow `local@domain.tld` check: exactly one `@`, no whitespace, and a dot inside the domain with at
// least one character on either side. Not an RFC 5322 parser.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(is_form_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain.char_indices().any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// A stored contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: OffsetDateTime,
}

impl SubmissionRecord {
    #[must_use]
    pub fn new(details: ContactDetails) -> Self {
        Self::with_time(details, OffsetDateTime::now_utc())
    }

    #[must_use]
    pub fn with_time(details: ContactDetails, created_at: OffsetDateTime) -> Self {
        Self { id: Uuid::new_v4(), name: details.name, email: details.email, message: details.message, created_at }
    }
}
