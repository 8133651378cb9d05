use crate::domain::submission::{ContactDetails, ValidationError, validate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub const SUBMITTED_MESSAGE: &str = "Contact form submitted successfully";

/// Fields of a `POST /contact` body.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: Some(name.into()), email: Some(email.into()), message: Some(message.into()) }
    }

    /// Pulls the string fields out of an already-parsed body.
    ///
    /// Anything that is not a string (absent, `null`, numbers, a body that is not an object) counts as empty.
    /// Unknown keys are ignored.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);
        Self { name: field("name"), email: field("email"), message: field("message") }
    }

    /// Runs the field validator, treating missing fields as empty strings.
    ///
    /// # Errors
    /// Returns the `ValidationError` produced by the validator.
    pub fn validate(&self) -> Result<ContactDetails, ValidationError> {
        validate(
            self.name.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
            self.message.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl ContactResponse {
    #[must_use]
    pub fn submitted(id: Uuid) -> Self {
        Self { success: true, message: SUBMITTED_MESSAGE.to_string(), id: Some(id) }
    }

    #[must_use]
    pub const fn failure(message: String) -> Self {
        Self { success: false, message, id: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_are_empty() {
        let form = ContactForm::from_json(&json!({"name": "John Doe"}));
        assert_eq!(form.name.as_deref(), Some("John Doe"));
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_null_and_extra_keys() {
        let form = ContactForm::from_json(&json!({"name": "Ada", "email": null, "message": "Hi", "phone": "555"}));
        assert!(form.email.is_none());
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_non_string_values_count_as_empty() {
        let form = ContactForm::from_json(&json!({"name": 0, "email": "a@b.co", "message": "x"}));
        assert!(form.name.is_none());
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_non_object_body_counts_as_empty() {
        for body in [json!([1, 2, 3]), json!("hello"), json!(null), json!(42)] {
            let form = ContactForm::from_json(&body);
            assert_eq!(form.validate(), Err(ValidationError::MissingFields), "{body}");
        }
    }

    #[test]
    fn test_response_without_message_decodes() {
        let res: ContactResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!res.success);
        assert!(res.message.is_empty());
        assert!(res.id.is_none());
    }

    #[test]
    fn test_response_shapes() {
        let id = Uuid::new_v4();
        let ok = serde_json::to_value(ContactResponse::submitted(id)).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["message"], SUBMITTED_MESSAGE);
        assert_eq!(ok["id"], id.to_string());

        let err = serde_json::to_value(ContactResponse::failure("Invalid email format".into())).unwrap();
        assert_eq!(err, json!({"success": false, "message": "Invalid email format"}));
    }
}
