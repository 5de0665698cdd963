//! Application record types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A persisted application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// The record's identifier, assigned by the store.
    pub id: String,

    /// The user name of the applicant.
    pub username: String,

    /// The contact email of the applicant. Unique across records.
    pub email: String,
}

impl Application {
    /// Field names that may appear in predicates and orderings.
    pub const FIELDS: [&'static str; 3] = ["id", "username", "email"];

    /// Creates a record from its parts.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}

/// The fields supplied when creating an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    /// The user name of the applicant.
    #[serde(default)]
    pub username: String,

    /// The contact email of the applicant.
    #[serde(default)]
    pub email: String,
}

impl NewApplication {
    /// Creates a new application input.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Checks that both fields carry a non-blank value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("username", &self.username), ("email", &self.email)] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingRequiredField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A partial update of an application. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    /// New user name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// New contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ApplicationUpdate {
    /// Returns `true` when the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }

    /// Rejects fields that are present but blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("username", &self.username), ("email", &self.email)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ValidationError::MissingRequiredField {
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_application_validation() {
        assert!(NewApplication::new("ada", "ada@example.com").validate().is_ok());

        let err = NewApplication::new("  ", "ada@example.com")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("username"));

        let missing: NewApplication = serde_json::from_str(r#"{"username":"ada"}"#).unwrap();
        assert!(missing.validate().unwrap_err().to_string().contains("email"));
    }

    #[test]
    fn test_update_validation() {
        assert!(ApplicationUpdate::default().is_empty());
        assert!(ApplicationUpdate::default().validate().is_ok());

        let blank = ApplicationUpdate {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_record_serialization() {
        let application = Application::new("1", "ada", "ada@example.com");
        assert_eq!(
            serde_json::to_value(&application).unwrap(),
            serde_json::json!({"id": "1", "username": "ada", "email": "ada@example.com"})
        );
    }
}
