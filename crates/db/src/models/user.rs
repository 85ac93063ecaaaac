//! User (contact submission) model and DTOs.

use folio_core::error::CoreError;
use folio_core::types::{DbId, Timestamp};
use folio_core::validation::{non_blank, validate_email};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// Request body for creating or replacing a user.
///
/// Every field is optional at the wire level so that a missing field is
/// reported by [`UserPayload::validate`] rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A validated user record ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl UserPayload {
    /// Check required fields and the email format.
    ///
    /// `name` and `email` are trimmed; a missing `message` becomes `""`.
    pub fn validate(self) -> Result<NewUser, CoreError> {
        let (Some(name), Some(email)) = (
            non_blank(self.name.as_deref()),
            non_blank(self.email.as_deref()),
        ) else {
            return Err(CoreError::Validation(
                "Name and email are required".into(),
            ));
        };
        validate_email(email)?;

        Ok(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            message: self.message.unwrap_or_default(),
        })
    }
}
