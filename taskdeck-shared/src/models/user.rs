/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     email VARCHAR(120) NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// The password column is an opaque string: the API stores it as supplied and
/// compares it byte-for-byte when a deletion is requested. It is never
/// included in API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (assigned by the store)
    pub id: i64,

    /// Display name, at most 100 characters
    pub name: String,

    /// Email address, globally unique, at most 120 characters
    pub email: String,

    /// Opaque stored password, at most 255 characters
    pub password: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Input for updating an existing user
///
/// All fields are optional. Only non-None fields overwrite stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUser {
    /// True when no field is supplied, i.e. the update would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_user_default_is_empty() {
        assert!(UpdateUser::default().is_empty());
    }

    #[test]
    fn test_update_user_with_field_is_not_empty() {
        let update = UpdateUser {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
