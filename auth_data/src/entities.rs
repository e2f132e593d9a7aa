//! Storage entities for the authorization core

use chrono::{DateTime, Utc};
use std::fmt;

/// Durable user record.
///
/// The `password_hash` field holds the opaque digest produced by the domain
/// hasher. It is never serialized towards clients and never compared by
/// equality, only through the hasher's verify operation.
#[derive(Clone)]
pub struct UserEntity {
    pub id: String,
    pub username: String,
    /// Stored lowercased and trimmed; lookups expect the normalized form.
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserEntity {
    pub fn new(username: String, email: String, password_hash: String, role: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        }
    }
}

// Hand-written so the digest cannot leak through debug logging.
impl fmt::Debug for UserEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEntity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password_hash() {
        let user = UserEntity::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "pbkdf2-sha256$600000$aa$bb".to_string(),
            "Student".to_string(),
        );
        let rendered = format!("{:?}", user);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("pbkdf2-sha256"));
    }
}
