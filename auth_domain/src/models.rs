use crate::error::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Roles recognized by the platform
///
/// Role names are case-sensitive canonical strings; an unrecognized value is
/// a validation failure at registration, never silently tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Instructor,
    Admin,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Instructor => write!(f, "Instructor"),
            Role::Admin => write!(f, "Admin"),
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Student" => Ok(Role::Student),
            "Instructor" => Ok(Role::Instructor),
            "Admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,      // User ID
    pub role: Role,       // User role
    pub iat: i64,         // Issued at timestamp
    pub exp: i64,         // Expiration timestamp
    pub iss: String,      // Issuer
    pub aud: String,      // Audience
    pub jti: String,      // Unique token identifier
}

/// Identity resolved for one request after token verification.
///
/// A transient value threaded explicitly through the request's handling;
/// never stored across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub role: Role,
}

/// Username validator
pub struct UsernameValidator;

impl UsernameValidator {
    /// Validate username format
    pub fn validate(username: &str) -> bool {
        if username.len() < 3 || username.len() > 30 {
            return false;
        }

        username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.')
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_its_canonical_string() {
        for role in [Role::Student, Role::Instructor, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn role_parsing_is_case_sensitive() {
        assert!("student".parse::<Role>().is_err());
        assert!("ADMIN".parse::<Role>().is_err());
        assert!("Superuser".parse::<Role>().is_err());
    }

    #[test]
    fn username_format_rules() {
        assert!(UsernameValidator::validate("alice_01"));
        assert!(UsernameValidator::validate("a.b.c"));
        assert!(!UsernameValidator::validate("ab"));
        assert!(!UsernameValidator::validate("has space"));
        assert!(!UsernameValidator::validate(&"x".repeat(31)));
    }
}
