use auth_data::AuthDataError;
use thiserror::Error;

/// Domain-specific authentication and authorization errors
///
/// Variants are discriminated internally; the boundary mapping below
/// collapses them to a minimal external vocabulary so a client can never
/// learn which token or credential check failed. No variant ever carries a
/// plaintext password, a digest, or the signing secret.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Username or email already registered")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password input is empty or too long")]
    InvalidPasswordInput,

    #[error("Stored digest is malformed")]
    CorruptDigest,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token signature does not match")]
    InvalidSignature,

    #[error("Token is malformed")]
    MalformedToken,

    #[error("No bearer token in request")]
    MissingToken,

    #[error("Insufficient role for this operation")]
    Forbidden,

    #[error("Dependency unavailable: {0}")]
    Dependency(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Data error: {0}")]
    Data(#[from] AuthDataError),
}

impl AuthError {
    /// HTTP status the boundary layer should answer with.
    pub fn status(&self) -> u16 {
        match self {
            AuthError::Validation(_) | AuthError::InvalidPasswordInput => 400,
            AuthError::DuplicateUser => 409,
            AuthError::InvalidCredentials
            | AuthError::ExpiredToken
            | AuthError::InvalidSignature
            | AuthError::MalformedToken
            | AuthError::MissingToken => 401,
            AuthError::Forbidden => 403,
            AuthError::Dependency(_) => 503,
            AuthError::CorruptDigest | AuthError::Configuration(_) | AuthError::Data(_) => 500,
        }
    }

    /// Client-facing message. Every token failure and the credential failure
    /// share one generic string each, so responses do not reveal whether a
    /// token was expired, tampered or absent, nor whether an account exists.
    pub fn public_message(&self) -> &'static str {
        match self.status() {
            400 => "invalid request",
            401 => "unauthorized",
            403 => "forbidden",
            409 => "conflict",
            503 => "service unavailable",
            _ => "internal error",
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_failures_collapse_to_one_unauthorized_response() {
        let failures = [
            AuthError::ExpiredToken,
            AuthError::InvalidSignature,
            AuthError::MalformedToken,
            AuthError::MissingToken,
            AuthError::InvalidCredentials,
        ];
        for err in failures {
            assert_eq!(err.status(), 401);
            assert_eq!(err.public_message(), "unauthorized");
        }
    }

    #[test]
    fn role_mismatch_is_forbidden_not_unauthorized() {
        assert_eq!(AuthError::Forbidden.status(), 403);
        assert_eq!(AuthError::Forbidden.public_message(), "forbidden");
    }

    #[test]
    fn repository_outage_is_retryable_server_side() {
        let err = AuthError::Dependency("store down".to_string());
        assert_eq!(err.status(), 503);
    }
}
