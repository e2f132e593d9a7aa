use thiserror::Error;

pub type DataResult<T> = Result<T, AuthDataError>;

#[derive(Debug, Error)]
pub enum AuthDataError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthDataError {
    /// Duplicate-key conflicts are the one class the caller must be able to
    /// distinguish from a failed write: the store rejected the record because
    /// an equivalent key already exists.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            AuthDataError::DuplicateUsername | AuthDataError::DuplicateEmail
        )
    }
}
