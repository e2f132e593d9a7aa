//! Repository interface for user records
//!
//! The durable store itself is an external collaborator. This crate only
//! defines the contract the domain layer programs against, plus an in-memory
//! implementation for tests (behind the `test-utils` feature).

use crate::entities::UserEntity;
use crate::error::AuthDataError;
use async_trait::async_trait;

/// User repository trait
///
/// Implementations must enforce uniqueness of both username and normalized
/// email atomically at insert time; a lost race between a read-side duplicate
/// check and the insert must still surface as a duplicate error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, AuthDataError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<UserEntity>, AuthDataError>;

    /// Insert a new user, rejecting duplicates atomically
    async fn insert(&self, user: UserEntity) -> Result<UserEntity, AuthDataError>;
}

#[cfg(any(test, feature = "test-utils"))]
pub use self::in_memory::InMemoryUserRepository;

#[cfg(any(test, feature = "test-utils"))]
mod in_memory {
    use super::*;
    use tokio::sync::RwLock;

    /// In-memory implementation of UserRepository
    ///
    /// Duplicate detection and the insert happen under a single write lock,
    /// matching the atomicity a real store provides with unique indexes.
    #[derive(Default)]
    pub struct InMemoryUserRepository {
        users: RwLock<Vec<UserEntity>>,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, AuthDataError> {
            let users = self.users.read().await;
            Ok(users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserEntity>, AuthDataError> {
            let users = self.users.read().await;
            Ok(users.iter().find(|u| u.username == username).cloned())
        }

        async fn insert(&self, user: UserEntity) -> Result<UserEntity, AuthDataError> {
            let mut users = self.users.write().await;
            if users.iter().any(|u| u.username == user.username) {
                return Err(AuthDataError::DuplicateUsername);
            }
            if users.iter().any(|u| u.email.eq_ignore_ascii_case(&user.email)) {
                return Err(AuthDataError::DuplicateEmail);
            }
            users.push(user.clone());
            Ok(user)
        }
    }
}
