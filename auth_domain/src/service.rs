use crate::error::{AuthError, AuthResult};
use crate::hashing_service::PasswordHasher;
use crate::models::{Role, UsernameValidator};
use crate::password_rules::{self, PasswordPolicy};
use crate::token_service::TokenService;
use crate::utils::{is_valid_email, normalize_email};
use async_trait::async_trait;
use auth_data::entities::UserEntity;
use auth_data::repositories::UserRepository;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{error, info};

/// Auth service trait defining credential operations
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user, returning the new user id
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> AuthResult<String>;

    /// Verify credentials and issue a session token
    async fn login(&self, email: &str, password: &str) -> AuthResult<String>;
}

/// Implementation of AuthService
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    token_service: Arc<dyn TokenService>,
    hashing_service: Arc<dyn PasswordHasher>,
    password_policy: PasswordPolicy,
}

impl AuthServiceImpl {
    /// Create a new auth service instance
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        token_service: Arc<dyn TokenService>,
        hashing_service: Arc<dyn PasswordHasher>,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            hashing_service,
            password_policy,
        }
    }

    fn validate_registration(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> AuthResult<Role> {
        if !UsernameValidator::validate(username) {
            return Err(AuthError::Validation("invalid username".into()));
        }
        if !is_valid_email(email) {
            return Err(AuthError::Validation("invalid email".into()));
        }
        password_rules::check_password(&self.password_policy, password)
            .map_err(|reason| AuthError::Validation(reason.into()))?;

        // Unrecognized roles are rejected at registration rather than
        // tolerated and discovered later at a role gate.
        Role::from_str(role).map_err(|_| AuthError::Validation("unrecognized role".into()))
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> AuthResult<String> {
        let email = normalize_email(email);
        let role = self.validate_registration(username, &email, password, role)?;

        // Read-side duplicate checks give the common case a clean error
        // before any hashing work is spent.
        let username_taken = self
            .user_repository
            .find_by_username(username)
            .await
            .map_err(|e| {
                error!("Failed to check username: {}", e);
                map_repo_error(e)
            })?
            .is_some();
        if username_taken {
            return Err(AuthError::DuplicateUser);
        }

        let email_taken = self
            .user_repository
            .find_by_email(&email)
            .await
            .map_err(|e| {
                error!("Failed to check email: {}", e);
                map_repo_error(e)
            })?
            .is_some();
        if email_taken {
            return Err(AuthError::DuplicateUser);
        }

        let password_hash = self.hashing_service.hash(password)?;

        let user = UserEntity::new(
            username.to_string(),
            email,
            password_hash,
            role.to_string(),
        );

        // The read-side checks above are racy; the store's uniqueness
        // constraint is authoritative, so a duplicate-write conflict here is
        // still the same user-visible conflict.
        let user = self.user_repository.insert(user).await.map_err(|e| {
            if e.is_duplicate() {
                AuthError::DuplicateUser
            } else {
                error!("Failed to insert user: {}", e);
                map_repo_error(e)
            }
        })?;

        info!("Registered user {}", user.id);
        Ok(user.id)
    }

    async fn login(&self, email: &str, password: &str) -> AuthResult<String> {
        let email = normalize_email(email);

        let user = self
            .user_repository
            .find_by_email(&email)
            .await
            .map_err(|e| {
                error!("Failed to find user by email: {}", e);
                map_repo_error(e)
            })?
            // Unknown account and wrong password must be indistinguishable.
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = self
            .hashing_service
            .verify(password, &user.password_hash)
            .unwrap_or_else(|e| {
                error!("Digest verification failed for user {}: {}", user.id, e);
                false
            });

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let role = Role::from_str(&user.role).map_err(|_| {
            error!("User {} has unrecognized stored role", user.id);
            AuthError::Validation("unrecognized role".into())
        })?;

        let session_token = self
            .token_service
            .issue_session(&user.id, role)
            .map_err(|e| {
                error!("Failed to issue session token: {}", e);
                e
            })?;

        Ok(session_token)
    }
}

/// Repository outages are the only retryable failure; everything else is an
/// internal data error.
fn map_repo_error(e: auth_data::AuthDataError) -> AuthError {
    match e {
        auth_data::AuthDataError::Unavailable(msg) => AuthError::Dependency(msg),
        other => AuthError::Data(other),
    }
}
