//! Request authorization: bearer extraction, token verification, role gates.

use crate::error::{AuthError, AuthResult};
use crate::models::{AuthContext, Role};
use crate::token_service::TokenService;
use std::sync::Arc;
use tracing::debug;

const BEARER_PREFIX: &str = "Bearer ";

/// Verifies bearer tokens and resolves the request identity.
///
/// `authenticate` returns an [`AuthContext`] value the caller threads through
/// the rest of the request's handling; nothing is attached to shared mutable
/// request state.
pub struct AccessControl {
    token_service: Arc<dyn TokenService>,
}

impl AccessControl {
    pub fn new(token_service: Arc<dyn TokenService>) -> Self {
        Self { token_service }
    }

    /// Resolve the identity asserted by an `Authorization` header value.
    ///
    /// A missing header or a non-bearer scheme is [`AuthError::MissingToken`];
    /// token failures propagate with their specific variant, and the boundary
    /// mapping collapses all of them to one unauthorized response.
    pub fn authenticate(&self, authorization: Option<&str>) -> AuthResult<AuthContext> {
        let header = authorization.ok_or(AuthError::MissingToken)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.token_service.verify(token)?;

        debug!("Authenticated subject {}", claims.sub);
        Ok(AuthContext {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Role gate, evaluated only after successful token verification.
///
/// Pure and synchronous; no side effects.
pub fn require_role(context: &AuthContext, allowed: &[Role]) -> AuthResult<()> {
    if allowed.contains(&context.role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
