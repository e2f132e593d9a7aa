pub mod access;
pub mod error;
pub mod hashing_service;
pub mod models;
pub mod password_rules;
pub mod service;
pub mod token_service;
mod utils;

pub use access::{require_role, AccessControl};
pub use error::{AuthError, AuthResult};
pub use hashing_service::{HasherConfig, PasswordHasher, Pbkdf2HashingService};
pub use models::{AuthContext, Role, SessionClaims};
pub use password_rules::PasswordPolicy;
pub use service::{AuthService, AuthServiceImpl};
pub use token_service::{JwtTokenService, TokenConfig, TokenService};
