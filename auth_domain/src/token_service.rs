use crate::error::{AuthError, AuthResult};
use crate::models::{Role, SessionClaims};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

pub struct TokenConfig {
    pub secret: String,
    pub audience: Vec<String>,
    pub issuer: String,
    pub algorithm: Algorithm,
    pub session_ttl: Duration,
}

impl TokenConfig {
    /// Startup-time validation: an empty secret or a non-positive session ttl
    /// is fatal configuration, never a request-level failure.
    pub fn new(
        secret: String,
        audience: Vec<String>,
        issuer: String,
        algorithm: Algorithm,
        session_ttl: Duration,
    ) -> AuthResult<Self> {
        if secret.is_empty() {
            return Err(AuthError::Configuration("signing secret is empty".into()));
        }
        if audience.is_empty() {
            return Err(AuthError::Configuration("audience is empty".into()));
        }
        if session_ttl <= Duration::zero() {
            return Err(AuthError::Configuration(
                "session ttl must be positive".into(),
            ));
        }
        Ok(Self {
            secret,
            audience,
            issuer,
            algorithm,
            session_ttl,
        })
    }
}

/// Token service for issuing and verifying session tokens
///
/// Tokens are stateless: validity is purely a function of signature and
/// expiry at verification time. There is no revoked state; expiry is the only
/// invalidation the system trusts, a documented limitation.
pub trait TokenService: Send + Sync {
    /// Sign a token expiring at `now + ttl`. A zero ttl produces a token that
    /// is already expired when checked strictly after issuance.
    fn issue(&self, subject: &str, role: Role, ttl: Duration) -> AuthResult<String>;

    /// Sign a token with the configured session ttl.
    fn issue_session(&self, subject: &str, role: Role) -> AuthResult<String>;

    /// Verify signature, expiry, issuer and audience, returning the claims.
    fn verify(&self, token: &str) -> AuthResult<SessionClaims>;
}

pub struct JwtTokenService {
    config: TokenConfig,
}

impl JwtTokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self { config }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &str, role: Role, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience[0].clone(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        let key = EncodingKey::from_secret(self.config.secret.as_bytes());
        encode(&Header::new(self.config.algorithm), &claims, &key)
            .map_err(|_| AuthError::Configuration("token signing failed".into()))
    }

    fn issue_session(&self, subject: &str, role: Role) -> AuthResult<String> {
        self.issue(subject, role, self.config.session_ttl)
    }

    fn verify(&self, token: &str) -> AuthResult<SessionClaims> {
        let key = DecodingKey::from_secret(self.config.secret.as_bytes());
        let mut validation = Validation::new(self.config.algorithm);
        validation.set_audience(&self.config.audience);
        validation.set_issuer(&[&self.config.issuer]);
        // Expiry is exact; the default 60s leeway would keep dead tokens alive.
        validation.leeway = 0;

        jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn service() -> JwtTokenService {
        JwtTokenService::new(
            TokenConfig::new(
                "test-secret".to_string(),
                vec!["test-audience".to_string()],
                "test-issuer".to_string(),
                Algorithm::HS256,
                Duration::minutes(30),
            )
            .unwrap(),
        )
    }

    #[test]
    fn issued_token_verifies_with_subject_and_role() {
        let svc = service();
        let token = svc.issue_session("user-1", Role::Instructor).unwrap();

        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, Role::Instructor);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn zero_ttl_token_is_expired_when_checked_later() {
        let svc = service();
        let token = svc.issue("user-1", Role::Student, Duration::zero()).unwrap();

        // exp == iat; step past the issuance second so now > exp strictly.
        sleep(std::time::Duration::from_millis(1100));
        assert!(matches!(svc.verify(&token), Err(AuthError::ExpiredToken)));
    }

    #[test]
    fn tampered_signature_is_an_invalid_signature_error() {
        let svc = service();
        let token = svc.issue_session("user-1", Role::Student).unwrap();

        // Flip the first character of the signature segment; the final one
        // only carries base64 padding bits.
        let dot = token.rfind('.').unwrap();
        let sig_first = token.as_bytes()[dot + 1];
        let mut tampered = token[..=dot].to_string();
        tampered.push(if sig_first == b'A' { 'B' } else { 'A' });
        tampered.push_str(&token[dot + 2..]);

        assert!(matches!(
            svc.verify(&tampered),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn token_signed_with_a_different_secret_is_rejected() {
        let svc = service();
        let other = JwtTokenService::new(
            TokenConfig::new(
                "another-secret".to_string(),
                vec!["test-audience".to_string()],
                "test-issuer".to_string(),
                Algorithm::HS256,
                Duration::minutes(30),
            )
            .unwrap(),
        );

        let token = other.issue_session("user-1", Role::Admin).unwrap();
        assert!(matches!(
            svc.verify(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let svc = service();
        for bad in ["", "not-a-token", "a.b", "a.b.c.d"] {
            assert!(
                matches!(svc.verify(bad), Err(AuthError::MalformedToken)),
                "token {:?} should be malformed",
                bad
            );
        }
    }

    #[test]
    fn empty_secret_is_a_configuration_error() {
        let result = TokenConfig::new(
            String::new(),
            vec!["aud".to_string()],
            "iss".to_string(),
            Algorithm::HS256,
            Duration::minutes(30),
        );
        assert!(matches!(result, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn non_positive_session_ttl_is_a_configuration_error() {
        let result = TokenConfig::new(
            "secret".to_string(),
            vec!["aud".to_string()],
            "iss".to_string(),
            Algorithm::HS256,
            Duration::zero(),
        );
        assert!(matches!(result, Err(AuthError::Configuration(_))));
    }
}
