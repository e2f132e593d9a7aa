use crate::error::{AuthError, AuthResult};
use rand::{thread_rng, RngCore};
use ring::pbkdf2;
use std::num::NonZeroU32;

static PBKDF2_ALG: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const CREDENTIAL_LEN: usize = ring::digest::SHA256_OUTPUT_LEN;

/// Digest format version marker. Bumped if the scheme ever changes so old
/// digests stay recognizable.
const DIGEST_SCHEME: &str = "pbkdf2-sha256";

/// Upper bound on plaintext length, so oversized inputs cannot pin a worker
/// on a deliberately slow key derivation.
pub const MAX_PASSWORD_LEN: usize = 512;

/// Work-factor configuration for the hasher, built once at startup and
/// injected. The iteration count is stored inside every digest, so raising it
/// later leaves previously stored digests verifiable.
#[derive(Clone, Copy)]
pub struct HasherConfig {
    pub iterations: NonZeroU32,
    pub salt_length: usize,
}

impl HasherConfig {
    pub fn new(iterations: u32, salt_length: usize) -> AuthResult<Self> {
        let iterations = NonZeroU32::new(iterations)
            .ok_or_else(|| AuthError::Configuration("hash iterations must be positive".into()))?;
        if salt_length < 8 {
            return Err(AuthError::Configuration(
                "salt length must be at least 8 bytes".into(),
            ));
        }
        Ok(Self {
            iterations,
            salt_length,
        })
    }
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            iterations: NonZeroU32::new(600_000).unwrap(),
            salt_length: 16,
        }
    }
}

pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> AuthResult<String>;
    fn verify(&self, plaintext: &str, digest: &str) -> AuthResult<bool>;
}

#[derive(Clone)]
pub struct Pbkdf2HashingService {
    config: HasherConfig,
}

impl Pbkdf2HashingService {
    pub fn new(config: HasherConfig) -> Self {
        Self { config }
    }
}

impl Default for Pbkdf2HashingService {
    fn default() -> Self {
        Self::new(HasherConfig::default())
    }
}

impl PasswordHasher for Pbkdf2HashingService {
    /// Derives a salted digest: `pbkdf2-sha256$<iterations>$<salt>$<hash>`.
    /// The salt is fresh per call, so equal passwords never share a digest.
    fn hash(&self, plaintext: &str) -> AuthResult<String> {
        if plaintext.is_empty() || plaintext.len() > MAX_PASSWORD_LEN {
            return Err(AuthError::InvalidPasswordInput);
        }

        let mut salt = vec![0u8; self.config.salt_length];
        thread_rng().fill_bytes(&mut salt);

        let mut derived = [0u8; CREDENTIAL_LEN];
        pbkdf2::derive(
            PBKDF2_ALG,
            self.config.iterations,
            &salt,
            plaintext.as_bytes(),
            &mut derived,
        );

        Ok(format!(
            "{}${}${}${}",
            DIGEST_SCHEME,
            self.config.iterations,
            hex::encode(salt),
            hex::encode(derived)
        ))
    }

    /// Constant-time verification via `ring::pbkdf2::verify`. A mismatch is
    /// `Ok(false)`; only a structurally broken digest is an error.
    fn verify(&self, plaintext: &str, digest: &str) -> AuthResult<bool> {
        let parts: Vec<&str> = digest.split('$').collect();
        if parts.len() != 4 || parts[0] != DIGEST_SCHEME {
            return Err(AuthError::CorruptDigest);
        }

        let iterations: NonZeroU32 = parts[1].parse().map_err(|_| AuthError::CorruptDigest)?;
        let salt = hex::decode(parts[2]).map_err(|_| AuthError::CorruptDigest)?;
        let expected = hex::decode(parts[3]).map_err(|_| AuthError::CorruptDigest)?;
        if expected.len() != CREDENTIAL_LEN {
            return Err(AuthError::CorruptDigest);
        }

        Ok(pbkdf2::verify(
            PBKDF2_ALG,
            iterations,
            &salt,
            plaintext.as_bytes(),
            &expected,
        )
        .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keep test hashing fast; production default is much higher.
    fn fast_hasher() -> Pbkdf2HashingService {
        Pbkdf2HashingService::new(HasherConfig::new(2, 16).unwrap())
    }

    #[test]
    fn hash_then_verify_succeeds() {
        let hasher = fast_hasher();
        let digest = hasher.hash("Passw0rd").unwrap();
        assert!(hasher.verify("Passw0rd", &digest).unwrap());
    }

    #[test]
    fn wrong_password_fails_without_error() {
        let hasher = fast_hasher();
        let digest = hasher.hash("Passw0rd").unwrap();
        assert!(!hasher.verify("OtherPw1", &digest).unwrap());
    }

    #[test]
    fn same_password_yields_distinct_digests() {
        let hasher = fast_hasher();
        let first = hasher.hash("Passw0rd").unwrap();
        let second = hasher.hash("Passw0rd").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("Passw0rd", &first).unwrap());
        assert!(hasher.verify("Passw0rd", &second).unwrap());
    }

    #[test]
    fn empty_and_oversized_plaintext_are_rejected() {
        let hasher = fast_hasher();
        assert!(matches!(
            hasher.hash(""),
            Err(AuthError::InvalidPasswordInput)
        ));
        let oversized = "a".repeat(MAX_PASSWORD_LEN + 1);
        assert!(matches!(
            hasher.hash(&oversized),
            Err(AuthError::InvalidPasswordInput)
        ));
    }

    #[test]
    fn malformed_digest_is_a_corrupt_digest_error() {
        let hasher = fast_hasher();
        for bad in [
            "",
            "not-a-digest",
            "md5$2$aabb$ccdd",
            "pbkdf2-sha256$0$aabb$ccdd",
            "pbkdf2-sha256$2$zz$ccdd",
            "pbkdf2-sha256$2$aabb$ccdd",
        ] {
            assert!(
                matches!(hasher.verify("pw", bad), Err(AuthError::CorruptDigest)),
                "digest {:?} should be corrupt",
                bad
            );
        }
    }

    #[test]
    fn digests_survive_a_work_factor_bump() {
        let old = Pbkdf2HashingService::new(HasherConfig::new(2, 16).unwrap());
        let digest = old.hash("Passw0rd").unwrap();

        let raised = Pbkdf2HashingService::new(HasherConfig::new(4, 16).unwrap());
        assert!(raised.verify("Passw0rd", &digest).unwrap());
    }

    #[test]
    fn zero_iterations_is_a_configuration_error() {
        assert!(matches!(
            HasherConfig::new(0, 16),
            Err(AuthError::Configuration(_))
        ));
    }
}
