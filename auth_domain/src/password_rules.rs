//! Password complexity policy checked at registration.

/// Complexity thresholds, built once at startup alongside the rest of the
/// process configuration.
#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_letter: bool,
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_letter: true,
            require_digit: true,
        }
    }
}

/// Checks a candidate password against the policy, returning the first rule
/// it violates.
pub fn check_password(policy: &PasswordPolicy, password: &str) -> Result<(), &'static str> {
    if password.len() < policy.min_length {
        return Err("password is too short");
    }
    if policy.require_letter && !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("password must contain a letter");
    }
    if policy.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("password must contain a digit");
    }
    Ok(())
}
