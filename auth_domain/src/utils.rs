use regex::Regex;

/// Normalizes an email for storage and lookup: trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates an email address using regex and additional checks
pub fn is_valid_email(email: &str) -> bool {
    let email_regex = Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .expect("Failed to compile email regex");

    // Check length constraints
    if email.len() > 254 {
        return false;
    }

    if !email_regex.is_match(email) {
        return false;
    }

    // Check for consecutive dots
    if email.contains("..") {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    // Validate domain part
    let domain = parts[1];
    if domain.len() > 253 {
        return false;
    }

    let domain_parts: Vec<&str> = domain.split('.').collect();
    if domain_parts.len() < 2 {
        return false;
    }

    // Last part (TLD) should be at least 2 characters
    if domain_parts.last().map(|tld| tld.len() < 2).unwrap_or(true) {
        return false;
    }

    true
}
