use regex::Regex;
use std::sync::LazyLock;

/// Message shown to the visitor when the address has the wrong shape.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

// RFC 5322 simplified: local@domain.tld, at least one dot in the domain
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email regex is valid")
});

/// Checks that `email` looks like a deliverable address.
///
/// Surrounding whitespace is ignored, so `" user@example.com "` passes.
/// The same check runs in the form controller and again on the server.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();

    if email.len() < 5 || email.len() > 254 {
        return false;
    }

    let Some((local, _domain)) = email.rsplit_once('@') else {
        return false;
    };
    if local.len() > 64 || local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    EMAIL_REGEX.is_match(email)
}

/// Normalized form used for storage and uniqueness: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates and normalizes in one step.
///
/// # Returns
///
/// * `Ok(String)` - The normalized address.
/// * `Err(&'static str)` - [`INVALID_EMAIL_MESSAGE`].
pub fn parse_email(raw: &str) -> Result<String, &'static str> {
    if !is_valid_email(raw) {
        return Err(INVALID_EMAIL_MESSAGE);
    }
    Ok(normalize_email(raw))
}
