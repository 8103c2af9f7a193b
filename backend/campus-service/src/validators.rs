use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ServiceError, ServiceResult};

/// Input validation utilities for campus service

// Hardcoded pattern, compiled once
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid - fix source code")
});

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

/// Lowercased domain part of an address
pub fn email_domain(email: &str) -> Option<String> {
    email
        .rsplit_once('@')
        .map(|(_, domain)| domain.to_ascii_lowercase())
}

/// Trimmed copy of a required text field, `InvalidInput` when blank
pub fn require_text(field: &str, value: &str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Enforce a maximum length in characters
pub fn require_max_chars(field: &str, value: &str, max: usize) -> ServiceResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(ServiceError::InvalidInput(format!(
            "{field} is {len} characters, maximum is {max}"
        )));
    }
    Ok(())
}

/// Mask email for logging
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if local.chars().count() > 2 => {
            let first: String = local.chars().take(1).collect();
            format!("{first}***@{domain}")
        }
        Some((_, domain)) => format!("**@{domain}"),
        None => "***@***".to_string(),
    }
}
