//! Field-level input validation
//!
//! Checks are collected rather than short-circuited so a client sees every
//! violated field in one response.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Longest address accepted (RFC 5321 path limit)
const MAX_EMAIL_LEN: usize = 254;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,63}$",
        )
        .expect("email pattern is a valid regex")
    })
}

/// Check an address against a standard email grammar
///
/// Requires a dotted domain with an alphabetic TLD; the local part may not
/// start or end with a dot or contain consecutive dots.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN || !email_pattern().is_match(email) {
        return false;
    }

    match email.rsplit_once('@') {
        Some((local, _)) => {
            local.len() <= 64
                && !local.starts_with('.')
                && !local.ends_with('.')
                && !local.contains("..")
        }
        None => false,
    }
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Request field name
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

/// Accumulates violations across several field checks
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.items.push(FieldViolation {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Require at least `min` characters
    pub fn min_length(&mut self, field: &str, value: &str, min: usize) -> &mut Self {
        if value.chars().count() < min {
            self.push(field, format!("{field} must be at least {min} characters"));
        }
        self
    }

    /// Require a well-formed email address
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !is_valid_email(value) {
            self.push(field, "Invalid email address");
        }
        self
    }

    /// `Ok` when nothing was recorded, otherwise every violation in check order
    pub fn finish(self) -> Result<(), Vec<FieldViolation>> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(self.items)
        }
    }
}
