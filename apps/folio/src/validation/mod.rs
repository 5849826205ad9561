//! Advisory validators for form inputs.
//!
//! Every validator treats an empty value as valid: all of these fields are
//! optional. Results are only ever used to render inline hints; the store
//! accepts any value regardless of what these functions say.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

pub mod forms;

pub use forms::{
    validate_contact, validate_document, validate_hero, validate_project_links, DocumentReport,
    FormValidation,
};

pub const EMAIL_ERROR: &str = "Please enter a valid email address";
pub const URL_ERROR: &str = "Please enter a valid URL";
pub const PHONE_ERROR: &str = "Please enter a valid phone number";

const MIN_PHONE_DIGITS: usize = 10;
const MIN_URL_LEN: usize = 4;
const MIN_HOST_LEN: usize = 5;
const MIN_LABEL_LEN: usize = 2;

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    pub valid: bool,
    /// Human-readable reason; empty when valid.
    pub error: String,
}

impl FieldValidation {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: String::new(),
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: error.into(),
        }
    }

    fn check(valid: bool, error: &str) -> Self {
        if valid {
            Self::ok()
        } else {
            Self::invalid(error)
        }
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9\s+().\-]+$").expect("phone pattern"))
}

fn hostname_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9.\-]+$").expect("hostname pattern"))
}

/// `local@domain.tld` shape; empty is valid.
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || email_pattern().is_match(email)
}

/// Accepts URLs with or without a scheme (`https://` is assumed).
///
/// The host must contain a dot, use only letters, digits, dots and dashes,
/// be at least 5 characters long, and its last two labels must each be at
/// least 2 characters. This rejects `x.y`, `a.com` and bare words.
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    let url = url.trim();
    if url.chars().any(char::is_whitespace) || url.len() < MIN_URL_LEN {
        return false;
    }

    let candidate = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    let Ok(parsed) = Url::parse(&candidate) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let domain = labels[labels.len() - 2];
    let tld = labels[labels.len() - 1];
    if domain.len() < MIN_LABEL_LEN || tld.len() < MIN_LABEL_LEN {
        return false;
    }

    hostname_pattern().is_match(host) && host.len() >= MIN_HOST_LEN
}

/// Digits plus ` + - ( ) .` separators, with at least ten digits; empty is valid.
pub fn is_valid_phone(phone: &str) -> bool {
    if phone.is_empty() {
        return true;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    phone_pattern().is_match(phone) && digits >= MIN_PHONE_DIGITS
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_required(value: &str, field_name: &str) -> FieldValidation {
    FieldValidation::check(!is_blank(value), &format!("{field_name} is required"))
}

pub fn validate_email(email: &str) -> FieldValidation {
    FieldValidation::check(is_valid_email(email), EMAIL_ERROR)
}

pub fn validate_url(url: &str) -> FieldValidation {
    FieldValidation::check(is_valid_url(url), URL_ERROR)
}

pub fn validate_phone(phone: &str) -> FieldValidation {
    FieldValidation::check(is_valid_phone(phone), PHONE_ERROR)
}
