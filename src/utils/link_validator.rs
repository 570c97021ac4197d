//! Validation of link creation input.
//!
//! All rules run on every call; the resulting error lists every violated
//! field rather than stopping at the first one.

use axum::http::HeaderValue;
use regex::Regex;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::utils::code_generator::is_reserved;

/// Custom codes: 6-8 ASCII letters or digits.
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Raw creation input, after trimming the custom code.
#[derive(Debug, Validate)]
struct LinkInput {
    #[validate(
        required(message = "Target URL is required"),
        url(message = "Enter a valid URL"),
        custom(function = "validate_redirectable")
    )]
    target_url: Option<String>,

    #[validate(
        regex(path = "*CODE_REGEX", message = "Code must be 6-8 alphanumeric characters"),
        custom(function = "validate_not_reserved")
    )]
    code: Option<String>,
}

/// Creation input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLinkInput {
    pub target_url: String,
    /// Trimmed custom code, if one was supplied.
    pub code: Option<String>,
}

/// Validates creation input and returns it normalized.
///
/// # Rules
///
/// - `target_url` must be present and parse as an absolute URL
/// - `target_url` must be usable verbatim as a `Location` header value
/// - `code`, when present, is trimmed and must match `^[A-Za-z0-9]{6,8}$`
/// - `code` must not be a reserved path segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] whose details name every failing field:
///
/// ```json
/// { "fields": { "targetUrl": ["Enter a valid URL"], "code": ["Code must be 6-8 alphanumeric characters"] } }
/// ```
pub fn validate_link_input(
    target_url: Option<String>,
    code: Option<String>,
) -> Result<ValidLinkInput, AppError> {
    let input = LinkInput {
        target_url,
        code: code.map(|c| c.trim().to_string()),
    };

    input.validate()?;

    let LinkInput { target_url, code } = input;
    let target_url = target_url.ok_or_else(|| {
        AppError::bad_request(
            "Validation failed",
            serde_json::json!({ "fields": { "targetUrl": ["Target URL is required"] } }),
        )
    })?;

    Ok(ValidLinkInput { target_url, code })
}

/// Rejects URLs that parse but cannot be sent back in a `Location` header,
/// such as ones with embedded newlines or non-ASCII characters.
fn validate_redirectable(url: &str) -> Result<(), ValidationError> {
    if HeaderValue::from_str(url).is_err() {
        return Err(ValidationError::new("not_redirectable")
            .with_message("URL must contain only printable ASCII characters".into()));
    }
    Ok(())
}

fn validate_not_reserved(code: &str) -> Result<(), ValidationError> {
    if is_reserved(code) {
        return Err(ValidationError::new("reserved").with_message("This code is reserved".into()));
    }
    Ok(())
}
