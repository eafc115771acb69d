//! Short code generation and validation utilities.
//!
//! Random codes are six characters of URL-safe base64 drawn from the operating
//! system's CSPRNG. Custom aliases are validated against the same alphabet so every
//! code is a valid store key and a single URL path segment.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of a generated code in characters; 6 base64url characters keep 36 of the
/// 48 drawn bits.
pub const CODE_LENGTH: usize = 6;

/// Random bytes drawn per code. 48 bits encode to 8 characters; truncation to
/// [`CODE_LENGTH`] discards the last 12.
const CODE_RANDOM_BYTES: usize = 6;

/// Upper bound on custom alias length.
pub const MAX_ALIAS_LENGTH: usize = 64;

/// Codes that would shadow routes of the HTTP surface.
pub const RESERVED_CODES: &[&str] = &["shorten", "health"];

/// Generates a random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64 without
/// padding. Collisions are not checked here.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = random_code()?;
/// assert_eq!(code.len(), 6);
/// ```
pub fn random_code() -> Result<String, AppError> {
    let mut buffer = [0u8; CODE_RANDOM_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(CODE_LENGTH);

    Ok(code)
}

/// Returns true if `code` collides with a route of the HTTP surface.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved code
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() {
        return Err(AppError::bad_request(
            "Custom alias must not be empty",
            json!({}),
        ));
    }

    if alias.len() > MAX_ALIAS_LENGTH {
        return Err(AppError::bad_request(
            format!("Custom alias must be at most {MAX_ALIAS_LENGTH} characters"),
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    if is_reserved(alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
