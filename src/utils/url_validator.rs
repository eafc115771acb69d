//! Target URL validation.
//!
//! URLs are stored exactly as submitted; validation only decides whether the input
//! is an absolute URL with a scheme and a host.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is a well-formed absolute URL.
///
/// The parser ignores leading and trailing whitespace, so `"  https://a.example"`
/// validates; callers that store the input trim it first.
///
/// # Errors
///
/// Returns [`UrlValidationError::Empty`] for an empty string,
/// [`UrlValidationError::InvalidFormat`] for unparsable or relative input and
/// [`UrlValidationError::MissingHost`] for URLs such as `mailto:` or `file:///`.
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://example.com/path?q=1#frag").is_ok());
    }

    #[test]
    fn test_accepts_other_schemes_with_host() {
        assert!(validate_url("ftp://files.example.com/a.txt").is_ok());
    }

    #[test]
    fn test_parser_ignores_surrounding_whitespace() {
        let url = validate_url("  https://example.com ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(validate_url(""), Err(UrlValidationError::Empty)));
    }

    #[test]
    fn test_rejects_plain_text() {
        assert!(matches!(
            validate_url("not a url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            validate_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(validate_url("example.com").is_err());
    }

    #[test]
    fn test_rejects_hostless_schemes() {
        assert!(matches!(
            validate_url("mailto:someone@example.com"),
            Err(UrlValidationError::MissingHost)
        ));
        assert!(matches!(
            validate_url("javascript:alert(1)"),
            Err(UrlValidationError::MissingHost)
        ));
        assert!(validate_url("file:///etc/passwd").is_err());
    }
}
