//! Field-level checks shared by the config sections

use crate::error::{ConfigError, Result};

/// Semantic checks run after deserialization. Each config section
/// implements it; [`crate::Config`] runs them all.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Validate that `value` lies within `min..=max`
pub fn validate_range(field: impl Into<String>, value: u64, min: u64, max: u64) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validate integer is above minimum
pub fn validate_positive(field: impl Into<String>, value: u64, min: u64) -> Result<()> {
    if value <= min {
        return Err(ConfigError::InvalidInteger {
            field: field.into(),
            value,
            min,
        });
    }
    Ok(())
}

/// Validate a non-empty absolute http(s) URL
pub fn validate_url(field: impl Into<String>, value: &str) -> Result<()> {
    if !is_absolute_http_url(value) {
        return Err(ConfigError::InvalidUrl {
            field: field.into(),
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate an endpoint path such as `/api/rag/search`
pub fn validate_path(field: impl Into<String>, value: &str) -> Result<()> {
    if !value.starts_with('/') {
        return Err(ConfigError::ValidationError {
            field: field.into(),
            message: format!("endpoint path must start with '/', got '{}'", value),
        });
    }
    Ok(())
}

/// True for `http://host...` / `https://host...` with a non-empty host part
pub fn is_absolute_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => {
            !rest.is_empty() && !rest.starts_with('/') && !rest.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_valid() {
        assert!(validate_range("test", 5, 1, 10).is_ok());
    }

    #[test]
    fn test_range_invalid() {
        assert!(validate_range("test", 11, 1, 10).is_err());
    }

    #[test]
    fn test_positive_valid() {
        assert!(validate_positive("test", 5, 0).is_ok());
    }

    #[test]
    fn test_positive_invalid() {
        assert!(validate_positive("test", 0, 0).is_err());
    }

    #[test]
    fn test_absolute_urls() {
        assert!(is_absolute_http_url("http://localhost:8000"));
        assert!(is_absolute_http_url(
            "https://terrorists-eyes-focused-reasonable.trycloudflare.com"
        ));
        assert!(!is_absolute_http_url(""));
        assert!(!is_absolute_http_url("localhost:8000"));
        assert!(!is_absolute_http_url("https://"));
        assert!(!is_absolute_http_url("ftp://example.com"));
    }

    #[test]
    fn test_path_requires_leading_slash() {
        assert!(validate_path("endpoints.health_check", "/health").is_ok());
        assert!(validate_path("endpoints.health_check", "health").is_err());
    }
}
