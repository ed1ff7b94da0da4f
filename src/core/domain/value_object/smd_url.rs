use crate::core::domain::error::ValidationError;
use std::collections::HashSet;

/// Represents the constraints applied to an SMD base URL
///
/// A base URL names the root of one SMD instance (e.g. `http://smd:27779`).
/// API paths such as `hsm/v2/State/Components` are appended with
/// [`SmdUrl::join`].
#[derive(Debug, Clone)]
pub(crate) struct SmdUrlConfig {
    allowed_schemes: HashSet<String>,
    max_length: usize,
}

impl Default for SmdUrlConfig {
    fn default() -> Self {
        let mut schemes = HashSet::new();
        schemes.insert("https".to_string());
        schemes.insert("http".to_string());

        Self {
            allowed_schemes: schemes,
            max_length: 2083, // RFC 7230 standard
        }
    }
}

/// A validated base URL of an SMD instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmdUrl(String);

impl SmdUrl {
    /// Parses and validates a base URL.
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        validate_url(&url, &SmdUrlConfig::default())?;
        Ok(Self(url.trim_end_matches('/').to_string()))
    }

    /// Creates a URL without validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(url: String) -> Self {
        Self(url.trim_end_matches('/').to_string())
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends an API path to the base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}

impl std::fmt::Display for SmdUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates a base URL against the configured constraints.
pub(crate) fn validate_url(url: &str, config: &SmdUrlConfig) -> Result<(), ValidationError> {
    if url.is_empty() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL cannot be empty".to_string(),
        });
    }

    if url.len() > config.max_length {
        return Err(ValidationError::Format(format!(
            "URL exceeds maximum length of {} characters",
            config.max_length
        )));
    }

    let parsed = url::Url::parse(url)
        .map_err(|e| ValidationError::Format(format!("Invalid URL format: {}", e)))?;

    if !config.allowed_schemes.contains(parsed.scheme()) {
        let mut schemes: Vec<&str> = config.allowed_schemes.iter().map(String::as_str).collect();
        schemes.sort_unstable();
        return Err(ValidationError::ConstraintViolation(format!(
            "Invalid scheme. Must be one of: {}",
            schemes.join(", ")
        )));
    }

    if parsed.host_str().is_none() {
        return Err(ValidationError::Field {
            field: "url".to_string(),
            message: "URL must include a host".to_string(),
        });
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::ConstraintViolation(
            "Base URL cannot carry a query or fragment".to_string(),
        ));
    }

    Ok(())
}
