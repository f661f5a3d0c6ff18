//! Remote API configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Deployed experiment API used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://q3cyzs78u4.execute-api.us-east-1.amazonaws.com/dev";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL `{0}`: expected an http:// or https:// URL with a host")]
    InvalidBaseUrl(String),
}

/// Where the experiment API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_owned() }
    }
}

impl ApiConfig {
    /// Build a config from a base URL, dropping any trailing slashes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless the URL uses `http` or
    /// `https` and names a host.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .ok_or_else(|| ConfigError::InvalidBaseUrl(base_url.to_owned()))?;
        if host.is_empty() || host.starts_with('/') {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_owned()));
        }
        Ok(Self { base_url: trimmed.to_owned() })
    }

    /// Apply an optional override; blank values mean "use the default".
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for an invalid override.
    pub fn from_override(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an absolute API path (`/experiments`) onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
