//! Client configuration.
//!
//! [`Config`] is deserializable (for fixture and config files) and can be read
//! from the environment through an [`EnvReader`], so tests never touch the
//! real process environment.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Environment variable holding the service base url.
pub const URL_VAR: &str = "PAGEWISE_URL";
/// Environment variable holding the default page size.
pub const PER_PAGE_VAR: &str = "PAGEWISE_PER_PAGE";

const DEFAULT_URL: &str = "http://localhost/api/v2";

/// Settings shared by every collection created from one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base url of the service, used to build page locations.
    pub url: String,
    /// Page size sent with first-page requests that do not set one.
    pub per_page: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url: DEFAULT_URL.to_string(),
            per_page: None,
        }
    }
}

impl Config {
    /// Sets the base url.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the default page size.
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Reads overrides from the environment on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `PAGEWISE_PER_PAGE` is not a positive
    /// integer.
    pub fn from_env(env: &dyn EnvReader) -> Result<Self> {
        let mut config = Config::default();

        if let Some(url) = env.var(URL_VAR).filter(|u| !u.trim().is_empty()) {
            config.url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = env.var(PER_PAGE_VAR) {
            let per_page = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| Error::Config {
                    key: PER_PAGE_VAR.to_string(),
                    reason: format!("expected a positive integer, got '{raw}'"),
                })?;
            config.per_page = Some(per_page);
        }

        Ok(config)
    }
}

/// Abstraction over environment variables.
pub trait EnvReader: Send + Sync {
    /// Get an environment variable value.
    fn var(&self, name: &str) -> Option<String>;
}

/// Real environment variable reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealEnv;

impl EnvReader for RealEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed environment for tests.
#[derive(Debug, Default, Clone)]
pub struct MockEnv {
    vars: HashMap<String, String>,
}

impl MockEnv {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvReader for MockEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        let config = Config::from_env(&MockEnv::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.url, "http://localhost/api/v2");
        assert_eq!(config.per_page, None);
    }

    #[test]
    fn reads_overrides() {
        let env = MockEnv::new()
            .with_var(URL_VAR, "https://support.example.com/api/v2/")
            .with_var(PER_PAGE_VAR, " 25 ");
        let config = Config::from_env(&env).unwrap();
        assert_eq!(config.url, "https://support.example.com/api/v2");
        assert_eq!(config.per_page, Some(25));
    }

    #[test]
    fn rejects_bad_page_size() {
        for raw in ["zero", "0", "-3"] {
            let env = MockEnv::new().with_var(PER_PAGE_VAR, raw);
            let err = Config::from_env(&env).unwrap_err();
            assert!(matches!(err, Error::Config { ref key, .. } if key == PER_PAGE_VAR));
        }
    }

    #[test]
    fn deserializes_partial_json() {
        let config: Config = serde_json::from_str(r#"{"per_page": 2}"#).unwrap();
        assert_eq!(config.per_page, Some(2));
        assert_eq!(config.url, "http://localhost/api/v2");
    }
}
