//! Client configuration
//!
//! The base service URL and the project id that every dispatch needs are
//! held here and injected into the client, never read from the process
//! environment at call sites. Both are optional at construction
//! so that a misconfigured deployment fails on first use with a clear
//! configuration error instead of at startup.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the base service URL
pub const ENV_BASE_URL: &str = "ANYX_URL";

/// Environment variable holding the project id
pub const ENV_PROJECT_ID: &str = "ANYX_PROJECT_ID";

/// Connection settings for the Anyx query proxy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnyxConfig {
    /// Base service URL, e.g. `https://proxy.example.com`
    pub base_url: Option<String>,
    /// Opaque id of the project the requests target
    pub project_id: Option<String>,
}

impl AnyxConfig {
    /// Create a config with both required values set
    pub fn new(base_url: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            project_id: Some(project_id.into()),
        }
    }

    /// Read the config from `ANYX_URL` / `ANYX_PROJECT_ID`. Absent or empty
    /// variables are left unset; the error is reported when the first query
    /// executes, not here.
    pub fn from_env() -> Self {
        Self {
            base_url: read_env(ENV_BASE_URL),
            project_id: read_env(ENV_PROJECT_ID),
        }
    }

    /// Resolve the full query endpoint. Validates both required values on
    /// every call so a config fixed at runtime is picked up immediately.
    pub fn query_endpoint(&self) -> ClientResult<String> {
        let base_url = self
            .base_url
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ClientError::configuration("base service URL is not set"))?;
        let project_id = self
            .project_id
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ClientError::configuration("project id is not set"))?;

        Ok(format!(
            "{}/api/projects/{}/query",
            base_url.trim_end_matches('/'),
            project_id
        ))
    }
}

fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url_and_project() {
        let config = AnyxConfig::new("https://proxy.example.com", "bookharmony");
        assert_eq!(
            config.query_endpoint().unwrap(),
            "https://proxy.example.com/api/projects/bookharmony/query"
        );
    }

    #[test]
    fn test_trailing_slash_does_not_double_up() {
        let config = AnyxConfig::new("https://proxy.example.com/", "demo");
        assert_eq!(
            config.query_endpoint().unwrap(),
            "https://proxy.example.com/api/projects/demo/query"
        );
    }

    #[test]
    fn test_missing_base_url_is_a_configuration_error() {
        let config = AnyxConfig {
            base_url: None,
            project_id: Some("demo".to_string()),
        };
        let err = config.query_endpoint().unwrap_err();
        assert!(matches!(err, ClientError::Configuration { .. }));
        assert!(err.to_string().contains("base service URL"));
    }

    #[test]
    fn test_missing_project_id_is_a_configuration_error() {
        let config = AnyxConfig {
            base_url: Some("https://proxy.example.com".to_string()),
            project_id: None,
        };
        let err = config.query_endpoint().unwrap_err();
        assert!(err.to_string().contains("project id"));
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let config = AnyxConfig::new("", "demo");
        assert!(config.query_endpoint().is_err());
    }

    #[test]
    fn test_from_env_reads_both_variables() {
        std::env::set_var(ENV_BASE_URL, "https://env.example.com");
        std::env::set_var(ENV_PROJECT_ID, "env-project");

        let config = AnyxConfig::from_env();
        assert_eq!(config.base_url.as_deref(), Some("https://env.example.com"));
        assert_eq!(config.project_id.as_deref(), Some("env-project"));

        std::env::remove_var(ENV_BASE_URL);
        std::env::remove_var(ENV_PROJECT_ID);
    }
}
