//! Configuration for the TAC API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use std::env;
use std::time::Duration;
use tac_core::retry::RetryConfig;

/// PostgREST path under a Supabase project URL
const REST_PATH: &str = "rest/v1";

/// Local Supabase stack started by `supabase start`
const LOCAL_SUPABASE_URL: &str = "http://localhost:54321";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development (typically localhost Supabase)
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from the `TAC_ENV` environment variable
    pub fn from_env() -> Self {
        Self::parse(&env::var("TAC_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }

    fn retry(self) -> RetryConfig {
        match self {
            Self::Development => RetryConfig::quick(),
            Self::Staging => RetryConfig::default(),
            Self::Production => RetryConfig::patient(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// PostgREST base URL, e.g. `https://<project>.supabase.co/rest/v1`
    pub rest_url: String,
    /// Supabase anonymous key (sent as `apikey` and bearer token)
    pub anon_key: Option<String>,
    /// Supabase service role key, preferred as bearer token when set
    pub service_role_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Turns a Supabase project URL into its PostgREST base URL
fn rest_url_for(project_url: &str) -> String {
    format!("{}/{REST_PATH}", project_url.trim_end_matches('/'))
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `TAC_API_URL`: PostgREST base URL (overrides `SUPABASE_URL`)
    /// - `SUPABASE_URL`: Supabase project URL
    /// - `SUPABASE_ANON_KEY`: Anonymous key
    /// - `SUPABASE_SERVICE_ROLE_KEY`: Service role key
    /// - `TAC_ENV`: Environment (development/staging/production)
    /// - `TAC_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let rest_url = match env::var("TAC_API_URL") {
            Ok(url) => url,
            Err(_) => match env::var("SUPABASE_URL") {
                Ok(url) => rest_url_for(&url),
                Err(_) if environment == Environment::Development => {
                    rest_url_for(LOCAL_SUPABASE_URL)
                }
                Err(_) => return Err(ApiError::missing_env("SUPABASE_URL")),
            },
        };

        let timeout = env::var("TAC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or(Duration::from_secs(30), Duration::from_secs);

        let config = Self {
            rest_url,
            anon_key: env::var("SUPABASE_ANON_KEY").ok(),
            service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
            timeout,
            retry: environment.retry(),
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local Supabase)
    #[must_use]
    pub fn development() -> Self {
        Self {
            rest_url: rest_url_for(LOCAL_SUPABASE_URL),
            anon_key: None,
            service_role_key: None,
            timeout: Duration::from_secs(10),
            retry: Environment::Development.retry(),
            environment: Environment::Development,
        }
    }

    /// Create configuration for a hosted Supabase project
    #[must_use]
    pub fn for_project(project_url: &str, anon_key: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url_for(project_url),
            anon_key: Some(anon_key.into()),
            service_role_key: None,
            timeout: Duration::from_secs(30),
            retry: Environment::Production.retry(),
            environment: Environment::Production,
        }
    }

    /// Builder-style method to set the PostgREST base URL
    #[must_use]
    pub fn with_rest_url(mut self, url: impl Into<String>) -> Self {
        self.rest_url = url.into();
        self
    }

    /// Builder-style method to set anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Token sent in the `Authorization` header, if any
    pub(crate) fn bearer_token(&self) -> Option<&str> {
        self.service_role_key.as_deref().or(self.anon_key.as_deref())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.rest_url.is_empty() {
            return Err(ApiError::config("rest_url cannot be empty"));
        }

        if !self.rest_url.starts_with("http://") && !self.rest_url.starts_with("https://") {
            return Err(ApiError::config("rest_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(ApiError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert_eq!(config.rest_url, "http://localhost:54321/rest/v1");
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_project_config() {
        let config = ClientConfig::for_project("https://abc.supabase.co/", "anon");
        assert_eq!(config.rest_url, "https://abc.supabase.co/rest/v1");
        assert_eq!(config.bearer_token(), Some("anon"));
        assert_eq!(config.retry, RetryConfig::patient());
    }

    #[test]
    fn test_service_role_preferred_as_bearer() {
        let mut config = ClientConfig::development().with_anon_key("anon");
        config.service_role_key = Some("service".to_string());
        assert_eq!(config.bearer_token(), Some("service"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::development()
            .with_rest_url("https://test.supabase.co/rest/v1")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.rest_url, "https://test.supabase.co/rest/v1");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::development().with_rest_url("").validate().is_err());
        assert!(ClientConfig::development().with_rest_url("ftp://x").validate().is_err());
        assert!(ClientConfig::development()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
        assert!(ClientConfig::development()
            .with_retry(RetryConfig { max_attempts: 0, ..RetryConfig::default() })
            .validate()
            .is_err());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("DEV"), Environment::Development);
        assert_eq!(Environment::parse("stage"), Environment::Staging);
        assert_eq!(Environment::parse(""), Environment::Production);
    }
}
