//! API configuration.
//!
//! The browser build bakes the API location in at compile time through
//! `CODEPAD_API_URL`. The server reads the same variables at start-up with
//! `Config::from_env()` after calling `dotenvy::dotenv()`, and hands the result
//! to the rendered app as an `ApiConfig` context.

use thiserror::Error;

use super::session::SessionRoutes;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Where the identity and code-execution services live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Optional server-side session revocation endpoint, called on logout
    pub logout_path: Option<String>,
}

impl ApiConfig {
    /// Values fixed at compile time
    pub fn from_build() -> Self {
        Self {
            base_url: option_env!("CODEPAD_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            logout_path: option_env!("CODEPAD_LOGOUT_PATH").map(str::to_string),
        }
    }

    /// Default routes plus the configured revoke endpoint
    pub fn session_routes(&self) -> SessionRoutes {
        SessionRoutes {
            revoke_endpoint: self.logout_path.clone(),
            ..SessionRoutes::default()
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("CODEPAD_API_URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
    #[error("CODEPAD_LOGOUT_PATH must start with '/', got {0:?}")]
    InvalidLogoutPath(String),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity/code-execution API base URL
    /// Example: https://api.example.com/api/v1
    pub api_url: String,

    /// Session revocation endpoint relative to `api_url`
    /// Example: /auth/logout
    pub logout_path: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("CODEPAD_API_URL").ok(),
            std::env::var("CODEPAD_LOGOUT_PATH").ok(),
        )
    }

    fn from_vars(api_url: Option<String>, logout_path: Option<String>) -> Self {
        Self {
            api_url: api_url
                .filter(|url| !url.trim().is_empty())
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            logout_path: logout_path
                .map(|path| path.trim().to_string())
                .filter(|path| !path.is_empty()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        match &self.logout_path {
            Some(path) if !path.starts_with('/') => {
                Err(ConfigError::InvalidLogoutPath(path.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Check if a revocation endpoint is configured
    pub fn has_logout_path(&self) -> bool {
        self.logout_path.is_some()
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            logout_path: self.logout_path.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
