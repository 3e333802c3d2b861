//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::models::{Environment, VERSION_CODE};
use crate::{Error, Result};

/// Static settings consumed by the token manager and the dispatcher.
///
/// Build one per process (or per MangoPay client account) and hand it to
/// [`MangoPayClient::new`](crate::MangoPayClient::new); it is never mutated
/// afterwards.
///
/// # Example
///
/// ```
/// use mangopay::Configuration;
///
/// let config = Configuration::new("my-client-id", "my-passphrase")
///     .with_preproduction(true);
///
/// assert_eq!(config.root_url(), "https://api.sandbox.mangopay.com");
/// assert_eq!(config.api_path(), "/v2.01/my-client-id");
/// ```
#[derive(Clone)]
pub struct Configuration {
    /// Talk to the sandbox instead of production
    pub preproduction: bool,
    /// Explicit base URL, taking precedence over `preproduction`
    pub root_url: Option<String>,
    /// MangoPay client id
    pub client_id: String,
    /// MangoPay API key
    pub client_passphrase: SecretString,
    /// Directory for the file-backed token cache
    pub temp_dir: Option<PathBuf>,
    /// Optional network timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl Configuration {
    /// Create a production configuration for the given credentials.
    pub fn new(client_id: impl Into<String>, client_passphrase: impl Into<String>) -> Self {
        Self {
            preproduction: false,
            root_url: None,
            client_id: client_id.into(),
            client_passphrase: SecretString::from(client_passphrase.into()),
            temp_dir: None,
            timeout: None,
        }
    }

    /// Load configuration from `MANGOPAY_*` environment variables.
    ///
    /// `MANGOPAY_CLIENT_ID` and `MANGOPAY_CLIENT_PASSPHRASE` are required;
    /// `MANGOPAY_PREPRODUCTION`, `MANGOPAY_ROOT_URL` and `MANGOPAY_TEMP_DIR`
    /// are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = lookup("MANGOPAY_CLIENT_ID")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Config("MANGOPAY_CLIENT_ID is not set".to_string()))?;
        let passphrase = lookup("MANGOPAY_CLIENT_PASSPHRASE")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Config("MANGOPAY_CLIENT_PASSPHRASE is not set".to_string()))?;

        let mut config = Self::new(client_id, passphrase);
        if let Some(flag) = lookup("MANGOPAY_PREPRODUCTION") {
            config.preproduction = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        config.root_url = lookup("MANGOPAY_ROOT_URL").filter(|v| !v.is_empty());
        config.temp_dir = lookup("MANGOPAY_TEMP_DIR")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Ok(config)
    }

    /// Switch between sandbox and production.
    pub fn with_preproduction(mut self, preproduction: bool) -> Self {
        self.preproduction = preproduction;
        self
    }

    /// Override the base URL.
    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.root_url = Some(root_url.into());
        self
    }

    /// Persist tokens as a JSON file under `dir`.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Set a network timeout for every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The environment selected by the `preproduction` flag.
    pub fn environment(&self) -> Environment {
        if self.preproduction {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    /// Effective base URL: the explicit override, else the environment URL.
    pub fn root_url(&self) -> &str {
        match &self.root_url {
            Some(url) => url.as_str(),
            None => self.environment().api_base_url(),
        }
    }

    /// `/v2.01/{client_id}`, the prefix of every resource path.
    pub fn api_path(&self) -> String {
        format!("/{}/{}", VERSION_CODE, self.client_id)
    }

    /// Key identifying tokens issued for this client id against this host.
    pub(crate) fn environment_key(&self) -> String {
        format!("{}@{}", self.client_id, self.root_url())
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("preproduction", &self.preproduction)
            .field("root_url", &self.root_url())
            .field("client_id", &self.client_id)
            .field("client_passphrase", &"[REDACTED]")
            .field("temp_dir", &self.temp_dir)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_root_url_selection() {
        let config = Configuration::new("id", "pass");
        assert!(!config.preproduction);
        assert_eq!(config.root_url(), "https://api.mangopay.com");

        let config = config.with_preproduction(true);
        assert_eq!(config.root_url(), "https://api.sandbox.mangopay.com");

        let config = config.with_root_url("http://localhost:9000");
        assert_eq!(config.root_url(), "http://localhost:9000");
    }

    #[test]
    fn test_api_path() {
        let config = Configuration::new("sdk-unit-tests", "pass");
        assert_eq!(config.api_path(), "/v2.01/sdk-unit-tests");
    }

    #[test]
    fn test_debug_redacts_passphrase() {
        let config = Configuration::new("id", "super-secret-passphrase");
        let debug_str = format!("{:?}", config);
        assert!(!debug_str.contains("super-secret-passphrase"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("MANGOPAY_CLIENT_ID", "sdk"),
            ("MANGOPAY_CLIENT_PASSPHRASE", "pass"),
            ("MANGOPAY_PREPRODUCTION", "true"),
            ("MANGOPAY_TEMP_DIR", "/tmp/mangopay"),
        ]
        .into_iter()
        .collect();

        let config = Configuration::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.client_id, "sdk");
        assert!(config.preproduction);
        assert_eq!(config.temp_dir, Some(PathBuf::from("/tmp/mangopay")));
        assert_eq!(config.root_url(), "https://api.sandbox.mangopay.com");
    }

    #[test]
    fn test_from_lookup_requires_credentials() {
        let err = Configuration::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_environment_key_tracks_host() {
        let a = Configuration::new("id", "p");
        let b = Configuration::new("id", "p").with_preproduction(true);
        assert_ne!(a.environment_key(), b.environment_key());
    }
}
