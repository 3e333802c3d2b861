//! Bearer token acquisition and caching.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::header::CONTENT_TYPE;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::Mutex;

use super::storage::{StoredToken, TokenStorage};
use crate::client::Configuration;
use crate::models::VERSION_CODE;
use crate::{Error, Result};

/// Seconds shaved off `expires_in` so a token is never used at the edge of
/// its lifetime.
const EXPIRY_MARGIN_SECS: i64 = 10;

/// A bearer token obtained through the client-credentials exchange.
///
/// Only the [`TokenManager`] creates these.
#[derive(Clone)]
pub struct AuthorizationToken {
    token_type: String,
    access_token: SecretString,
    expires_at: DateTime<Utc>,
}

impl AuthorizationToken {
    pub(crate) fn new(
        token_type: impl Into<String>,
        access_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: SecretString::from(access_token.into()),
            expires_at,
        }
    }

    /// Token type as issued, normally `Bearer`.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// The raw access token.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// When this token stops being usable.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Check if the token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// `"<token_type> <access_token>"`, the `Authorization` header value.
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose_secret())
    }
}

impl std::fmt::Debug for AuthorizationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationToken")
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Fetches, caches and refreshes the bearer token for one configuration.
///
/// # Thread Safety
///
/// `get_token` holds an async mutex across the whole check-and-refresh, so
/// concurrent callers arriving while the token is stale trigger a single
/// exchange and all receive its result.
pub struct TokenManager {
    http: reqwest::Client,
    config: Arc<Configuration>,
    storage: Arc<dyn TokenStorage>,
    refresh: Mutex<()>,
}

impl TokenManager {
    /// Create a manager backed by the given storage.
    pub fn new(
        http: reqwest::Client,
        config: Arc<Configuration>,
        storage: Arc<dyn TokenStorage>,
    ) -> Self {
        Self {
            http,
            config,
            storage,
            refresh: Mutex::new(()),
        }
    }

    /// Return a valid token, exchanging credentials if none is cached or the
    /// cached one has expired.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the exchange fails at the
    /// transport level or the token endpoint answers with a non-2xx status.
    pub async fn get_token(&self) -> Result<AuthorizationToken> {
        let _guard = self.refresh.lock().await;
        let env_key = self.config.environment_key();

        match self.storage.get() {
            Ok(Some(stored)) if stored.environment_key == env_key => {
                let token = stored.into_token();
                if !token.is_expired() {
                    return Ok(token);
                }
                tracing::debug!(expires_at = %token.expires_at(), "cached token expired");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "could not read cached token, requesting a new one");
            }
        }

        let token = self.exchange().await?;
        if let Err(e) = self.storage.store(&StoredToken::from_token(&token, env_key)) {
            tracing::warn!(error = %e, "could not persist token");
        }
        Ok(token)
    }

    /// Forget the cached token; the next `get_token` performs an exchange.
    pub async fn invalidate(&self) -> Result<()> {
        let _guard = self.refresh.lock().await;
        self.storage.clear()
    }

    async fn exchange(&self) -> Result<AuthorizationToken> {
        let url = format!("{}/{}/oauth/token", self.config.root_url(), VERSION_CODE);
        tracing::debug!(%url, client_id = %self.config.client_id, "requesting access token");

        let response = self
            .http
            .post(&url)
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_passphrase.expose_secret()),
            )
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await
            .map_err(|e| Error::Authentication(format!("Token exchange request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            return Err(Error::Authentication(format!(
                "Token exchange failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Authentication(format!("Invalid token response: {}", e)))?;

        let expires_at = expiry_from(Utc::now(), token_response.expires_in).ok_or_else(|| {
            Error::Authentication(format!(
                "Invalid token expiry: expires_in = {}",
                token_response.expires_in
            ))
        })?;
        tracing::debug!(%expires_at, "access token issued");

        Ok(AuthorizationToken::new(
            token_response.token_type,
            token_response.access_token,
            expires_at,
        ))
    }
}

/// `now + expires_in - margin`, or `None` if it does not fit in a timestamp.
fn expiry_from(now: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    let lifetime = Duration::try_seconds(expires_in.saturating_sub(EXPIRY_MARGIN_SECS))?;
    now.checked_add_signed(lifetime)
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("client_id", &self.config.client_id)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
    expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryStorage;

    #[test]
    fn test_token_debug_redacts_secret() {
        let token = AuthorizationToken::new("Bearer", "super-secret-token", Utc::now());
        let debug_str = format!("{:?}", token);

        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[test]
    fn test_authorization_value() {
        let token = AuthorizationToken::new("Bearer", "abc", Utc::now());
        assert_eq!(token.authorization_value(), "Bearer abc");
    }

    #[test]
    fn test_expiry() {
        let past = AuthorizationToken::new("Bearer", "a", Utc::now() - Duration::seconds(1));
        let future = AuthorizationToken::new("Bearer", "a", Utc::now() + Duration::seconds(60));
        assert!(past.is_expired());
        assert!(!future.is_expired());
    }

    #[test]
    fn test_expiry_applies_margin() {
        let now = Utc::now();
        assert_eq!(expiry_from(now, 3600), Some(now + Duration::seconds(3590)));
        assert_eq!(expiry_from(now, 5), Some(now - Duration::seconds(5)));
    }

    #[test]
    fn test_expiry_out_of_range_is_none() {
        let now = Utc::now();
        assert_eq!(expiry_from(now, 9_000_000_000_000_000), None);
        assert_eq!(expiry_from(now, i64::MAX), None);
        assert_eq!(expiry_from(now, i64::MIN), None);
    }

    #[tokio::test]
    async fn test_cached_token_is_reused_without_exchange() {
        // Unroutable root URL: any exchange attempt would fail.
        let config = Arc::new(Configuration::new("id", "pass").with_root_url("http://127.0.0.1:1"));
        let storage = Arc::new(MemoryStorage::new());
        let cached = AuthorizationToken::new("Bearer", "cached", Utc::now() + Duration::hours(1));
        storage
            .store(&StoredToken::from_token(&cached, config.environment_key()))
            .unwrap();

        let manager = TokenManager::new(reqwest::Client::new(), config, storage);
        let token = manager.get_token().await.unwrap();
        assert_eq!(token.access_token(), "cached");
    }

    #[tokio::test]
    async fn test_token_for_other_environment_is_ignored() {
        let config = Arc::new(Configuration::new("id", "pass").with_root_url("http://127.0.0.1:1"));
        let storage = Arc::new(MemoryStorage::new());
        let cached = AuthorizationToken::new("Bearer", "other", Utc::now() + Duration::hours(1));
        storage
            .store(&StoredToken::from_token(&cached, "id@https://api.mangopay.com".to_string()))
            .unwrap();

        let manager = TokenManager::new(reqwest::Client::new(), config, storage);
        let err = manager.get_token().await.unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }
}
