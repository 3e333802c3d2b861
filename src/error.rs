//! Error types for the MangoPay API client.
//!
//! Only two kinds of failure cross the dispatch boundary for a well-formed
//! call: [`Error::Authentication`] when the token exchange fails, and
//! [`Error::Api`] when the service answers with anything other than `200 OK`.
//! Undecodable response bodies are not errors; they degrade to an empty
//! JSON object.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for MangoPay operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all MangoPay API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connection refused, TLS, timeout...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a status other than `200 OK`.
    #[error("API error: uri={uri}, status={status}, body={body}")]
    Api {
        /// Full request URI, query string included
        uri: String,
        /// Literal HTTP status code
        status: u16,
        /// Best-effort decoded body; an empty object if it was not valid JSON
        body: Value,
    },

    /// The client-credentials exchange with the token endpoint failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token storage could not be read or written
    #[error("Token storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Authentication(_) => true,
            Error::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::InvalidInput(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status carried by an [`Error::Api`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `Message` field MangoPay puts in its error bodies, if present.
    ///
    /// # Example
    ///
    /// ```
    /// use mangopay::Error;
    ///
    /// let err = Error::Api {
    ///     uri: "https://api.mangopay.com/v2.01/demo/users/1".into(),
    ///     status: 404,
    ///     body: serde_json::json!({ "Message": "Not found", "Type": "ressource_not_found" }),
    /// };
    /// assert_eq!(err.api_error_message(), Some("Not found"));
    /// ```
    pub fn api_error_message(&self) -> Option<&str> {
        match self {
            Error::Api { body, .. } => body.get("Message").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Per-field validation messages (`Errors` object) from an API error body.
    pub fn api_field_errors(&self) -> Vec<(String, String)> {
        match self {
            Error::Api { body, .. } => body
                .get("errors")
                .or_else(|| body.get("Errors"))
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(k, v)| {
                            let msg = v.as_str().map(String::from).unwrap_or_else(|| v.to_string());
                            (k.clone(), msg)
                        })
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, body: Value) -> Error {
        Error::Api {
            uri: "https://api.sandbox.mangopay.com/v2.01/sdk/users".to_string(),
            status,
            body,
        }
    }

    #[test]
    fn test_error_auth() {
        assert!(Error::Authentication("failed".into()).is_auth_error());
        assert!(api(401, Value::Null).is_auth_error());
        assert!(!api(400, Value::Null).is_auth_error());
        assert!(!Error::Config("x".into()).is_auth_error());
    }

    #[test]
    fn test_error_classes() {
        assert!(api(404, Value::Null).is_client_error());
        assert!(!api(404, Value::Null).is_server_error());
        assert!(api(503, Value::Null).is_server_error());
        assert!(Error::InvalidInput("bad".into()).is_client_error());
        assert_eq!(api(201, Value::Null).status(), Some(201));
        assert_eq!(Error::Storage("x".into()).status(), None);
    }

    #[test]
    fn test_field_errors() {
        let err = api(
            400,
            serde_json::json!({
                "Message": "One or several required parameters are missing or incorrect.",
                "errors": { "Email": "The Email field is required." }
            }),
        );

        assert_eq!(
            err.api_error_message(),
            Some("One or several required parameters are missing or incorrect.")
        );
        assert_eq!(
            err.api_field_errors(),
            vec![("Email".to_string(), "The Email field is required.".to_string())]
        );
    }

    #[test]
    fn test_display_includes_uri_and_status() {
        let msg = api(500, serde_json::json!({})).to_string();
        assert!(msg.contains("status=500"));
        assert!(msg.contains("/v2.01/sdk/users"));
    }
}
