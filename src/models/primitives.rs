//! Primitive types and newtypes for type-safe API interactions.
//!
//! MangoPay identifies every entity with an opaque string id. The wrappers
//! here keep a user id from being passed where a wallet id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed API version segment of every resource path.
pub const VERSION_CODE: &str = "v2.01";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new id from a string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// A natural or legal user id.
    ///
    /// # Example
    ///
    /// ```
    /// use mangopay::UserId;
    ///
    /// let user = UserId::new("8494514");
    /// assert_eq!(user.to_string(), "8494514");
    /// ```
    UserId
);

string_id!(
    /// A wallet id.
    WalletId
);

string_id!(
    /// A card registration id.
    CardRegistrationId
);

string_id!(
    /// A transfer id.
    TransferId
);

string_id!(
    /// A hook (webhook) id.
    HookId
);

/// Environment configuration for the MangoPay API.
///
/// Determines which API endpoints to use - production or sandbox.
///
/// # Example
///
/// ```
/// use mangopay::Environment;
///
/// let env = Environment::Sandbox;
/// assert_eq!(env.api_base_url(), "https://api.sandbox.mangopay.com");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production environment - real money.
    #[default]
    Production,
    /// Sandbox (preproduction) environment for testing.
    Sandbox,
}

impl Environment {
    /// Get the base URL for REST API requests.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://api.mangopay.com",
            Environment::Sandbox => "https://api.sandbox.mangopay.com",
        }
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id() {
        let user = UserId::new("123");
        assert_eq!(user.as_str(), "123");
        assert_eq!(user.to_string(), "123");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let wallet: WalletId = "w-1".into();
        assert_eq!(serde_json::to_string(&wallet).unwrap(), "\"w-1\"");
    }

    #[test]
    fn test_environment_urls() {
        assert_eq!(
            Environment::Production.api_base_url(),
            "https://api.mangopay.com"
        );
        assert_eq!(
            Environment::Sandbox.api_base_url(),
            "https://api.sandbox.mangopay.com"
        );
        assert!(!Environment::default().is_sandbox());
    }
}
