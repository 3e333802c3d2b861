//! Authentication for the MangoPay API.
//!
//! MangoPay uses the OAuth2 client-credentials grant: the client id and API
//! passphrase are exchanged for a short-lived bearer token, which is then
//! sent on every request. [`TokenManager`] performs the exchange, caches the
//! result in a [`TokenStorage`] and refreshes it once it expires.
//!
//! ```no_run
//! use mangopay::{Configuration, MangoPayClient};
//!
//! # async fn example() -> mangopay::Result<()> {
//! let client = MangoPayClient::new(
//!     Configuration::new("client-id", "passphrase").with_preproduction(true),
//! )?;
//!
//! let token = client.token_manager().get_token().await?;
//! println!("token valid until {}", token.expires_at());
//! # Ok(())
//! # }
//! ```

mod storage;
mod token;

pub use storage::{FileStorage, MemoryStorage, StoredToken, TokenStorage, TOKEN_FILE_NAME};
pub use token::{AuthorizationToken, TokenManager};
