//! # mangopay
//!
//! An async Rust client for the MangoPay payment API.
//!
//! Every resource call goes through a single dispatch layer that builds the
//! URL, attaches a cached bearer token, sends the JSON body and classifies
//! the response: only `200 OK` is a success, anything else becomes an
//! [`Error::Api`] carrying the URI, the status and the decoded body.
//!
//! ## Features
//!
//! - **Authentication**: client-credentials token exchange, cached in
//!   memory or on disk and refreshed once on expiry, even under concurrency
//! - **Idempotency**: per-call `Idempotency-Key` and replay of recorded
//!   responses with [`MangoPayClient::fetch_response`]
//! - **Pagination**: `total_pages` / `total_items` reported through
//!   [`Filters`], plus lazy [`PaginatedStream`]s
//! - **Resources**: users, wallets, transfers, card registrations, hooks,
//!   transactions and events
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mangopay::{Configuration, Filters, MangoPayClient};
//!
//! #[tokio::main]
//! async fn main() -> mangopay::Result<()> {
//!     let client = MangoPayClient::new(
//!         Configuration::new("client-id", "passphrase").with_preproduction(true),
//!     )?;
//!
//!     let mut filters = Filters::new().per_page(10);
//!     let users = client.users().list(&mut filters).await?;
//!     println!("{} of {:?} users", users.len(), filters.total_items());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Idempotent Calls
//!
//! ```rust,no_run
//! use mangopay::{MangoPayClient, UserId, WalletId};
//! use mangopay::models::{Money, NewTransfer};
//!
//! # async fn example(client: MangoPayClient) -> mangopay::Result<()> {
//! let transfer = NewTransfer {
//!     author_id: UserId::new("8494514"),
//!     credited_user_id: None,
//!     debited_funds: Money::new("EUR", 1000),
//!     fees: Money::zero("EUR"),
//!     debited_wallet_id: WalletId::new("8494559"),
//!     credited_wallet_id: WalletId::new("8494560"),
//!     tag: None,
//! };
//!
//! match client.transfers().create(&transfer, Some("transfer-42")).await {
//!     Ok(t) => println!("{:?}", t.status),
//!     Err(e) if e.is_server_error() => {
//!         // Find out whether the transfer went through.
//!         let recorded = client.fetch_response("transfer-42").await?;
//!         println!("{}", recorded);
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{AuthorizationToken, TokenManager};
pub use client::{
    Configuration, Filters, HeaderSpec, MangoPayClient, Method, PaginatedStream, SortDirection,
};
pub use error::{Error, Result};
pub use models::{
    CardRegistrationId, Environment, HookId, TransferId, UserId, WalletId, VERSION_CODE,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use mangopay::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::TransactionFilters;
    pub use crate::client::{
        Configuration, Filters, HeaderSpec, MangoPayClient, Method, SortDirection,
    };
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Ids
        CardRegistrationId, Environment, HookId, TransferId, UserId, WalletId,
        // Records
        CardRegistration, Event, Hook, LegalUser, Money, NaturalUser, Transaction, Transfer,
        User, Wallet,
        // Enums
        PersonType, TransactionStatus, TransactionType,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_code() {
        assert_eq!(VERSION_CODE, "v2.01");
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
    }
}
