//! Data models for the MangoPay API.
//!
//! Thin records mapped from MangoPay's PascalCase JSON:
//!
//! - [`primitives`] - Ids, API version and environments
//! - [`enums`] - Statuses and kinds
//! - [`user`] - Natural and legal users
//! - [`wallet`] - Wallets and money amounts
//! - [`transfer`] - Transfers and transactions
//! - [`card`] - Card registrations
//! - [`hook`] - Hooks and events

pub mod primitives;
pub mod enums;
pub mod user;
pub mod wallet;
pub mod transfer;
pub mod card;
pub mod hook;

pub use primitives::*;
pub use enums::*;
pub use user::*;
pub use wallet::*;
pub use transfer::*;
pub use card::*;
pub use hook::*;
