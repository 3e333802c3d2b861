//! API service modules for MangoPay resources.
//!
//! Each service is a thin caller of the client's dispatch layer: it builds a
//! resource path under `/v2.01/{client_id}` and maps the decoded body into a
//! typed record.

mod card_registrations;
pub mod events;
mod hooks;
mod transactions;
mod transfers;
mod users;
mod wallets;

pub use card_registrations::CardRegistrationsService;
pub use events::EventsService;
pub use hooks::HooksService;
pub use transactions::{TransactionFilters, TransactionsService};
pub use transfers::TransfersService;
pub use users::UsersService;
pub use wallets::WalletsService;
