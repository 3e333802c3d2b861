//! HTTP client and dispatch layer for the MangoPay API.
//!
//! [`MangoPayClient::dispatch`] is the single entry point every resource
//! call goes through.
//!
//! # Example
//!
//! ```no_run
//! use mangopay::{Configuration, Filters, HeaderSpec, MangoPayClient, Method};
//!
//! # async fn example() -> mangopay::Result<()> {
//! let client = MangoPayClient::new(Configuration::new("client-id", "passphrase"))?;
//!
//! let path = format!("{}/users", client.api_path());
//! let mut filters = Filters::new().per_page(5);
//! let users = client
//!     .dispatch(Method::Get, &path, &serde_json::json!({}), &mut filters, HeaderSpec::None, None)
//!     .await?;
//! println!("{} pages", filters.total_pages().unwrap_or(0));
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
pub mod paginated;
mod request;
mod user_agent;

pub use config::Configuration;
pub use http::{BeforeSend, MangoPayClient};
pub use paginated::{Page, PaginatedStream, DEFAULT_PAGE_SIZE};
pub use request::{
    Filters, HeaderSpec, Method, SortDirection, ITEMS_HEADER, PAGES_HEADER, TOTAL_ITEMS,
    TOTAL_PAGES,
};
pub use user_agent::{ClientInfo, USER_AGENT};
pub(crate) use http::ClientInner;
