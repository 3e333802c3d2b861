//! Transactions service for wallet and user history.

use std::sync::Arc;

use crate::client::paginated::{PaginatedStream, PaginatedStreamBuilder, DEFAULT_PAGE_SIZE};
use crate::client::{ClientInner, Filters};
use crate::models::{Transaction, TransactionStatus, TransactionType, UserId, WalletId};
use crate::Result;

/// Service for transaction history.
///
/// # Example
///
/// ```no_run
/// use mangopay::{Filters, WalletId};
///
/// # async fn example(client: mangopay::MangoPayClient) -> mangopay::Result<()> {
/// let wallet = WalletId::new("8494559");
/// let mut filters = Filters::new().per_page(20);
///
/// let transactions = client.transactions().list_for_wallet(&wallet, &mut filters).await?;
/// println!("page 1 of {:?}", filters.total_pages());
/// for txn in transactions {
///     println!("{:?} {:?}", txn.transaction_type, txn.debited_funds);
/// }
/// # Ok(())
/// # }
/// ```
pub struct TransactionsService {
    inner: Arc<ClientInner>,
}

impl TransactionsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List one page of a wallet's transactions.
    pub async fn list_for_wallet(
        &self,
        wallet: &WalletId,
        filters: &mut Filters,
    ) -> Result<Vec<Transaction>> {
        self.inner
            .list(&format!("/wallets/{}/transactions", wallet), filters)
            .await
    }

    /// List one page of a user's transactions.
    pub async fn list_for_user(
        &self,
        user: &UserId,
        filters: &mut Filters,
    ) -> Result<Vec<Transaction>> {
        self.inner
            .list(&format!("/users/{}/transactions", user), filters)
            .await
    }

    /// Stream all transactions of a wallet.
    pub fn wallet_stream(
        &self,
        wallet: &WalletId,
        filters: Filters,
    ) -> PaginatedStream<Transaction> {
        let path = format!("/wallets/{}/transactions", wallet);
        PaginatedStreamBuilder::<Transaction>::new(self.inner.clone(), path)
            .per_page(DEFAULT_PAGE_SIZE)
            .build(filters)
    }
}

/// Filter helpers specific to transaction listings.
pub trait TransactionFilters {
    /// Only transactions with this status.
    fn status(self, status: TransactionStatus) -> Self;
    /// Only transactions of this type.
    fn transaction_type(self, kind: TransactionType) -> Self;
}

impl TransactionFilters for Filters {
    fn status(self, status: TransactionStatus) -> Self {
        self.with("Status", wire_name(&status))
    }

    fn transaction_type(self, kind: TransactionType) -> Self {
        self.with("Type", wire_name(&kind))
    }
}

fn wire_name<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        _ => String::new(),
    }
}
