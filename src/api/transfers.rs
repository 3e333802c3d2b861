//! Transfers service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{NewTransfer, Transfer, TransferId};
use crate::Result;

/// Service for wallet-to-wallet transfers.
pub struct TransfersService {
    inner: Arc<ClientInner>,
}

impl TransfersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Move funds between two wallets.
    ///
    /// Pass an idempotency key to make retries of the same transfer safe;
    /// the recorded response can be read back with
    /// [`MangoPayClient::fetch_response`](crate::MangoPayClient::fetch_response).
    pub async fn create(
        &self,
        transfer: &NewTransfer,
        idempotency_key: Option<&str>,
    ) -> Result<Transfer> {
        self.inner.post("/transfers", transfer, idempotency_key).await
    }

    /// Get a transfer.
    pub async fn get(&self, id: &TransferId) -> Result<Transfer> {
        self.inner.get(&format!("/transfers/{}", id)).await
    }
}
