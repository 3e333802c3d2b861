//! Wallets service.

use std::sync::Arc;

use crate::client::{ClientInner, Filters};
use crate::models::{NewWallet, UserId, Wallet, WalletId};
use crate::Result;

/// Service for wallet operations.
///
/// # Example
///
/// ```no_run
/// use mangopay::UserId;
/// use mangopay::models::NewWallet;
///
/// # async fn example(client: mangopay::MangoPayClient) -> mangopay::Result<()> {
/// let owner = UserId::new("8494514");
/// let wallet = client
///     .wallets()
///     .create(&NewWallet::new(owner, "EUR", "Main wallet"), None)
///     .await?;
/// println!("balance: {:?}", wallet.balance);
/// # Ok(())
/// # }
/// ```
pub struct WalletsService {
    inner: Arc<ClientInner>,
}

impl WalletsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a wallet.
    pub async fn create(
        &self,
        wallet: &NewWallet,
        idempotency_key: Option<&str>,
    ) -> Result<Wallet> {
        self.inner.post("/wallets", wallet, idempotency_key).await
    }

    /// Get a wallet.
    pub async fn get(&self, id: &WalletId) -> Result<Wallet> {
        self.inner.get(&format!("/wallets/{}", id)).await
    }

    /// Change a wallet's description and/or tag.
    pub async fn update(
        &self,
        id: &WalletId,
        description: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Wallet> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Request<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            tag: Option<&'a str>,
        }

        self.inner
            .put(&format!("/wallets/{}", id), &Request { description, tag })
            .await
    }

    /// List the wallets of a user.
    pub async fn list_for_user(&self, user: &UserId, filters: &mut Filters) -> Result<Vec<Wallet>> {
        self.inner
            .list(&format!("/users/{}/wallets", user), filters)
            .await
    }
}
