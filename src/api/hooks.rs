//! Hooks service.

use std::sync::Arc;

use crate::client::{ClientInner, Filters};
use crate::models::{Hook, HookId, HookUpdate, NewHook};
use crate::Result;

/// Service for webhook registrations.
///
/// # Example
///
/// ```no_run
/// use mangopay::models::NewHook;
///
/// # async fn example(client: mangopay::MangoPayClient) -> mangopay::Result<()> {
/// let hook = client
///     .hooks()
///     .create(&NewHook {
///         event_type: "PAYIN_NORMAL_SUCCEEDED".into(),
///         url: "https://example.com/mangopay/hooks".into(),
///         tag: None,
///     })
///     .await?;
/// println!("hook {} is {:?}", hook.id, hook.status);
/// # Ok(())
/// # }
/// ```
pub struct HooksService {
    inner: Arc<ClientInner>,
}

impl HooksService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Register a hook.
    pub async fn create(&self, hook: &NewHook) -> Result<Hook> {
        self.inner.post("/hooks", hook, None).await
    }

    /// Get a hook.
    pub async fn get(&self, id: &HookId) -> Result<Hook> {
        self.inner.get(&format!("/hooks/{}", id)).await
    }

    /// Update a hook's URL, status or tag.
    pub async fn update(&self, id: &HookId, update: &HookUpdate) -> Result<Hook> {
        self.inner.put(&format!("/hooks/{}", id), update).await
    }

    /// List registered hooks.
    pub async fn list(&self, filters: &mut Filters) -> Result<Vec<Hook>> {
        self.inner.list("/hooks", filters).await
    }
}
