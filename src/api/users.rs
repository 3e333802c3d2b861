//! Users service.

use std::sync::Arc;

use crate::client::paginated::{PaginatedStream, PaginatedStreamBuilder};
use crate::client::{ClientInner, Filters};
use crate::models::{LegalUser, NaturalUser, User, UserId};
use crate::Result;

/// Service for natural and legal users.
///
/// # Example
///
/// ```no_run
/// use mangopay::models::NaturalUser;
///
/// # async fn example(client: mangopay::MangoPayClient) -> mangopay::Result<()> {
/// let user = client
///     .users()
///     .create_natural(
///         &NaturalUser {
///             first_name: "Ada".into(),
///             last_name: "Lovelace".into(),
///             email: "ada@example.com".into(),
///             ..Default::default()
///         },
///         Some("create-ada-1"),
///     )
///     .await?;
/// println!("created {:?}", user.id);
/// # Ok(())
/// # }
/// ```
pub struct UsersService {
    inner: Arc<ClientInner>,
}

impl UsersService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Create a natural user.
    pub async fn create_natural(
        &self,
        user: &NaturalUser,
        idempotency_key: Option<&str>,
    ) -> Result<NaturalUser> {
        self.inner.post("/users/natural", user, idempotency_key).await
    }

    /// Create a legal user.
    pub async fn create_legal(
        &self,
        user: &LegalUser,
        idempotency_key: Option<&str>,
    ) -> Result<LegalUser> {
        self.inner.post("/users/legal", user, idempotency_key).await
    }

    /// Get any user by id.
    pub async fn get(&self, id: &UserId) -> Result<User> {
        self.inner.get(&format!("/users/{}", id)).await
    }

    /// Get a natural user by id.
    pub async fn get_natural(&self, id: &UserId) -> Result<NaturalUser> {
        self.inner.get(&format!("/users/natural/{}", id)).await
    }

    /// Get a legal user by id.
    pub async fn get_legal(&self, id: &UserId) -> Result<LegalUser> {
        self.inner.get(&format!("/users/legal/{}", id)).await
    }

    /// Update a natural user.
    pub async fn update_natural(&self, id: &UserId, user: &NaturalUser) -> Result<NaturalUser> {
        self.inner.put(&format!("/users/natural/{}", id), user).await
    }

    /// Update a legal user.
    pub async fn update_legal(&self, id: &UserId, user: &LegalUser) -> Result<LegalUser> {
        self.inner.put(&format!("/users/legal/{}", id), user).await
    }

    /// List one page of users. `filters` receives `total_pages` and
    /// `total_items`.
    pub async fn list(&self, filters: &mut Filters) -> Result<Vec<User>> {
        self.inner.list("/users", filters).await
    }

    /// Stream all users, fetching pages lazily.
    pub fn list_stream(&self, filters: Filters) -> PaginatedStream<User> {
        PaginatedStreamBuilder::<User>::new(self.inner.clone(), "/users").build(filters)
    }
}
