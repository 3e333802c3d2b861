//! Card registrations service.

use std::sync::Arc;

use crate::client::ClientInner;
use crate::models::{CardRegistration, CardRegistrationId, NewCardRegistration};
use crate::Result;

/// Service for card tokenization.
pub struct CardRegistrationsService {
    inner: Arc<ClientInner>,
}

impl CardRegistrationsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Open a card registration.
    pub async fn create(
        &self,
        registration: &NewCardRegistration,
        idempotency_key: Option<&str>,
    ) -> Result<CardRegistration> {
        self.inner
            .post("/cardregistrations", registration, idempotency_key)
            .await
    }

    /// Get a card registration.
    pub async fn get(&self, id: &CardRegistrationId) -> Result<CardRegistration> {
        self.inner.get(&format!("/cardregistrations/{}", id)).await
    }

    /// Complete a registration with the data returned by the tokenization
    /// server.
    pub async fn complete(
        &self,
        id: &CardRegistrationId,
        registration_data: &str,
    ) -> Result<CardRegistration> {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Request<'a> {
            registration_data: &'a str,
        }

        self.inner
            .put(
                &format!("/cardregistrations/{}", id),
                &Request { registration_data },
            )
            .await
    }
}
