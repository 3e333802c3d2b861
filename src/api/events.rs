//! Events service.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::client::{ClientInner, Filters};
use crate::models::Event;
use crate::Result;

/// Service for the event log.
pub struct EventsService {
    inner: Arc<ClientInner>,
}

impl EventsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List one page of events. Narrow with [`between`] and an
    /// `EventType` filter.
    pub async fn list(&self, filters: &mut Filters) -> Result<Vec<Event>> {
        self.inner.list("/events", filters).await
    }
}

/// Restrict a listing to `[after, before]`.
pub fn between(filters: Filters, after: DateTime<Utc>, before: DateTime<Utc>) -> Filters {
    filters
        .with("AfterDate", after.timestamp())
        .with("BeforeDate", before.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_between_uses_unix_seconds() {
        let after = Utc.timestamp_opt(1_000, 0).unwrap();
        let before = Utc.timestamp_opt(2_000, 0).unwrap();
        let filters = between(Filters::new(), after, before);
        assert_eq!(filters.get("AfterDate"), Some("1000"));
        assert_eq!(filters.get("BeforeDate"), Some("2000"));
    }
}
