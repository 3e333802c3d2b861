//! Request-side building blocks for [`MangoPayClient::dispatch`](crate::MangoPayClient::dispatch).

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::HeaderMap;

/// Response header carrying the number of pages of a listing.
pub const PAGES_HEADER: &str = "x-number-of-pages";
/// Response header carrying the number of items of a listing.
pub const ITEMS_HEADER: &str = "x-number-of-items";

/// Filter key receiving the page count after a listing call.
pub const TOTAL_PAGES: &str = "total_pages";
/// Filter key receiving the item count after a listing call.
pub const TOTAL_ITEMS: &str = "total_items";

/// HTTP verbs accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// How the dispatcher should produce request headers.
#[derive(Debug, Clone, Default)]
pub enum HeaderSpec {
    /// Synthesize auth, content-type and client headers.
    #[default]
    None,
    /// Synthesize headers and add `Idempotency-Key`.
    IdempotencyKey(String),
    /// Send exactly these headers; no authorization is injected.
    Explicit(HeaderMap),
}

impl From<Option<&str>> for HeaderSpec {
    fn from(key: Option<&str>) -> Self {
        match key {
            Some(key) => HeaderSpec::IdempotencyKey(key.to_string()),
            None => HeaderSpec::None,
        }
    }
}

impl From<Option<String>> for HeaderSpec {
    fn from(key: Option<String>) -> Self {
        match key {
            Some(key) => HeaderSpec::IdempotencyKey(key),
            None => HeaderSpec::None,
        }
    }
}

impl From<HeaderMap> for HeaderSpec {
    fn from(headers: HeaderMap) -> Self {
        HeaderSpec::Explicit(headers)
    }
}

/// Sort direction for listing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl SortDirection {
    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Query parameters of a call, and the channel through which listing calls
/// report `total_pages` / `total_items`.
///
/// Keys are kept sorted, so the encoded query string is deterministic.
///
/// # Example
///
/// ```
/// use mangopay::Filters;
///
/// let mut filters = Filters::new().page(2).per_page(50);
/// filters.insert("Status", "SUCCEEDED");
///
/// assert_eq!(filters.get("page"), Some("2"));
/// assert_eq!(filters.total_pages(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Remove a parameter.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Request a given page (1-based).
    pub fn page(self, page: u32) -> Self {
        self.with("page", page)
    }

    /// Set the page size.
    pub fn per_page(self, per_page: u32) -> Self {
        self.with("per_page", per_page)
    }

    /// Sort by `field`, e.g. `CreationDate`.
    pub fn sort(self, field: &str, direction: SortDirection) -> Self {
        self.with("Sort", format!("{}:{}", field, direction.as_str()))
    }

    /// Page count reported by the last listing call made with these filters.
    pub fn total_pages(&self) -> Option<u64> {
        self.get(TOTAL_PAGES).and_then(|v| v.parse().ok())
    }

    /// Item count reported by the last listing call made with these filters.
    pub fn total_items(&self) -> Option<u64> {
        self.get(TOTAL_ITEMS).and_then(|v| v.parse().ok())
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Filters::new();
        for (k, v) in iter {
            filters.insert(k, v);
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(Method::Get.as_reqwest(), reqwest::Method::GET);
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_header_spec_from_option() {
        assert!(matches!(HeaderSpec::from(None::<&str>), HeaderSpec::None));
        match HeaderSpec::from(Some("abc")) {
            HeaderSpec::IdempotencyKey(key) => assert_eq!(key, "abc"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_filters_are_ordered() {
        let filters: Filters = [("per_page", "10"), ("page", "1"), ("BeforeDate", "5")]
            .into_iter()
            .collect();
        let keys: Vec<_> = filters.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["BeforeDate", "page", "per_page"]);
    }

    #[test]
    fn test_sort_and_totals() {
        let mut filters = Filters::new().sort("CreationDate", SortDirection::Desc);
        assert_eq!(filters.get("Sort"), Some("CreationDate:desc"));

        filters.insert(TOTAL_PAGES, 3).insert(TOTAL_ITEMS, 42);
        assert_eq!(filters.total_pages(), Some(3));
        assert_eq!(filters.total_items(), Some(42));
    }
}
