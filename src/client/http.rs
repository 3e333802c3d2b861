//! HTTP client implementation for the MangoPay API.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::api::{
    CardRegistrationsService, EventsService, HooksService, TransactionsService,
    TransfersService, UsersService, WalletsService,
};
use crate::auth::{FileStorage, MemoryStorage, TokenManager, TokenStorage};
use crate::{Error, Result};

use super::config::Configuration;
use super::request::{
    Filters, HeaderSpec, Method, ITEMS_HEADER, PAGES_HEADER, TOTAL_ITEMS, TOTAL_PAGES,
};
use super::user_agent::{insert_client_headers, ClientInfo, USER_AGENT};

/// Hook run on the fully built request right before it is sent.
pub type BeforeSend<'a> = &'a (dyn Fn(&mut reqwest::Request) + Send + Sync);

/// The main client for interacting with the MangoPay API.
///
/// Every resource service funnels into [`dispatch`](Self::dispatch), which
/// builds the URL, attaches the bearer token, sends the call and turns the
/// response into a JSON value or an [`Error::Api`].
///
/// # Example
///
/// ```no_run
/// use mangopay::{Configuration, MangoPayClient, Filters};
///
/// # async fn example() -> mangopay::Result<()> {
/// let client = MangoPayClient::new(
///     Configuration::new("client-id", "passphrase").with_preproduction(true),
/// )?;
///
/// let mut filters = Filters::new().page(1).per_page(10);
/// let users = client.users().list(&mut filters).await?;
/// println!("{} users, {:?} in total", users.len(), filters.total_items());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct MangoPayClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: Arc<Configuration>,
    pub(crate) tokens: TokenManager,
}

impl MangoPayClient {
    /// Create a client. Tokens are kept in memory, or in a file under
    /// `temp_dir` when one is configured.
    pub fn new(config: Configuration) -> Result<Self> {
        let storage: Arc<dyn TokenStorage> = match &config.temp_dir {
            Some(dir) => Arc::new(FileStorage::new(dir)),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Create a client with a custom token storage.
    pub fn with_storage(config: Configuration, storage: Arc<dyn TokenStorage>) -> Result<Self> {
        Url::parse(config.root_url())?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let config = Arc::new(config);
        let tokens = TokenManager::new(http.clone(), config.clone(), storage);

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                tokens,
            }),
        })
    }

    /// Create a client configured from `MANGOPAY_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(Configuration::from_env()?)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Configuration {
        &self.inner.config
    }

    /// The token manager shared by every call of this client.
    pub fn token_manager(&self) -> &TokenManager {
        &self.inner.tokens
    }

    /// `/v2.01/{client_id}`.
    pub fn api_path(&self) -> String {
        self.inner.config.api_path()
    }

    /// Send one call to the API.
    ///
    /// - `path` is appended to the root URL as is.
    /// - `params` is JSON-encoded into the body for every method, `GET` and
    ///   `DELETE` included.
    /// - `filters` becomes the query string when non-empty. After a
    ///   successful listing it also receives `total_pages` / `total_items`
    ///   from the pagination headers. A value that is not a plain number
    ///   counts as its leading digits, or `0` when it has none.
    /// - `headers` selects synthesized headers, optionally with an
    ///   idempotency key, or an explicit header map sent verbatim.
    /// - `before_send` may alter the request right before it goes out.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] for any status other than `200`;
    /// [`Error::Authentication`] if no token could be obtained.
    pub async fn dispatch<P>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        filters: &mut Filters,
        headers: HeaderSpec,
        before_send: Option<BeforeSend<'_>>,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        self.inner
            .dispatch(method, path, params, filters, headers, before_send)
            .await
    }

    /// Dispatch and map the decoded body into `T`.
    pub async fn request<T, P>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        filters: &mut Filters,
        headers: HeaderSpec,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.inner.request(method, path, params, filters, headers).await
    }

    /// Retrieve the response previously recorded for an idempotency key.
    pub async fn fetch_response(&self, idempotency_key: &str) -> Result<Value> {
        self.inner.fetch_response(idempotency_key).await
    }

    /// Get the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.inner.clone())
    }

    /// Get the wallets service.
    pub fn wallets(&self) -> WalletsService {
        WalletsService::new(self.inner.clone())
    }

    /// Get the transfers service.
    pub fn transfers(&self) -> TransfersService {
        TransfersService::new(self.inner.clone())
    }

    /// Get the card registrations service.
    pub fn card_registrations(&self) -> CardRegistrationsService {
        CardRegistrationsService::new(self.inner.clone())
    }

    /// Get the hooks (webhooks) service.
    pub fn hooks(&self) -> HooksService {
        HooksService::new(self.inner.clone())
    }

    /// Get the transactions service.
    pub fn transactions(&self) -> TransactionsService {
        TransactionsService::new(self.inner.clone())
    }

    /// Get the events service.
    pub fn events(&self) -> EventsService {
        EventsService::new(self.inner.clone())
    }
}

impl ClientInner {
    /// `root_url + path`, with `filters` form-encoded as the query.
    pub(crate) fn build_url(&self, path: &str, filters: &Filters) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.config.root_url(), path))?;
        if !filters.is_empty() {
            url.set_query(None);
            url.query_pairs_mut().extend_pairs(filters.iter());
        }
        Ok(url)
    }

    /// Resolve the header spec into the headers to send.
    pub(crate) async fn build_headers(&self, spec: HeaderSpec) -> Result<HeaderMap> {
        let idempotency_key = match spec {
            HeaderSpec::Explicit(headers) => return Ok(headers),
            HeaderSpec::IdempotencyKey(key) => Some(key),
            HeaderSpec::None => None,
        };

        let token = self.tokens.get_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(USER_AGENT),
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&token.authorization_value())
                .map_err(|_| Error::Authentication("Invalid token format".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        insert_client_headers(&mut headers, ClientInfo::current());

        if let Some(key) = idempotency_key {
            headers.insert(
                HeaderName::from_static("idempotency-key"),
                HeaderValue::from_str(&key).map_err(|_| {
                    Error::InvalidInput(format!("Invalid idempotency key: {:?}", key))
                })?,
            );
        }

        Ok(headers)
    }

    pub(crate) async fn dispatch<P>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        filters: &mut Filters,
        headers: HeaderSpec,
        before_send: Option<BeforeSend<'_>>,
    ) -> Result<Value>
    where
        P: Serialize + ?Sized,
    {
        let url = self.build_url(path, filters)?;
        let headers = self.build_headers(headers).await?;
        let body = serde_json::to_vec(params)?;

        let mut request = self
            .http
            .request(method.as_reqwest(), url.clone())
            .headers(headers)
            .body(body)
            .build()?;

        if let Some(hook) = before_send {
            hook(&mut request);
        }

        tracing::debug!(%method, %url, "sending MangoPay request");
        let response = self.http.execute(request).await?;
        let status = response.status();
        tracing::debug!(%method, %url, %status, "received MangoPay response");

        let pages = header_count(response.headers(), PAGES_HEADER);
        let items = header_count(response.headers(), ITEMS_HEADER);

        let bytes = response.bytes().await?;
        let data = match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(%url, error = %e, "response body is not JSON, using empty object");
                Value::Object(Map::new())
            }
        };

        if status != reqwest::StatusCode::OK {
            return Err(Error::Api {
                uri: url.to_string(),
                status: status.as_u16(),
                body: data,
            });
        }

        if let Some(pages) = pages {
            filters.insert(TOTAL_PAGES, pages);
        }
        if let Some(items) = items {
            filters.insert(TOTAL_ITEMS, items);
        }

        Ok(data)
    }

    pub(crate) async fn request<T, P>(
        &self,
        method: Method,
        path: &str,
        params: &P,
        filters: &mut Filters,
        headers: HeaderSpec,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let data = self
            .dispatch(method, path, params, filters, headers, None)
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    /// `GET {api_path}/{path}` with an empty body object.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(
            Method::Get,
            &self.resource_path(path),
            &empty_params(),
            &mut Filters::new(),
            HeaderSpec::None,
        )
        .await
    }

    /// `GET {api_path}/{path}` returning a list, with totals written to `filters`.
    pub(crate) async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        filters: &mut Filters,
    ) -> Result<Vec<T>> {
        self.request(
            Method::Get,
            &self.resource_path(path),
            &empty_params(),
            filters,
            HeaderSpec::None,
        )
        .await
    }

    /// `POST {api_path}/{path}`.
    pub(crate) async fn post<T, B>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: Option<&str>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(
            Method::Post,
            &self.resource_path(path),
            body,
            &mut Filters::new(),
            HeaderSpec::from(idempotency_key),
        )
        .await
    }

    /// `PUT {api_path}/{path}`.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(
            Method::Put,
            &self.resource_path(path),
            body,
            &mut Filters::new(),
            HeaderSpec::None,
        )
        .await
    }

    pub(crate) async fn fetch_response(&self, idempotency_key: &str) -> Result<Value> {
        let path = format!("{}/responses/{}", self.config.api_path(), idempotency_key);
        self.dispatch(
            Method::Get,
            &path,
            &empty_params(),
            &mut Filters::new(),
            HeaderSpec::None,
            None,
        )
        .await
    }

    fn resource_path(&self, path: &str) -> String {
        format!("{}{}", self.config.api_path(), path)
    }
}

/// The `{}` body sent when a call has no payload.
pub(crate) fn empty_params() -> Value {
    Value::Object(Map::new())
}

/// Leading decimal digits of the header value; `0` when there are none.
fn header_count(headers: &HeaderMap, name: &str) -> Option<u64> {
    let raw = headers.get(name)?.to_str().ok()?;
    let digits: String = raw.trim_start().chars().take_while(char::is_ascii_digit).collect();
    if digits.len() != raw.trim().len() {
        tracing::debug!(header = name, value = raw, "non-numeric pagination header");
    }
    Some(digits.bytes().fold(0u64, |acc, d| {
        acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
    }))
}

impl std::fmt::Debug for MangoPayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MangoPayClient")
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MangoPayClient {
        MangoPayClient::new(
            Configuration::new("sdk", "pass").with_root_url("https://api.example.test"),
        )
        .unwrap()
    }

    #[test]
    fn test_url_without_filters_has_no_query() {
        let client = client();
        let url = client.inner.build_url("/v2.01/sdk/users", &Filters::new()).unwrap();
        assert_eq!(url.as_str(), "https://api.example.test/v2.01/sdk/users");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_url_with_filters_is_form_encoded() {
        let client = client();
        let filters = Filters::new()
            .per_page(10)
            .page(2)
            .with("Tag", "a b&c");
        let url = client.inner.build_url("/v2.01/sdk/users", &filters).unwrap();
        assert_eq!(url.query(), Some("Tag=a+b%26c&page=2&per_page=10"));
    }

    #[tokio::test]
    async fn test_explicit_headers_are_used_verbatim() {
        let client = client();
        let mut explicit = HeaderMap::new();
        explicit.insert("x-custom", HeaderValue::from_static("1"));

        // No token exchange happens for explicit headers.
        let headers = client
            .inner
            .build_headers(HeaderSpec::Explicit(explicit.clone()))
            .await
            .unwrap();
        assert_eq!(headers, explicit);
    }

    #[test]
    fn test_header_count() {
        let mut headers = HeaderMap::new();
        headers.insert(PAGES_HEADER, HeaderValue::from_static("3"));
        headers.insert(ITEMS_HEADER, HeaderValue::from_static("many"));
        assert_eq!(header_count(&headers, PAGES_HEADER), Some(3));
        assert_eq!(header_count(&headers, ITEMS_HEADER), Some(0));
        assert_eq!(header_count(&HeaderMap::new(), PAGES_HEADER), None);
    }

    #[test]
    fn test_header_count_takes_leading_digits() {
        let mut headers = HeaderMap::new();
        headers.insert(PAGES_HEADER, HeaderValue::from_static(" 12abc"));
        headers.insert(ITEMS_HEADER, HeaderValue::from_static("99999999999999999999999"));
        assert_eq!(header_count(&headers, PAGES_HEADER), Some(12));
        assert_eq!(header_count(&headers, ITEMS_HEADER), Some(u64::MAX));
    }

    #[test]
    fn test_invalid_root_url_is_rejected() {
        let result = MangoPayClient::new(Configuration::new("id", "p").with_root_url("not a url"));
        assert!(matches!(result, Err(Error::UrlParse(_))));
    }
}
