//! Paginated stream for lazy iteration over API results.
//!
//! MangoPay listings are page-numbered (`page`, `per_page`, 1-based) and
//! report their size through the `x-number-of-pages` response header. A
//! [`PaginatedStream`] walks the pages one request at a time.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;
use serde::de::DeserializeOwned;

use super::{ClientInner, Filters};
use crate::Result;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// One page of a listing.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u32,
    /// Total number of pages, when the API reported it.
    pub total_pages: Option<u64>,
    /// Total number of items, when the API reported it.
    pub total_items: Option<u64>,
}

impl<T> Page<T> {
    /// Check if there are more pages after this one.
    pub fn has_more(&self) -> bool {
        match self.total_pages {
            Some(total) => u64::from(self.page) < total,
            None => false,
        }
    }

    /// Get the next page number, if available.
    pub fn next_page(&self) -> Option<u32> {
        if self.has_more() {
            Some(self.page + 1)
        } else {
            None
        }
    }
}

type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// A stream that lazily fetches pages from a listing endpoint.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use mangopay::Filters;
///
/// # async fn example(client: mangopay::MangoPayClient) -> mangopay::Result<()> {
/// let mut stream = client.users().list_stream(Filters::new());
///
/// while let Some(user) = stream.next().await {
///     println!("{:?}", user?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    fetch_page: Box<dyn Fn(u32) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>,
    current_items: std::collections::VecDeque<T>,
    next_page: Option<u32>,
    pending_fetch: Option<BoxFuture<'static, Result<Page<T>>>>,
}

impl<T> PaginatedStream<T>
where
    T: Send + 'static,
{
    /// Create a stream from a page fetcher, starting at page 1.
    pub fn new<F>(fetch_page: F) -> Self
    where
        F: Fn(u32) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            current_items: Default::default(),
            next_page: Some(1),
            pending_fetch: None,
        }
    }
}

impl<T> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(item) = this.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;
                        this.next_page = if page.items.is_empty() {
                            None
                        } else {
                            page.next_page()
                        };
                        this.current_items = page.items.into();

                        if !this.current_items.is_empty() {
                            continue;
                        }
                        return Poll::Ready(None);
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.next_page = None;
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if let Some(page) = this.next_page {
                this.pending_fetch = Some((this.fetch_page)(page));
                continue;
            }

            return Poll::Ready(None);
        }
    }
}

impl<T> Unpin for PaginatedStream<T> {}

/// Builds a [`PaginatedStream`] over a listing path.
pub(crate) struct PaginatedStreamBuilder<T> {
    inner: Arc<ClientInner>,
    path: String,
    per_page: u32,
    _marker: std::marker::PhantomData<T>,
}

impl<T: DeserializeOwned + Send + 'static> PaginatedStreamBuilder<T> {
    /// `path` is relative to the client's api path.
    pub(crate) fn new(inner: Arc<ClientInner>, path: impl Into<String>) -> Self {
        Self {
            inner,
            path: path.into(),
            per_page: DEFAULT_PAGE_SIZE,
            _marker: std::marker::PhantomData,
        }
    }

    pub(crate) fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Build the stream; `filters` is sent with every page.
    pub(crate) fn build(self, filters: Filters) -> PaginatedStream<T> {
        let inner = self.inner;
        let path = self.path;
        let per_page = self.per_page;

        PaginatedStream::new(move |page: u32| {
            let inner = inner.clone();
            let path = path.clone();
            let filters = filters.clone();

            Box::pin(async move {
                let mut filters = filters.page(page).per_page(per_page);
                let items = inner.list::<T>(&path, &mut filters).await?;
                Ok(Page {
                    items,
                    page,
                    total_pages: filters.total_pages(),
                    total_items: filters.total_items(),
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    fn page(n: u32, items: Vec<u32>, total: Option<u64>) -> Page<u32> {
        Page {
            items,
            page: n,
            total_pages: total,
            total_items: None,
        }
    }

    #[test]
    fn test_next_page() {
        assert_eq!(page(1, vec![1], Some(3)).next_page(), Some(2));
        assert_eq!(page(3, vec![1], Some(3)).next_page(), None);
        assert_eq!(page(1, vec![1], None).next_page(), None);
    }

    #[tokio::test]
    async fn test_stream_walks_all_pages() {
        let stream = PaginatedStream::new(|n: u32| {
            Box::pin(async move {
                let items = vec![n * 10, n * 10 + 1];
                Ok(page(n, items, Some(3)))
            }) as BoxFuture<'static, Result<Page<u32>>>
        });

        let items: Vec<u32> = stream.map(|r| r.unwrap()).collect().await;
        assert_eq!(items, vec![10, 11, 20, 21, 30, 31]);
    }

    #[tokio::test]
    async fn test_stream_stops_on_error() {
        let stream = PaginatedStream::<u32>::new(|_| {
            Box::pin(async { Err(crate::Error::InvalidInput("boom".into())) })
                as BoxFuture<'static, Result<Page<u32>>>
        });

        let results: Vec<_> = stream.collect().await;
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
