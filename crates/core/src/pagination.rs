//! Paginated fetch protocol
//!
//! Collection endpoints answer with a page shaped like `{"items": [...]}` and, when
//! more data is available, a `next` link relation pointing at the following page.
//! [`Items`] walks those pages lazily: a page is fetched only when the caller asks
//! for an item past the end of the current one, so dropping the iterator early
//! stops all further requests.
//!
//! Next links are resolved against the URL of the page carrying them, so both absolute
//! and relative links are followed.
//!
//! Termination rules:
//! - a page without a next link ends the sequence;
//! - a page with zero items ends the sequence, even when it carries a next link;
//! - any error (unexpected status, malformed page) is yielded once and ends it.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use log::debug;
use serde_json::Value as Json;
use url::Url;

use crate::endpoints::{absolute_url, Operation};
use crate::error::{Error, Result};
use crate::resources::Resource;
use crate::transport::{QueryParams, Request, Transport};

/// Key holding the page content.
pub const ITEMS_KEY: &str = "items";

/// Pull the `items` array out of a page body.
pub fn extract_items(url: &str, body: Json) -> Result<Vec<Json>> {
    let malformed = |reason: &str| Error::MalformedPage {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    match body {
        Json::Object(mut map) => match map.remove(ITEMS_KEY) {
            Some(Json::Array(items)) => Ok(items),
            Some(_) => Err(malformed("'items' is not an array")),
            None => Err(malformed("'items' object not found in JSON data")),
        },
        _ => Err(malformed("page body is not a JSON object")),
    }
}

/// Lazy, forward-only sequence of raw items across every page of a collection.
pub struct Items<T: Transport> {
    transport: T,
    next_request: Option<Request>,
    current: std::vec::IntoIter<Json>,
    pages_fetched: usize,
    pending_error: Option<Error>,
    finished: bool,
}

impl<T: Transport> Items<T> {
    /// Prepare the iteration. Nothing is fetched until the first call to `next`.
    pub fn new(transport: T, url: impl Into<String>, query: QueryParams) -> Self {
        Self {
            transport,
            next_request: Some(page_request(url.into()).with_query(query)),
            current: Vec::new().into_iter(),
            pages_fetched: 0,
            pending_error: None,
            finished: false,
        }
    }

    /// A sequence that yields `error` once without issuing any request.
    pub fn failed(transport: T, error: Error) -> Self {
        Self {
            transport,
            next_request: None,
            current: Vec::new().into_iter(),
            pages_fetched: 0,
            pending_error: Some(error),
            finished: false,
        }
    }

    /// Number of page requests issued so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page. `Ok(None)` means the sequence is over.
    fn fetch_page(&mut self) -> Result<Option<Vec<Json>>> {
        let Some(request) = self.next_request.take() else {
            return Ok(None);
        };

        debug!(
            "fetching page {} from {}",
            self.pages_fetched + 1,
            request.url
        );
        self.pages_fetched += 1;

        let response = self
            .transport
            .send(&request)?
            .expect_status(&request, Operation::List.expected_status())?;
        let next_link = response.next_link;
        let items = extract_items(&request.url, response.body)?;

        if items.is_empty() {
            debug!("empty page from {}, ending iteration", request.url);
            return Ok(None);
        }

        // The next link already encodes the full pagination state, so the
        // original query parameters are not carried over.
        self.next_request = match next_link {
            Some(link) => Some(page_request(resolve_link(&request.url, &link)?)),
            None => None,
        };
        Ok(Some(items))
    }
}

fn page_request(url: String) -> Request {
    Request::new(Operation::List.method(), url)
}

fn resolve_link(page_url: &str, link: &str) -> Result<String> {
    let base = Url::parse(page_url).map_err(|e| Error::InvalidUrl {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;
    absolute_url(&base, link)
}

impl<T: Transport> Iterator for Items<T> {
    type Item = Result<Json>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            if let Some(error) = self.pending_error.take() {
                self.finished = true;
                return Some(Err(error));
            }

            match self.fetch_page() {
                Ok(Some(items)) => self.current = items.into_iter(),
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    self.next_request = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<T: Transport> FusedIterator for Items<T> {}

/// [`Items`] mapped onto a resource variant.
pub struct Resources<T: Transport, R> {
    items: Items<T>,
    failed: bool,
    _resource: PhantomData<fn() -> R>,
}

impl<T: Transport, R: Resource> Resources<T, R> {
    pub fn new(items: Items<T>) -> Self {
        Self {
            items,
            failed: false,
            _resource: PhantomData,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.items.pages_fetched()
    }
}

impl<T: Transport, R: Resource> Iterator for Resources<T, R> {
    type Item = Result<R>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mapped = self.items.next()?.and_then(R::from_json);
        // A failure aborts the iteration, mapping failures included.
        self.failed = mapped.is_err();
        Some(mapped)
    }
}

impl<T: Transport, R: Resource> FusedIterator for Resources<T, R> {}
