//! Transport boundary
//!
//! The core never performs I/O itself. It describes requests with [`Request`] and
//! hands them to a [`Transport`], which returns a fully read [`Response`]. Transport
//! level settings (authorization header, timeout) belong to the implementation, so
//! they apply to every request, including the ones that follow next-page links.

use std::fmt;

use serde_json::Value as Json;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Ordered query string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: QueryParams,
    pub body: Option<Json>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Json) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response whose body has already been read and released.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// Target of the `next` link relation, when the response carries one.
    pub next_link: Option<String>,
    /// Parsed body; `Null` when the body was empty.
    pub body: Json,
}

impl Response {
    pub fn new(status: u16, body: Json) -> Self {
        Self {
            status,
            next_link: None,
            body,
        }
    }

    pub fn with_next_link(mut self, url: impl Into<String>) -> Self {
        self.next_link = Some(url.into());
        self
    }

    /// Fail with [`Error::Transport`] unless the status is the expected one.
    pub fn expect_status(self, request: &Request, expected: u16) -> Result<Self> {
        if self.status == expected {
            return Ok(self);
        }

        Err(Error::Transport {
            method: request.method,
            url: request.url.clone(),
            status: self.status,
            expected,
            body: match &self.body {
                Json::Null => String::new(),
                Json::String(text) => text.clone(),
                other => other.to_string(),
            },
        })
    }
}

/// Something that can execute a [`Request`].
pub trait Transport {
    fn send(&self, request: &Request) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }
}

/// Extract the `rel="next"` target from an HTTP `Link` header.
///
/// Input: `<https://api.ciscospark.com/v1/rooms?max=2&cursor=abc>; rel="next"`
pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut parts = link.split(';');
        let target = parts.next()?.trim();
        let url = target.strip_prefix('<')?.strip_suffix('>')?;

        let is_next = parts.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });

        is_next.then(|| url.to_string())
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport used by the pagination and api tests.

    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;

    /// Replays queued responses in order and records every request it receives.
    #[derive(Debug, Default)]
    pub struct RecordingTransport {
        responses: RefCell<VecDeque<Result<Response>>>,
        requests: RefCell<Vec<Request>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(self, response: Response) -> Self {
            self.responses.borrow_mut().push_back(Ok(response));
            self
        }

        pub fn fail(self, error: Error) -> Self {
            self.responses.borrow_mut().push_back(Err(error));
            self
        }

        pub fn requests(&self) -> Vec<Request> {
            self.requests.borrow().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Transport for RecordingTransport {
        fn send(&self, request: &Request) -> Result<Response> {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method, request.url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_next_link_single() {
        let header = r#"<https://api.ciscospark.com/v1/rooms?max=2&cursor=abc>; rel="next""#;
        assert_eq!(
            parse_next_link(header),
            Some("https://api.ciscospark.com/v1/rooms?max=2&cursor=abc".to_string())
        );
    }

    #[test]
    fn test_parse_next_link_among_others() {
        let header = r#"<https://x.test/a?page=1>; rel="prev", <https://x.test/a?page=3>; rel=next"#;
        assert_eq!(
            parse_next_link(header),
            Some("https://x.test/a?page=3".to_string())
        );
    }

    #[test]
    fn test_parse_next_link_absent() {
        assert_eq!(parse_next_link(r#"<https://x.test/a>; rel="prev""#), None);
        assert_eq!(parse_next_link(""), None);
        assert_eq!(parse_next_link("garbage"), None);
    }

    #[test]
    fn test_query_params_skip_missing_values() {
        let query = QueryParams::new()
            .with("roomId", "abc")
            .with_opt("max", Some(10))
            .with_opt::<String>("before", None);

        assert_eq!(
            query.pairs(),
            &[
                ("roomId".to_string(), "abc".to_string()),
                ("max".to_string(), "10".to_string())
            ]
        );
    }

    #[test]
    fn test_expect_status_reports_transport_error() {
        let request = Request::new(Method::Get, "https://x.test/rooms");
        let response = Response::new(404, json!({"message": "not found"}));

        let err = response.expect_status(&request, 200).unwrap_err();
        assert_eq!(
            err,
            Error::Transport {
                method: Method::Get,
                url: "https://x.test/rooms".to_string(),
                status: 404,
                expected: 200,
                body: r#"{"message":"not found"}"#.to_string(),
            }
        );
    }

    #[test]
    fn test_expect_status_is_exact() {
        let request = Request::new(Method::Delete, "https://x.test/rooms/1");
        assert!(Response::new(204, Json::Null)
            .expect_status(&request, 204)
            .is_ok());
        assert!(Response::new(200, Json::Null)
            .expect_status(&request, 204)
            .is_err());
    }
}
