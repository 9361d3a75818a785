//! Resource endpoint table
//!
//! Path templates for every collection exposed by the API, the method and status code
//! each kind of operation uses, and URL resolution against the API base URL.

use url::Url;

use crate::error::{Error, Result};
use crate::transport::Method;

/// Default API base URL.
pub const DEFAULT_API_URL: &str = "https://api.ciscospark.com/v1/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    People,
    Rooms,
    Memberships,
    Messages,
    Teams,
    TeamMemberships,
    Webhooks,
}

impl Endpoint {
    /// Collection path, relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::People => "people",
            Endpoint::Rooms => "rooms",
            Endpoint::Memberships => "memberships",
            Endpoint::Messages => "messages",
            Endpoint::Teams => "teams",
            Endpoint::TeamMemberships => "team/memberships",
            Endpoint::Webhooks => "webhooks",
        }
    }

    /// Path of a single item in the collection.
    ///
    /// The id is percent-encoded into one path segment, so it can never address
    /// another collection.
    pub fn item_path(self, id: &str) -> Result<String> {
        if matches!(id, "" | "." | "..") {
            return Err(Error::InvalidArgument(format!(
                "'{}' is not a valid {} id",
                id,
                self.path()
            )));
        }
        Ok(format!("{}/{}", self.path(), urlencoding::encode(id)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn method(self) -> Method {
        match self {
            Operation::List | Operation::Get => Method::Get,
            Operation::Create => Method::Post,
            Operation::Update => Method::Put,
            Operation::Delete => Method::Delete,
        }
    }

    pub fn expected_status(self) -> u16 {
        match self {
            Operation::Delete => 204,
            _ => 200,
        }
    }
}

fn invalid_url(url: &str, reason: impl ToString) -> Error {
    Error::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse and validate an API base URL.
///
/// Only absolute http(s) URLs with a host are accepted. The path is given a trailing
/// slash so relative paths resolve below it instead of replacing its last segment.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim()).map_err(|e| invalid_url(base_url, e))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_url(base_url, "expected an http or https URL"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid_url(base_url, "missing host"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Resolve `url` against `base`.
///
/// Absolute URLs (such as next-page links) are kept, whatever the case of their
/// scheme; relative ones are joined below the base path.
pub fn absolute_url(base: &Url, url: &str) -> Result<String> {
    base.join(url)
        .map(String::from)
        .map_err(|e| invalid_url(url, e))
}
