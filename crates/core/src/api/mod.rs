//! Resource endpoint wrappers
//!
//! [`SparkApi`] binds a [`Transport`] to an API base URL and exposes one method per
//! remote operation. Every method builds a [`Request`] from the endpoint table, checks
//! the expected status and maps the payload onto a resource variant; list methods
//! return a lazy [`Resources`] iterator.

use log::debug;
use serde_json::{Map, Value as Json};
use url::Url;

use crate::endpoints::{absolute_url, parse_base_url, Endpoint, Operation, DEFAULT_API_URL};
use crate::error::{Error, Result};
use crate::pagination::{Items, Resources};
use crate::resources::Resource;
use crate::transport::{QueryParams, Request, Transport};

mod memberships;
mod messages;
mod people;
mod rooms;
mod teams;
mod webhooks;

pub use memberships::{CreateMembershipParams, ListMembershipsParams};
pub use messages::{CreateMessageParams, ListMessagesParams, MessageTarget};
pub use people::PersonFilter;
pub use teams::CreateTeamMembershipParams;
pub use webhooks::CreateWebhookParams;

/// Identifies the person a membership refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonRef {
    Id(String),
    Email(String),
}

impl PersonRef {
    fn insert_into(&self, payload: &mut Map<String, Json>) {
        match self {
            PersonRef::Id(id) => payload.insert("personId".to_string(), Json::from(id.as_str())),
            PersonRef::Email(email) => {
                payload.insert("personEmail".to_string(), Json::from(email.as_str()))
            }
        };
    }
}

/// Attributes sent by update operations.
pub type Attributes = Map<String, Json>;

/// Client for the Spark REST API over any [`Transport`].
#[derive(Debug, Clone)]
pub struct SparkApi<T: Transport> {
    transport: T,
    base_url: Url,
}

impl<T: Transport> SparkApi<T> {
    /// A client for the public API URL.
    pub fn new(transport: T) -> Result<Self> {
        Self::with_base_url(transport, DEFAULT_API_URL)
    }

    /// A client for another deployment. The URL must be an absolute http(s) URL.
    pub fn with_base_url(transport: T, base_url: &str) -> Result<Self> {
        Ok(Self {
            transport,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> Result<String> {
        absolute_url(&self.base_url, path)
    }

    fn execute(&self, operation: Operation, request: Request) -> Result<Json> {
        debug!("{} {}", request.method, request.url);
        let response = self
            .transport
            .send(&request)?
            .expect_status(&request, operation.expected_status())?;
        Ok(response.body)
    }

    /// Lazily iterate a collection, mapping each item onto `R`.
    pub fn list<R: Resource>(&self, endpoint: Endpoint, query: QueryParams) -> Resources<&T, R> {
        debug!("listing {} from {}", R::NAME, endpoint.path());
        let items = match self.url(endpoint.path()) {
            Ok(url) => Items::new(&self.transport, url, query),
            Err(e) => Items::failed(&self.transport, e),
        };
        Resources::new(items)
    }

    pub fn get<R: Resource>(&self, path: &str, query: QueryParams) -> Result<R> {
        let request = Request::new(Operation::Get.method(), self.url(path)?).with_query(query);
        R::from_json(self.execute(Operation::Get, request)?)
    }

    pub fn create<R: Resource>(&self, endpoint: Endpoint, payload: Json) -> Result<R> {
        let request =
            Request::new(Operation::Create.method(), self.url(endpoint.path())?).with_body(payload);
        R::from_json(self.execute(Operation::Create, request)?)
    }

    /// Update an item. An empty attribute set is rejected before any request is made.
    pub fn update<R: Resource>(
        &self,
        endpoint: Endpoint,
        id: &str,
        attributes: Attributes,
    ) -> Result<R> {
        if attributes.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "updating a {} requires at least one attribute",
                R::NAME
            )));
        }
        let request = Request::new(Operation::Update.method(), self.url(&endpoint.item_path(id)?)?)
            .with_body(Json::Object(attributes));
        R::from_json(self.execute(Operation::Update, request)?)
    }

    pub fn delete(&self, endpoint: Endpoint, id: &str) -> Result<()> {
        let request = Request::new(Operation::Delete.method(), self.url(&endpoint.item_path(id)?)?);
        self.execute(Operation::Delete, request)?;
        Ok(())
    }
}
