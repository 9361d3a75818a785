use serde_json::{Map, Value as Json};

use super::SparkApi;
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use crate::pagination::Resources;
use crate::resources::Message;
use crate::transport::{QueryParams, Transport};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListMessagesParams {
    pub room_id: String,
    /// Only messages sent before this instant (ISO 8601).
    pub before: Option<String>,
    /// Only messages sent before this message id.
    pub before_message: Option<String>,
    pub max: Option<u32>,
}

/// Where a new message is posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageTarget {
    Room(String),
    PersonId(String),
    PersonEmail(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMessageParams {
    pub target: MessageTarget,
    pub text: Option<String>,
    /// Public URLs of files to attach.
    pub files: Vec<String>,
}

impl CreateMessageParams {
    fn into_payload(self) -> Result<Json> {
        let text = self.text.filter(|text| !text.is_empty());
        if text.is_none() && self.files.is_empty() {
            return Err(Error::InvalidArgument(
                "a message needs text, files or both".to_string(),
            ));
        }

        let mut payload = Map::new();
        let (key, value) = match self.target {
            MessageTarget::Room(id) => ("roomId", id),
            MessageTarget::PersonId(id) => ("toPersonId", id),
            MessageTarget::PersonEmail(email) => ("toPersonEmail", email),
        };
        payload.insert(key.to_string(), Json::String(value));

        if let Some(text) = text {
            payload.insert("text".to_string(), Json::String(text));
        }
        if !self.files.is_empty() {
            payload.insert(
                "files".to_string(),
                Json::Array(self.files.into_iter().map(Json::String).collect()),
            );
        }

        Ok(Json::Object(payload))
    }
}

impl<T: Transport> SparkApi<T> {
    pub fn list_messages(&self, params: &ListMessagesParams) -> Resources<&T, Message> {
        let query = QueryParams::new()
            .with("roomId", &params.room_id)
            .with_opt("before", params.before.as_ref())
            .with_opt("beforeMessage", params.before_message.as_ref())
            .with_opt("max", params.max);
        self.list(Endpoint::Messages, query)
    }

    pub fn create_message(&self, params: CreateMessageParams) -> Result<Message> {
        self.create(Endpoint::Messages, params.into_payload()?)
    }

    pub fn get_message(&self, id: &str) -> Result<Message> {
        self.get(&Endpoint::Messages.item_path(id)?, QueryParams::new())
    }

    pub fn delete_message(&self, id: &str) -> Result<()> {
        self.delete(Endpoint::Messages, id)
    }
}
