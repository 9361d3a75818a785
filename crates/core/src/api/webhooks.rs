use serde_json::json;

use super::{Attributes, SparkApi};
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::pagination::Resources;
use crate::resources::Webhook;
use crate::transport::{QueryParams, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWebhookParams {
    pub name: String,
    pub target_url: String,
    /// Resource type to watch, e.g. `messages`.
    pub resource: String,
    /// Event type, e.g. `created`.
    pub event: String,
    /// Filter expression, e.g. `roomId=...`.
    pub filter: String,
}

impl<T: Transport> SparkApi<T> {
    pub fn list_webhooks(&self, max: Option<u32>) -> Resources<&T, Webhook> {
        self.list(Endpoint::Webhooks, QueryParams::new().with_opt("max", max))
    }

    pub fn create_webhook(&self, params: &CreateWebhookParams) -> Result<Webhook> {
        let payload = json!({
            "name": params.name,
            "targetUrl": params.target_url,
            "resource": params.resource,
            "event": params.event,
            "filter": params.filter,
        });
        self.create(Endpoint::Webhooks, payload)
    }

    pub fn get_webhook(&self, id: &str) -> Result<Webhook> {
        self.get(&Endpoint::Webhooks.item_path(id)?, QueryParams::new())
    }

    pub fn update_webhook(&self, id: &str, attributes: Attributes) -> Result<Webhook> {
        self.update(Endpoint::Webhooks, id, attributes)
    }

    pub fn delete_webhook(&self, id: &str) -> Result<()> {
        self.delete(Endpoint::Webhooks, id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::BASE;
    use super::*;
    use crate::transport::testing::RecordingTransport;
    use crate::transport::Response;

    fn webhook() -> serde_json::Value {
        json!({
            "id": "w1",
            "name": "My Awesome Webhook",
            "targetUrl": "https://example.com/mywebhook",
            "resource": "messages",
            "event": "created",
            "filter": "roomId=r1"
        })
    }

    #[test]
    fn test_list_webhooks_yields_webhooks() {
        let transport = RecordingTransport::new()
            .respond(Response::new(200, json!({"items": [webhook()]})));
        let api = SparkApi::with_base_url(&transport, BASE).unwrap();

        let hooks: Vec<Webhook> = api.list_webhooks(Some(1)).collect::<Result<_>>().unwrap();
        assert_eq!(hooks[0].resource().unwrap(), "messages");
    }

    #[test]
    fn test_create_webhook_payload() {
        let transport = RecordingTransport::new().respond(Response::new(200, webhook()));
        let api = SparkApi::with_base_url(&transport, BASE).unwrap();

        let created = api
            .create_webhook(&CreateWebhookParams {
                name: "My Awesome Webhook".to_string(),
                target_url: "https://example.com/mywebhook".to_string(),
                resource: "messages".to_string(),
                event: "created".to_string(),
                filter: "roomId=r1".to_string(),
            })
            .unwrap();

        assert_eq!(created.name().unwrap(), "My Awesome Webhook");
        let body = transport.requests()[0].body.clone().unwrap();
        let mut expected = webhook();
        expected.as_object_mut().unwrap().remove("id");
        assert_eq!(body, expected);
    }
}
