use super::SparkApi;
use crate::endpoints::Endpoint;
use crate::error::Result;
use crate::pagination::Resources;
use crate::resources::Person;
use crate::transport::{QueryParams, Transport};

/// People can only be searched by one criterion at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonFilter {
    Email(String),
    DisplayName(String),
}

impl<T: Transport> SparkApi<T> {
    pub fn list_people(&self, filter: &PersonFilter, max: Option<u32>) -> Resources<&T, Person> {
        let query = match filter {
            PersonFilter::Email(email) => QueryParams::new().with("email", email),
            PersonFilter::DisplayName(name) => QueryParams::new().with("displayName", name),
        };
        self.list(Endpoint::People, query.with_opt("max", max))
    }

    pub fn get_person(&self, id: &str) -> Result<Person> {
        self.get(&Endpoint::People.item_path(id)?, QueryParams::new())
    }

    /// The person owning the access token.
    pub fn get_person_me(&self) -> Result<Person> {
        self.get(&Endpoint::People.item_path("me")?, QueryParams::new())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::BASE;
    use super::*;
    use crate::transport::testing::RecordingTransport;
    use crate::transport::Response;
    use serde_json::json;

    #[test]
    fn test_list_people_by_display_name() {
        let transport = RecordingTransport::new().respond(Response::new(
            200,
            json!({"items": [{"id": "p1", "displayName": "John Andersen", "emails": ["john@example.com"]}]}),
        ));
        let api = SparkApi::with_base_url(&transport, BASE).unwrap();

        let people: Vec<Person> = api
            .list_people(&PersonFilter::DisplayName("John".to_string()), None)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(people[0].emails().unwrap(), vec!["john@example.com"]);
        assert_eq!(
            transport.requests()[0].query,
            QueryParams::new().with("displayName", "John")
        );
    }

    #[test]
    fn test_list_people_by_email_with_max() {
        let transport =
            RecordingTransport::new().respond(Response::new(200, json!({"items": []})));
        let api = SparkApi::with_base_url(&transport, BASE).unwrap();

        let count = api
            .list_people(&PersonFilter::Email("john@example.com".to_string()), Some(5))
            .count();

        assert_eq!(count, 0);
        assert_eq!(
            transport.requests()[0].query,
            QueryParams::new()
                .with("email", "john@example.com")
                .with("max", 5)
        );
    }

    #[test]
    fn test_get_person_me() {
        let transport = RecordingTransport::new()
            .respond(Response::new(200, json!({"id": "me-id", "displayName": "Me"})));
        let api = SparkApi::with_base_url(&transport, BASE).unwrap();

        let me = api.get_person_me().unwrap();
        assert_eq!(me.id().unwrap(), "me-id");
        assert_eq!(transport.requests()[0].url, "https://api.test/v1/people/me");
    }
}
