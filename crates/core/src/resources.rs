//! Resource variants
//!
//! Each variant wraps a [`Model`] built against a fixed attribute table. Payload keys
//! outside the table are still available through [`Resource::get`] and the wrapped
//! model; table entries missing from the payload report [`Error::Uninitialized`].
//!
//! [`Error::Uninitialized`]: crate::error::Error::Uninitialized

use serde_json::Value as Json;

use crate::attribute::{AttributeDecl, Value};
use crate::error::Result;
use crate::model::Model;
use crate::timestamp::Timestamp;

/// A typed view over a mapped JSON resource.
pub trait Resource: Sized {
    /// Human readable name, used in logs and CLI output.
    const NAME: &'static str;

    /// Statically declared attributes.
    const ATTRIBUTES: &'static [AttributeDecl];

    fn from_model(model: Model) -> Self;

    fn model(&self) -> &Model;

    fn into_model(self) -> Model;

    /// Map a JSON object (or a JSON string holding one) onto this variant.
    fn from_json(value: Json) -> Result<Self> {
        Model::from_json_with_schema(value, Self::ATTRIBUTES).map(Self::from_model)
    }

    fn to_json(&self) -> Result<Json> {
        self.model().to_json()
    }

    fn get(&self, name: &str) -> Result<&Value> {
        self.model().get(name)
    }
}

/// Untyped resources: every key is declared from the payload.
impl Resource for Model {
    const NAME: &'static str = "object";
    const ATTRIBUTES: &'static [AttributeDecl] = &[];

    fn from_model(model: Model) -> Self {
        model
    }

    fn model(&self) -> &Model {
        self
    }

    fn into_model(self) -> Model {
        self
    }
}

macro_rules! impl_resource {
    ($ty:ident, $name:literal, $attributes:expr) => {
        impl Resource for $ty {
            const NAME: &'static str = $name;
            const ATTRIBUTES: &'static [AttributeDecl] = $attributes;

            fn from_model(model: Model) -> Self {
                Self(model)
            }

            fn model(&self) -> &Model {
                &self.0
            }

            fn into_model(self) -> Model {
                self.0
            }
        }
    };
}

// =============================================================================
// Rooms
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Room(Model);

impl_resource!(
    Room,
    "room",
    &[
        AttributeDecl::plain("id"),
        AttributeDecl::plain("title"),
        AttributeDecl::timestamp("created"),
        AttributeDecl::timestamp("lastActivity"),
        AttributeDecl::plain("isLocked"),
    ]
);

impl Room {
    pub fn id(&self) -> Result<&str> {
        self.0.get_str("id")
    }

    pub fn title(&self) -> Result<&str> {
        self.0.get_str("title")
    }

    pub fn created(&self) -> Result<&Timestamp> {
        self.0.get_timestamp("created")
    }

    pub fn last_activity(&self) -> Result<&Timestamp> {
        self.0.get_timestamp("lastActivity")
    }

    pub fn is_locked(&self) -> Result<bool> {
        self.0.get_bool("isLocked")
    }
}

// =============================================================================
// People
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Person(Model);

impl_resource!(
    Person,
    "person",
    &[
        AttributeDecl::plain("id"),
        AttributeDecl::plain("emails"),
        AttributeDecl::plain("displayName"),
        AttributeDecl::plain("avatar"),
        AttributeDecl::timestamp("created"),
    ]
);

impl Person {
    pub fn id(&self) -> Result<&str> {
        self.0.get_str("id")
    }

    /// Email addresses; non-string entries are skipped.
    pub fn emails(&self) -> Result<Vec<&str>> {
        Ok(self
            .0
            .get_array("emails")?
            .iter()
            .filter_map(Json::as_str)
            .collect())
    }

    pub fn display_name(&self) -> Result<&str> {
        self.0.get_str("displayName")
    }

    pub fn avatar(&self) -> Result<&str> {
        self.0.get_str("avatar")
    }

    pub fn created(&self) -> Result<&Timestamp> {
        self.0.get_timestamp("created")
    }
}

// =============================================================================
// Memberships
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Membership(Model);

impl_resource!(
    Membership,
    "membership",
    &[
        AttributeDecl::plain("id"),
        AttributeDecl::plain("personId"),
        AttributeDecl::plain("personEmail"),
        AttributeDecl::plain("personDisplayName"),
        AttributeDecl::plain("roomId"),
        AttributeDecl::plain("isModerator"),
        AttributeDecl::plain("isMonitor"),
        AttributeDecl::timestamp("created"),
    ]
);

impl Membership {
    pub fn id(&self) -> Result<&str> {
        self.0.get_str("id")
    }

    pub fn person_id(&self) -> Result<&str> {
        self.0.get_str("personId")
    }

    pub fn person_email(&self) -> Result<&str> {
        self.0.get_str("personEmail")
    }

    pub fn person_display_name(&self) -> Result<&str> {
        self.0.get_str("personDisplayName")
    }

    pub fn room_id(&self) -> Result<&str> {
        self.0.get_str("roomId")
    }

    pub fn is_moderator(&self) -> Result<bool> {
        self.0.get_bool("isModerator")
    }

    pub fn is_monitor(&self) -> Result<bool> {
        self.0.get_bool("isMonitor")
    }

    pub fn created(&self) -> Result<&Timestamp> {
        self.0.get_timestamp("created")
    }
}

// =============================================================================
// Messages
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Message(Model);

impl_resource!(
    Message,
    "message",
    &[
        AttributeDecl::plain("id"),
        AttributeDecl::plain("roomId"),
        AttributeDecl::plain("text"),
        AttributeDecl::plain("personId"),
        AttributeDecl::plain("personEmail"),
        AttributeDecl::timestamp("created"),
    ]
);

impl Message {
    pub fn id(&self) -> Result<&str> {
        self.0.get_str("id")
    }

    pub fn room_id(&self) -> Result<&str> {
        self.0.get_str("roomId")
    }

    pub fn text(&self) -> Result<&str> {
        self.0.get_str("text")
    }

    pub fn person_id(&self) -> Result<&str> {
        self.0.get_str("personId")
    }

    pub fn person_email(&self) -> Result<&str> {
        self.0.get_str("personEmail")
    }

    pub fn created(&self) -> Result<&Timestamp> {
        self.0.get_timestamp("created")
    }
}

// =============================================================================
// Teams
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Team(Model);

impl_resource!(
    Team,
    "team",
    &[
        AttributeDecl::plain("id"),
        AttributeDecl::plain("name"),
        AttributeDecl::timestamp("created"),
    ]
);

impl Team {
    pub fn id(&self) -> Result<&str> {
        self.0.get_str("id")
    }

    pub fn name(&self) -> Result<&str> {
        self.0.get_str("name")
    }

    pub fn created(&self) -> Result<&Timestamp> {
        self.0.get_timestamp("created")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamMembership(Model);

impl_resource!(
    TeamMembership,
    "team membership",
    &[
        AttributeDecl::plain("id"),
        AttributeDecl::plain("teamId"),
        AttributeDecl::plain("personEmail"),
        AttributeDecl::plain("personDisplayName"),
        AttributeDecl::plain("isModerator"),
        AttributeDecl::timestamp("created"),
    ]
);

impl TeamMembership {
    pub fn id(&self) -> Result<&str> {
        self.0.get_str("id")
    }

    pub fn team_id(&self) -> Result<&str> {
        self.0.get_str("teamId")
    }

    pub fn person_email(&self) -> Result<&str> {
        self.0.get_str("personEmail")
    }

    pub fn person_display_name(&self) -> Result<&str> {
        self.0.get_str("personDisplayName")
    }

    pub fn is_moderator(&self) -> Result<bool> {
        self.0.get_bool("isModerator")
    }

    pub fn created(&self) -> Result<&Timestamp> {
        self.0.get_timestamp("created")
    }
}

// =============================================================================
// Webhooks
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Webhook(Model);

impl_resource!(
    Webhook,
    "webhook",
    &[
        AttributeDecl::plain("id"),
        AttributeDecl::plain("name"),
        AttributeDecl::plain("resource"),
        AttributeDecl::plain("event"),
        AttributeDecl::plain("filter"),
        AttributeDecl::plain("data"),
    ]
);

impl Webhook {
    pub fn id(&self) -> Result<&str> {
        self.0.get_str("id")
    }

    pub fn name(&self) -> Result<&str> {
        self.0.get_str("name")
    }

    pub fn resource(&self) -> Result<&str> {
        self.0.get_str("resource")
    }

    pub fn event(&self) -> Result<&str> {
        self.0.get_str("event")
    }

    pub fn filter(&self) -> Result<&str> {
        self.0.get_str("filter")
    }

    /// Event payload delivered to the webhook target.
    pub fn data(&self) -> Result<&Value> {
        self.0.get("data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_room() -> Json {
        json!({
            "id": "Y2lzY29zcGFyazovL3VzL1JPT00vYmJjZWIxYWQtNDNmMS0zYjU4LTkxNDctZjE0YmIwYzRkMTU0",
            "title": "Project Unicorn - Sprint 0",
            "type": "group",
            "isLocked": true,
            "teamId": "Y2lzY29zcGFyazovL3VzL1JPT00vNjRlNDVhZTAtYzQ2Yi0xMWU1LTlkZjktMGQ0MWUzNDIxOTcz",
            "lastActivity": "2016-04-21T19:12:48.920Z",
            "created": "2016-04-21T19:01:55.966Z"
        })
    }

    fn sample_person() -> Json {
        json!({
            "id": "Y2lzY29zcGFyazovL3VzL1BFT1BMRS9mNWIzNjE4Ny1jOGRkLTQ3MjctOGIyZi1mOWM0NDdmMjkwNDY",
            "emails": ["johnny.chang@foomail.com", "jchang@barmail.com"],
            "displayName": "John Andersen",
            "avatar": "https://1efa7a94ed21783e352-c62266528714497a17239ececf39e9e2.ssl.cf1.rackcdn.com/V1~54c844c89e678e5a7b16a306bc2897b9~wx29yGtlTpilEFlYzqPKag==~1600",
            "created": "2015-10-18T14:26:16.000Z"
        })
    }

    #[test]
    fn test_room_typed_accessors() {
        let room = Room::from_json(sample_room()).unwrap();

        assert_eq!(room.title().unwrap(), "Project Unicorn - Sprint 0");
        assert!(room.is_locked().unwrap());
        assert_eq!(
            room.created().unwrap().instant(),
            Utc.with_ymd_and_hms(2016, 4, 21, 19, 1, 55).unwrap()
                + chrono::Duration::milliseconds(966)
        );
        assert_eq!(
            room.last_activity().unwrap().to_string(),
            "2016-04-21T19:12:48.920Z"
        );
        // Keys outside the static table are declared dynamically
        assert_eq!(room.get("type").unwrap().as_str(), Some("group"));
    }

    #[test]
    fn test_room_round_trip() {
        let input = sample_room();
        let room = Room::from_json(input.clone()).unwrap();
        assert_eq!(room.to_json().unwrap(), input);
    }

    #[test]
    fn test_room_missing_static_member() {
        let room = Room::from_json(json!({"id": "abc", "title": "t"})).unwrap();
        assert_eq!(
            room.is_locked().unwrap_err(),
            Error::Uninitialized("isLocked".to_string())
        );
        assert_eq!(
            room.get("sipAddress").unwrap_err(),
            Error::NoSuchAttribute("sipAddress".to_string())
        );
    }

    #[test]
    fn test_room_invalid_timestamp() {
        let err = Room::from_json(json!({"created": "2016-04-21T19:01:55Z"})).unwrap_err();
        assert!(matches!(err, Error::InvalidTimestamp(_)));
    }

    #[test]
    fn test_person_accessors() {
        let person = Person::from_json(sample_person()).unwrap();
        assert_eq!(person.display_name().unwrap(), "John Andersen");
        assert_eq!(
            person.emails().unwrap(),
            vec!["johnny.chang@foomail.com", "jchang@barmail.com"]
        );
        assert_eq!(
            person.created().unwrap().to_string(),
            "2015-10-18T14:26:16.000Z"
        );
    }

    #[test]
    fn test_membership_accessors() {
        let membership = Membership::from_json(json!({
            "id": "m1",
            "roomId": "r1",
            "personId": "p1",
            "personEmail": "john@example.com",
            "personDisplayName": "John",
            "isModerator": true,
            "isMonitor": false,
            "created": "2015-10-18T14:26:16.203Z"
        }))
        .unwrap();

        assert_eq!(membership.room_id().unwrap(), "r1");
        assert!(membership.is_moderator().unwrap());
        assert!(!membership.is_monitor().unwrap());
        assert_eq!(membership.person_display_name().unwrap(), "John");
    }

    #[test]
    fn test_message_accessors() {
        let message = Message::from_json(json!(
            r#"{"id": "msg1", "roomId": "r1", "text": "PROJECT UPDATE", "files": ["http://www.example.com/images/media.png"], "created": "2015-10-18T14:26:16.203Z"}"#
        ))
        .unwrap();

        assert_eq!(message.text().unwrap(), "PROJECT UPDATE");
        assert_eq!(
            message.get("files").unwrap().as_array().map(Vec::len),
            Some(1)
        );
        assert_eq!(
            message.person_email().unwrap_err(),
            Error::Uninitialized("personEmail".to_string())
        );
    }

    #[test]
    fn test_team_and_team_membership_accessors() {
        let team = Team::from_json(json!({"id": "t1", "name": "Build Squad", "created": "2015-10-18T14:26:16.203Z"})).unwrap();
        assert_eq!(team.name().unwrap(), "Build Squad");

        let member = TeamMembership::from_json(json!({
            "id": "tm1",
            "teamId": "t1",
            "personEmail": "john@example.com",
            "isModerator": false
        }))
        .unwrap();
        assert_eq!(member.team_id().unwrap(), "t1");
        assert!(!member.is_moderator().unwrap());
    }

    #[test]
    fn test_webhook_nested_data() {
        let webhook = Webhook::from_json(json!({
            "id": "w1",
            "name": "My Awesome Webhook",
            "targetUrl": "https://example.com/mywebhook",
            "resource": "messages",
            "event": "created",
            "filter": "roomId=r1",
            "data": {"id": "msg1", "roomId": "r1"}
        }))
        .unwrap();

        assert_eq!(webhook.event().unwrap(), "created");
        let data = webhook.data().unwrap().as_model().unwrap();
        assert_eq!(data.get_str("roomId").unwrap(), "r1");
        assert_eq!(
            webhook.get("targetUrl").unwrap().as_str(),
            Some("https://example.com/mywebhook")
        );
    }

    #[test]
    fn test_attribute_tables_have_no_duplicates() {
        for table in [
            Room::ATTRIBUTES,
            Person::ATTRIBUTES,
            Membership::ATTRIBUTES,
            Message::ATTRIBUTES,
            Team::ATTRIBUTES,
            TeamMembership::ATTRIBUTES,
            Webhook::ATTRIBUTES,
        ] {
            let mut names: Vec<&str> = table.iter().map(|decl| decl.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), table.len());
        }
    }
}
