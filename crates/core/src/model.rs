//! Structured-data mapper
//!
//! Turns a JSON object into an immutable [`Model`]: every top-level key becomes a
//! write-once attribute, nested objects become nested models, arrays and scalars are
//! kept as they are. Construction goes through a [`ModelBuilder`], which is the only
//! place attributes can be assigned.

use std::str::FromStr;

use serde_json::{Map, Value as Json};

use crate::attribute::{AttributeDecl, AttributeKind, AttributeSet, Value};
use crate::error::{Error, Result};
use crate::timestamp::Timestamp;

/// Accumulates attribute assignments and produces an immutable [`Model`].
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    attributes: AttributeSet,
    json_keys: Vec<String>,
}

impl ModelBuilder {
    /// A builder with no declared attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder pre-declaring a variant's static attributes.
    pub fn with_schema(schema: &[AttributeDecl]) -> Result<Self> {
        Ok(Self {
            attributes: AttributeSet::from_decls(schema)?,
            json_keys: Vec::new(),
        })
    }

    pub fn declare(&mut self, name: &str, kind: AttributeKind) -> Result<&mut Self> {
        self.attributes.declare(name, kind)?;
        Ok(self)
    }

    /// Assign a declared attribute. The attribute is not recorded as a payload key.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self> {
        self.attributes.set(name, value.into())?;
        Ok(self)
    }

    /// Assign a payload key, declaring it when the schema does not know it yet.
    ///
    /// Nested objects are mapped into generic models before assignment.
    pub fn assign(&mut self, key: &str, json: Json) -> Result<&mut Self> {
        if !self.attributes.is_declared(key) {
            self.attributes.declare(key, AttributeKind::Plain)?;
        }

        let value = match json {
            Json::Object(map) => Value::Model(Model::from_map(map, &[])?),
            other => Value::Json(other),
        };

        self.attributes.set(key, value)?;
        self.json_keys.push(key.to_string());
        Ok(self)
    }

    pub fn build(self) -> Model {
        Model {
            attributes: self.attributes,
            json_keys: self.json_keys,
        }
    }
}

/// An immutable view of one JSON resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    attributes: AttributeSet,
    json_keys: Vec<String>,
}

impl Model {
    /// Map a JSON object, or a JSON string that encodes one, into a generic model.
    pub fn from_json(value: Json) -> Result<Self> {
        Self::from_json_with_schema(value, &[])
    }

    /// Map a JSON object onto a schema. Keys outside the schema are declared as
    /// plain attributes; schema entries missing from the payload stay unset.
    pub fn from_json_with_schema(value: Json, schema: &[AttributeDecl]) -> Result<Self> {
        Self::from_map(into_object(value)?, schema)
    }

    fn from_map(map: Map<String, Json>, schema: &[AttributeDecl]) -> Result<Self> {
        let mut builder = ModelBuilder::with_schema(schema)?;
        for (key, json) in map {
            builder.assign(&key, json)?;
        }
        Ok(builder.build())
    }

    pub fn builder() -> ModelBuilder {
        ModelBuilder::new()
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.attributes.get(name)
    }

    pub fn get_str(&self, name: &str) -> Result<&str> {
        self.get(name)?
            .as_str()
            .ok_or_else(|| unexpected(name, "a string"))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.get(name)?
            .as_bool()
            .ok_or_else(|| unexpected(name, "a boolean"))
    }

    pub fn get_array(&self, name: &str) -> Result<&Vec<Json>> {
        self.get(name)?
            .as_array()
            .ok_or_else(|| unexpected(name, "an array"))
    }

    pub fn get_timestamp(&self, name: &str) -> Result<&Timestamp> {
        self.get(name)?
            .as_timestamp()
            .ok_or_else(|| unexpected(name, "a timestamp"))
    }

    pub fn get_model(&self, name: &str) -> Result<&Model> {
        self.get(name)?
            .as_model()
            .ok_or_else(|| unexpected(name, "an object"))
    }

    /// Whether an attribute with this name was declared, set or not.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.is_declared(name)
    }

    /// Keys present in the source payload, in payload order.
    pub fn json_keys(&self) -> &[String] {
        &self.json_keys
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Serialize the payload keys back into a JSON object.
    pub fn to_json(&self) -> Result<Json> {
        let mut map = Map::new();
        for key in &self.json_keys {
            map.insert(key.clone(), self.attributes.get(key)?.to_json()?);
        }
        Ok(Json::Object(map))
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let json = self.to_json()?;
        let encoded = if pretty {
            serde_json::to_string_pretty(&json)
        } else {
            serde_json::to_string(&json)
        };
        encoded.map_err(serialization_error)
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(Json::String(s.to_string()))
    }
}

impl TryFrom<Json> for Model {
    type Error = Error;

    fn try_from(value: Json) -> Result<Self> {
        Self::from_json(value)
    }
}

/// Accept an object as is, or parse a string holding one.
fn into_object(value: Json) -> Result<Map<String, Json>> {
    match value {
        Json::Object(map) => Ok(map),
        Json::String(text) => match serde_json::from_str::<Json>(&text) {
            Ok(Json::Object(map)) => Ok(map),
            Ok(other) => Err(Error::BadInput(format!(
                "expected a JSON object, got {}",
                json_type(&other)
            ))),
            Err(e) => Err(Error::BadInput(format!("invalid JSON string: {e}"))),
        },
        other => Err(Error::BadInput(format!(
            "expected a JSON object or a JSON string, got {}",
            json_type(&other)
        ))),
    }
}

fn json_type(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

fn serialization_error(e: serde_json::Error) -> Error {
    Error::Serialization(e.to_string())
}

fn unexpected(name: &str, expected: &'static str) -> Error {
    Error::UnexpectedType {
        name: name.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_room_json() -> Json {
        json!({
            "id": "Y2lzY29zcGFyazovL3VzL1JPT00vYmJjZWIxYWQtNDNmMS0zYjU4LTkxNDctZjE0YmIwYzRkMTU0",
            "title": "Project Unicorn - Sprint 0",
            "isLocked": false,
            "tags": ["sprint", 0, null],
            "created": "2016-04-21T19:01:55.966Z",
            "owner": {
                "displayName": "John Andersen",
                "address": { "city": "Lisbon" }
            }
        })
    }

    // ============================================================================
    // from_json tests
    // ============================================================================

    #[test]
    fn test_from_json_maps_every_key() {
        let model = Model::from_json(sample_room_json()).unwrap();

        assert_eq!(model.get_str("title").unwrap(), "Project Unicorn - Sprint 0");
        assert!(!model.get_bool("isLocked").unwrap());
        assert_eq!(model.get_array("tags").unwrap().len(), 3);
        // Generic models keep timestamps as plain strings
        assert_eq!(
            model.get_str("created").unwrap(),
            "2016-04-21T19:01:55.966Z"
        );
        assert_eq!(model.json_keys().len(), 6);
    }

    #[test]
    fn test_from_json_maps_nested_objects() {
        let model = Model::from_json(sample_room_json()).unwrap();

        let owner = model.get_model("owner").unwrap();
        assert_eq!(owner.get_str("displayName").unwrap(), "John Andersen");
        let address = owner.get_model("address").unwrap();
        assert_eq!(address.get_str("city").unwrap(), "Lisbon");
    }

    #[test]
    fn test_from_json_accepts_json_string() {
        let model = Model::from_json(json!(r#"{"id": "abc", "count": 2}"#)).unwrap();
        assert_eq!(model.get_str("id").unwrap(), "abc");
        assert_eq!(model.get("count").unwrap().as_i64(), Some(2));

        let parsed: Model = r#"{"id": "abc"}"#.parse().unwrap();
        assert_eq!(parsed.get_str("id").unwrap(), "abc");
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        for bad in [json!(42), json!([1, 2]), json!(null), json!(true)] {
            assert!(matches!(Model::from_json(bad), Err(Error::BadInput(_))));
        }
        assert!(matches!(
            Model::from_json(json!("[1, 2]")),
            Err(Error::BadInput(_))
        ));
        assert!(matches!(
            Model::from_json(json!("{not json")),
            Err(Error::BadInput(_))
        ));
    }

    #[test]
    fn test_schema_typed_member_parses_timestamp() {
        let schema = [AttributeDecl::plain("id"), AttributeDecl::timestamp("created")];
        let model = Model::from_json_with_schema(sample_room_json(), &schema).unwrap();

        let created = model.get_timestamp("created").unwrap();
        assert_eq!(created.instant().timestamp_subsec_millis(), 966);
    }

    #[test]
    fn test_schema_invalid_timestamp_fails_construction() {
        let schema = [AttributeDecl::timestamp("created")];
        let err = Model::from_json_with_schema(json!({"created": "2016-04-21"}), &schema)
            .unwrap_err();
        assert_eq!(err, Error::InvalidTimestamp("2016-04-21".to_string()));
    }

    #[test]
    fn test_schema_member_absent_from_payload_is_uninitialized() {
        let schema = [AttributeDecl::plain("id"), AttributeDecl::plain("isLocked")];
        let model = Model::from_json_with_schema(json!({"id": "abc"}), &schema).unwrap();

        assert!(model.has_attribute("isLocked"));
        assert_eq!(
            model.get("isLocked").unwrap_err(),
            Error::Uninitialized("isLocked".to_string())
        );
        assert_eq!(
            model.get("teamId").unwrap_err(),
            Error::NoSuchAttribute("teamId".to_string())
        );
        assert_eq!(model.to_json().unwrap(), json!({"id": "abc"}));
    }

    #[test]
    fn test_typed_getter_reports_shape_mismatch() {
        let model = Model::from_json(json!({"count": 3})).unwrap();
        assert_eq!(
            model.get_str("count").unwrap_err(),
            Error::UnexpectedType {
                name: "count".to_string(),
                expected: "a string",
            }
        );
    }

    // ============================================================================
    // Builder tests
    // ============================================================================

    #[test]
    fn test_builder_assignments_are_write_once() {
        let mut builder = Model::builder();
        builder.assign("id", json!("abc")).unwrap();

        assert_eq!(
            builder.assign("id", json!("def")).unwrap_err(),
            Error::WriteProtected("id".to_string())
        );

        let model = builder.build();
        assert_eq!(model.get_str("id").unwrap(), "abc");
        assert_eq!(model.json_keys(), ["id".to_string()]);
    }

    #[test]
    fn test_builder_set_requires_declaration() {
        let mut builder = ModelBuilder::new();
        assert_eq!(
            builder.set("title", json!("x")).unwrap_err(),
            Error::NoSuchAttribute("title".to_string())
        );

        builder
            .declare("title", AttributeKind::Plain)
            .unwrap()
            .set("title", json!("x"))
            .unwrap();
        let model = builder.build();
        assert_eq!(model.get_str("title").unwrap(), "x");
        // Only payload keys are serialized
        assert_eq!(model.to_json().unwrap(), json!({}));
    }

    // ============================================================================
    // to_json tests
    // ============================================================================

    #[test]
    fn test_to_json_round_trips() {
        let input = sample_room_json();
        let model = Model::from_json(input.clone()).unwrap();
        assert_eq!(model.to_json().unwrap(), input);
    }

    #[test]
    fn test_to_json_round_trips_typed_timestamps() {
        let input = json!({"id": "abc", "created": "2016-04-01T12:00:00.000Z"});
        let schema = [AttributeDecl::timestamp("created")];
        let model = Model::from_json_with_schema(input.clone(), &schema).unwrap();
        assert_eq!(model.to_json().unwrap(), input);
    }

    #[test]
    fn test_encoding_failures_are_not_bad_input() {
        let e = serde_json::to_string(&std::collections::BTreeMap::from([(vec![1u8], 1)]))
            .unwrap_err();
        assert!(matches!(serialization_error(e), Error::Serialization(_)));
    }

    #[test]
    fn test_to_json_string() {
        let model = Model::from_json(json!({"b": 1, "a": "x"})).unwrap();
        assert_eq!(model.to_json_string(false).unwrap(), r#"{"a":"x","b":1}"#);
        assert!(model.to_json_string(true).unwrap().contains("\n  \"a\": \"x\""));
    }

    #[test]
    fn test_empty_object_maps_to_empty_model() {
        let model = Model::from_json(json!({"nested": {}})).unwrap();
        assert!(model.get_model("nested").unwrap().attributes().is_empty());
        assert_eq!(model.to_json().unwrap(), json!({"nested": {}}));
    }
}
