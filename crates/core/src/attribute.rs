//! Write-once named attributes
//!
//! An [`Attribute`] is a named slot that accepts exactly one value. Reading it before
//! the value is set fails with [`Error::Uninitialized`]; setting it a second time fails
//! with [`Error::WriteProtected`]. An [`AttributeSet`] holds the slots of one model,
//! in declaration order, and tells an unset slot apart from a missing one.
//!
//! Names are bound when the slot is declared: variants declare their fixed fields with
//! an [`AttributeDecl`] table, payload keys are declared as they are discovered.

use std::fmt;

use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::model::Model;
use crate::timestamp::Timestamp;

/// How a slot interprets the values assigned to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Stores the assigned value unchanged.
    Plain,
    /// Parses string input into a [`Timestamp`] on assignment.
    Timestamp,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Plain => write!(f, "a plain attribute"),
            AttributeKind::Timestamp => write!(f, "a timestamp attribute"),
        }
    }
}

/// Static declaration of one attribute, used in variant tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDecl {
    pub name: &'static str,
    pub kind: AttributeKind,
}

impl AttributeDecl {
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeKind::Plain,
        }
    }

    pub const fn timestamp(name: &'static str) -> Self {
        Self {
            name,
            kind: AttributeKind::Timestamp,
        }
    }
}

/// Value held by an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON scalar or array, stored as received.
    Json(Json),
    Timestamp(Timestamp),
    /// Nested JSON object mapped into a generic model.
    Model(Model),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Json(json) => json.as_str(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Json(json) => json.as_bool(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Json(json) => json.as_i64(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Json>> {
        match self {
            Value::Json(json) => json.as_array(),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Value::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&Model> {
        match self {
            Value::Model(model) => Some(model),
            _ => None,
        }
    }

    /// Convert back into its JSON form. Timestamps become their formatted string.
    pub fn to_json(&self) -> Result<Json> {
        match self {
            Value::Json(json) => Ok(json.clone()),
            Value::Timestamp(ts) => Ok(Json::String(ts.to_string())),
            Value::Model(model) => model.to_json(),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        Value::Json(json)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<Model> for Value {
    fn from(model: Model) -> Self {
        Value::Model(model)
    }
}

/// A single write-once slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    value: Option<Value>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn is_initialized(&self) -> bool {
        self.value.is_some()
    }

    pub fn get(&self) -> Result<&Value> {
        self.value
            .as_ref()
            .ok_or_else(|| Error::Uninitialized(self.name.clone()))
    }

    /// Assign the slot's value. Fails if a value is already present.
    pub fn set(&mut self, value: Value) -> Result<()> {
        if self.value.is_some() {
            return Err(Error::WriteProtected(self.name.clone()));
        }

        let value = match self.kind {
            AttributeKind::Plain => value,
            AttributeKind::Timestamp => Value::Timestamp(coerce_timestamp(value)?),
        };

        self.value = Some(value);
        Ok(())
    }
}

fn coerce_timestamp(value: Value) -> Result<Timestamp> {
    match value {
        Value::Timestamp(ts) => Ok(ts),
        Value::Json(Json::String(s)) => Timestamp::parse(&s),
        Value::Json(other) => Err(Error::InvalidTimestamp(other.to_string())),
        Value::Model(_) => Err(Error::InvalidTimestamp("<object>".to_string())),
    }
}

/// The slot storage of one model, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    slots: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set with every entry of a static declaration table.
    pub fn from_decls(decls: &[AttributeDecl]) -> Result<Self> {
        let mut set = Self::new();
        for decl in decls {
            set.declare(decl.name, decl.kind)?;
        }
        Ok(set)
    }

    /// Register a slot. Redeclaring with the same kind is a no-op.
    pub fn declare(&mut self, name: &str, kind: AttributeKind) -> Result<()> {
        match self.slot(name) {
            Some(existing) if existing.kind == kind => Ok(()),
            Some(existing) => Err(Error::ConflictingDeclaration {
                name: name.to_string(),
                existing: existing.kind,
                requested: kind,
            }),
            None => {
                self.slots.push(Attribute::new(name, kind));
                Ok(())
            }
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    pub fn get(&self, name: &str) -> Result<&Value> {
        self.slot(name)
            .ok_or_else(|| Error::NoSuchAttribute(name.to_string()))?
            .get()
    }

    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        self.slots
            .iter_mut()
            .find(|slot| slot.name == name)
            .ok_or_else(|| Error::NoSuchAttribute(name.to_string()))?
            .set(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, name: &str) -> Option<&Attribute> {
        self.slots.iter().find(|slot| slot.name == name)
    }
}
