use std::fmt;
use std::str::FromStr;

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::errors::ModelError;

/// The only value ever written to a feature's `type` field.
pub const FEATURE_TYPE: &str = "Feature";

/// Store-assigned identifier of a feature (a MongoDB `ObjectId`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureId(ObjectId);

impl FeatureId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for FeatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for FeatureId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for FeatureId {
    type Err = ModelError;

    /// Accepts exactly 24 hex characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self).map_err(|e| ModelError::InvalidId {
            id: s.to_string(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// A feature as it is stored in the collection.
///
/// `geometry` and `properties` are kept verbatim; nothing checks that they
/// form valid GeoJSON. `_id` is left out on writes so the store assigns it
/// on insert and keeps it on replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Value,
    #[serde(default)]
    pub properties: Value,
}

fn feature_type() -> String {
    FEATURE_TYPE.to_string()
}

impl FeatureDocument {
    /// Build a document for writing; `type` is always [`FEATURE_TYPE`].
    pub fn new(geometry: Value, properties: Value) -> Self {
        Self {
            id: None,
            kind: feature_type(),
            geometry: fit_numbers(geometry),
            properties: fit_numbers(properties),
        }
    }

    /// Read a raw stored document without assuming who wrote it.
    ///
    /// Only `_id` must be an `ObjectId`. A non-string `type` reads as
    /// [`FEATURE_TYPE`]; `geometry` and `properties` of any BSON type come
    /// back as relaxed Extended JSON.
    pub fn from_stored(mut raw: Document) -> Result<Self, ModelError> {
        let id = match raw.remove("_id") {
            Some(Bson::ObjectId(oid)) => oid,
            Some(other) => return Err(ModelError::ForeignId(other.to_string())),
            None => return Err(ModelError::ForeignId("missing".into())),
        };
        let kind = match raw.remove("type") {
            Some(Bson::String(s)) => s,
            _ => feature_type(),
        };
        Ok(Self {
            id: Some(id),
            kind,
            geometry: stored_json(&mut raw, "geometry"),
            properties: stored_json(&mut raw, "properties"),
        })
    }

    pub fn with_id(mut self, id: FeatureId) -> Self {
        self.id = Some(id.object_id());
        self
    }

    pub fn feature_id(&self) -> Option<FeatureId> {
        self.id.map(FeatureId::from)
    }
}

fn stored_json(raw: &mut Document, key: &str) -> Value {
    raw.remove(key).map(Bson::into_relaxed_extjson).unwrap_or(Value::Null)
}

// BSON has no u64; anything above i64::MAX is written as a double.
fn fit_numbers(v: Value) -> Value {
    match v {
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (None, Some(u)) => Number::from_f64(u as f64).map_or(Value::Number(n), Value::Number),
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(fit_numbers).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, fit_numbers(v))).collect()),
        other => other,
    }
}
