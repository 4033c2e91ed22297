use models::{FeatureDocument, FeatureId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a create or replace request.
///
/// Only JSON objects are accepted. `geometry` and `properties` are taken
/// verbatim (absent means `null`); every other key, `type` and any
/// identifier included, is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct FeatureInput {
    pub geometry: Value,
    pub properties: Value,
}

impl From<Map<String, Value>> for FeatureInput {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            geometry: body.remove("geometry").unwrap_or(Value::Null),
            properties: body.remove("properties").unwrap_or(Value::Null),
        }
    }
}

impl FeatureInput {
    pub fn into_document(self) -> FeatureDocument {
        FeatureDocument::new(self.geometry, self.properties)
    }
}

/// A feature as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Value,
    pub properties: Value,
}

impl From<FeatureDocument> for Feature {
    fn from(doc: FeatureDocument) -> Self {
        Self {
            id: doc.feature_id().map(|id| id.to_hex()).unwrap_or_default(),
            kind: doc.kind,
            geometry: doc.geometry,
            properties: doc.properties,
        }
    }
}

/// Response of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Created {
    #[serde(rename = "insertedID")]
    pub inserted_id: String,
}

impl From<FeatureId> for Created {
    fn from(id: FeatureId) -> Self {
        Self { inserted_id: id.to_hex() }
    }
}

/// Counts reported by the store for a replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaceOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn input_ignores_type_and_ids() {
        let input: FeatureInput = serde_json::from_value(json!({
            "_id": "000000000000000000000000",
            "id": 7,
            "type": "NotAFeature",
            "geometry": {"type": "Point", "coordinates": [1, 2]},
            "properties": {"name": "x"}
        }))
        .unwrap();
        let doc = input.into_document();
        assert_eq!(doc.kind, "Feature");
        assert!(doc.id.is_none());
        assert_eq!(doc.properties, json!({"name": "x"}));
    }

    #[test]
    fn input_must_be_an_object() {
        assert!(serde_json::from_value::<FeatureInput>(json!([1, 2])).is_err());
        assert!(serde_json::from_value::<FeatureInput>(json!("Feature")).is_err());
    }

    #[test]
    fn missing_members_become_null() {
        let input: FeatureInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input, FeatureInput { geometry: Value::Null, properties: Value::Null });
    }

    #[test]
    fn created_uses_inserted_id_key() {
        let id: FeatureId = "64b7f0c2a1b2c3d4e5f60718".parse().unwrap();
        let v = serde_json::to_value(Created::from(id)).unwrap();
        assert_eq!(v, json!({"insertedID": "64b7f0c2a1b2c3d4e5f60718"}));
    }
}
