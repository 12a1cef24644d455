use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Current state of a Home Assistant entity as returned by `/api/states/<id>`.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: IndexMap<String, Value>,
}

impl EntityState {
    /// Attribute rendered as display text. `null` counts as absent.
    pub fn attribute_text(&self, key: &str) -> Option<String> {
        self.attributes.get(key).and_then(value_text)
    }
}

/// Plain text form of a JSON scalar: strings unquoted, numbers as written.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Body of `POST /api/services/<domain>/<action>?return_response`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub changed_states: Vec<Value>,
    #[serde(default)]
    pub service_response: IndexMap<String, Value>,
}
