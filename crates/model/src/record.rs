use serde::Serialize;
use serde_json::{Map, Value};

/// Key under which the generated identifier is stored.
pub const FORM_ID: &str = "form_id";

/// A form submission ready to be persisted.
///
/// Holds the caller's fields verbatim plus a `form_id`. The id is always the
/// one passed to [`FormRecord::new`], any caller supplied value is replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormRecord {
    fields: Map<String, Value>,
}

impl FormRecord {
    pub fn new(mut fields: Map<String, Value>, form_id: &str) -> Self {
        fields.insert(FORM_ID.to_string(), Value::String(form_id.to_string()));

        FormRecord { fields }
    }

    pub fn form_id(&self) -> &str {
        self.fields
            .get(FORM_ID)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}
