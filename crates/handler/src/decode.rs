use model::EventBody;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("request body is missing")]
    MissingBody,
    #[error("request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Turn the event body into the mapping that becomes the stored record.
pub(crate) fn decode_body(body: Option<EventBody>) -> Result<Map<String, Value>, DecodeError> {
    let value: Value = match body.ok_or(DecodeError::MissingBody)? {
        EventBody::Encoded(encoded) => serde_json::from_str(&encoded)?,
        EventBody::Decoded(decoded) => decoded,
    };

    match value {
        Value::Object(fields) => Ok(fields),
        other => Err(DecodeError::NotAnObject(kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
