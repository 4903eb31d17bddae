use serde::{Deserialize, Serialize};
use serde_json::json;

pub const STORED_MESSAGE: &str = "Data stored successfully!";

/// HTTP shaped response returned to the invoker, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormResponse {
    pub status_code: u16,
    /// JSON document encoded as a string
    pub body: String,
    pub headers: ResponseHeaders,
}

/// The fixed pair of headers sent with every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Access-Control-Allow-Origin")]
    pub access_control_allow_origin: String,
}

impl Default for ResponseHeaders {
    fn default() -> Self {
        ResponseHeaders {
            content_type: "application/json".to_string(),
            access_control_allow_origin: "*".to_string(),
        }
    }
}

impl FormResponse {
    /// 200 acknowledging a stored form
    pub fn stored(form_id: &str) -> Self {
        FormResponse {
            status_code: 200,
            body: json!({ "message": STORED_MESSAGE, "form_id": form_id }).to_string(),
            headers: ResponseHeaders::default(),
        }
    }

    /// 500 carrying an error message
    pub fn error(message: impl Into<String>) -> Self {
        FormResponse {
            status_code: 500,
            body: json!({ "error": message.into() }).to_string(),
            headers: ResponseHeaders::default(),
        }
    }
}
