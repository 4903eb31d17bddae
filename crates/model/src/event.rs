use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayV2httpRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound form submission.
///
/// Only `body` is read; any other fields of the invocation payload, such as the
/// rest of an API Gateway proxy envelope, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormEvent {
    #[serde(default)]
    pub body: Option<EventBody>,
}

/// Body of a form submission as delivered by the invoker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventBody {
    /// JSON encoded as a string, as API Gateway proxy integrations deliver it
    Encoded(String),
    /// Already decoded JSON, as direct invocations may deliver it
    Decoded(Value),
}

impl FormEvent {
    pub fn encoded(body: impl Into<String>) -> Self {
        FormEvent {
            body: Some(EventBody::Encoded(body.into())),
        }
    }

    pub fn decoded(body: Value) -> Self {
        FormEvent {
            body: Some(EventBody::Decoded(body)),
        }
    }
}

impl From<ApiGatewayProxyRequest> for FormEvent {
    fn from(request: ApiGatewayProxyRequest) -> Self {
        FormEvent {
            body: request.body.map(EventBody::Encoded),
        }
    }
}

impl From<ApiGatewayV2httpRequest> for FormEvent {
    fn from(request: ApiGatewayV2httpRequest) -> Self {
        FormEvent {
            body: request.body.map(EventBody::Encoded),
        }
    }
}
