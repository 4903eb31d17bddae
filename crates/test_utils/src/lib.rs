use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
use aws_smithy_mocks::{Rule, mock, mock_client};
use model::FormEvent;
use model::env::FORM_TABLE_NAME;
use std::env;

/// Test table name
pub const TEST_TABLE: &str = "forms";

/// Create a dummy API Gateway proxy request with a set body
pub fn api_gateway_request(body: Option<&str>) -> ApiGatewayProxyRequest {
    ApiGatewayProxyRequest {
        resource: Some("/forms".to_string()),
        path: Some("/forms".to_string()),
        body: body.map(str::to_string),
        ..Default::default()
    }
}

/// The JSON payload Lambda would deliver for an API Gateway request with a set body
pub fn api_gateway_payload(body: Option<&str>) -> serde_json::Value {
    serde_json::to_value(api_gateway_request(body)).expect("Request should serialize")
}

/// A form event as received from API Gateway, with the body still encoded
pub fn form_event_with_body(body: &str) -> FormEvent {
    api_gateway_request(Some(body)).into()
}

/// A default mock DynamoDB client which accepts every put
pub fn create_mock_dynamodb_client() -> aws_sdk_dynamodb::Client {
    let put_item_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(|_| true)
        .sequence()
        .output(|| PutItemOutput::builder().build())
        .repeatedly()
        .build();

    mock_client!(aws_sdk_dynamodb, [&put_item_rule])
}

/// A mock DynamoDB client whose puts fail as if the table doesn't exist
pub fn create_failing_dynamodb_client(message: &'static str) -> aws_sdk_dynamodb::Client {
    let put_item_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
        .match_requests(|_| true)
        .sequence()
        .error(move || {
            PutItemError::ResourceNotFoundException(
                ResourceNotFoundException::builder().message(message).build(),
            )
        })
        .repeatedly()
        .build();

    mock_client!(aws_sdk_dynamodb, [&put_item_rule])
}

/// Setup default environment variables used in testing
pub fn setup_default_env() {
    unsafe {
        env::set_var(FORM_TABLE_NAME, TEST_TABLE);
    }
}
