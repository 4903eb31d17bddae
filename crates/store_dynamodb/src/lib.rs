use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::config::retry::RetryConfig;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::put_item::{PutItemError, PutItemOutput};
use aws_sdk_dynamodb::types::AttributeValue;
use lambda_runtime::tracing;
use model::{FORM_ID, FormRecord};
use std::collections::HashMap;
use store::StoreErrorReason::{BackendFailure, BadRecord, Conflict};
use store::{RecordStore, StoreError};

mod config;

pub use config::{ConfigError, DynamoDbStoreConfig};

/// Build the DynamoDB client used by [`DynamoDbRecordStore`].
pub fn dynamodb_client(sdk_config: &SdkConfig) -> aws_sdk_dynamodb::Client {
    aws_sdk_dynamodb::Client::from_conf(
        without_retries(aws_sdk_dynamodb::config::Builder::from(sdk_config)).build(),
    )
}

/// Each form is written at most once, so the SDK must not retry a failed put.
pub fn without_retries(
    builder: aws_sdk_dynamodb::config::Builder,
) -> aws_sdk_dynamodb::config::Builder {
    builder.retry_config(RetryConfig::disabled())
}

/// Writes each form record as one DynamoDB item.
pub struct DynamoDbRecordStore {
    dynamodb_client: aws_sdk_dynamodb::Client,
    config: DynamoDbStoreConfig,
}

#[async_trait]
impl RecordStore for DynamoDbRecordStore {
    async fn put(&self, record: FormRecord) -> Result<(), StoreError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(&record)
            .map_err(|err| StoreError::new(record.form_id(), BadRecord(err.to_string())))?;

        tracing::debug!(
            table_name = %self.config.table_name,
            form_id = record.form_id(),
            "Putting form record"
        );

        self.put_item(item).await.map_err(|err| {
            let reason = match err.as_service_error() {
                Some(service_err) if service_err.is_conditional_check_failed_exception() => {
                    Conflict
                }
                _ => {
                    tracing::error!(
                        form_id = record.form_id(),
                        error = %DisplayErrorContext(&err),
                        "PutItem failed"
                    );

                    BackendFailure(backend_message(&err))
                }
            };

            StoreError::new(record.form_id(), reason)
        })?;

        Ok(())
    }
}

impl DynamoDbRecordStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, config: DynamoDbStoreConfig) -> Self {
        DynamoDbRecordStore {
            dynamodb_client,
            config,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.config.table_name
    }

    async fn put_item(
        &self,
        item: HashMap<String, AttributeValue>,
    ) -> Result<PutItemOutput, SdkError<PutItemError, HttpResponse>> {
        let condition_expression: Option<String> = self
            .config
            .conditional_put
            .then(|| format!("attribute_not_exists({FORM_ID})"));

        self.dynamodb_client
            .put_item()
            .table_name(&self.config.table_name)
            .set_item(Some(item))
            .set_condition_expression(condition_expression)
            .send()
            .await
    }
}

/// Short description of a failed put, without the raw HTTP response.
fn backend_message(err: &SdkError<PutItemError, HttpResponse>) -> String {
    match err.as_service_error() {
        Some(service_err) => {
            let display: String = service_err.to_string();
            // Unmodeled errors only display their code
            match (service_err.code(), service_err.message()) {
                (Some(code), Some(message)) if !display.contains(message) => {
                    format!("{code}: {message}")
                }
                _ => display,
            }
        }
        None => {
            let mut message: String = err.to_string();
            let mut source = std::error::Error::source(err);
            while let Some(inner) = source {
                message.push_str(&format!(": {inner}"));
                source = inner.source();
            }
            message
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::ConditionalCheckFailedException;
    use aws_smithy_mocks::{Rule, mock, mock_client};
    use serde_json::{Map, Value, json};
    use store::StoreErrorReason;
    use test_utils::{TEST_TABLE, create_failing_dynamodb_client};

    fn record(form_id: &str) -> FormRecord {
        let mut fields: Map<String, Value> = Map::new();
        fields.insert("name".to_string(), json!("Alice"));
        fields.insert("age".to_string(), json!(30));

        FormRecord::new(fields, form_id)
    }

    fn string_attr<'a>(item: &'a HashMap<String, AttributeValue>, key: &str) -> Option<&'a str> {
        item.get(key)
            .and_then(|value| value.as_s().ok())
            .map(String::as_str)
    }

    #[tokio::test]
    async fn put_writes_item_to_table() {
        let put_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
            .match_requests(|req| {
                let item = req.item().expect("Item should be set");

                req.table_name() == Some(TEST_TABLE)
                    && req.condition_expression().is_none()
                    && string_attr(item, "form_id") == Some("id-1")
                    && string_attr(item, "name") == Some("Alice")
                    && item.get("age").and_then(|age| age.as_n().ok()) == Some(&"30".to_string())
            })
            .then_output(|| PutItemOutput::builder().build());

        let store = DynamoDbRecordStore::new(
            mock_client!(aws_sdk_dynamodb, [&put_rule]),
            DynamoDbStoreConfig::new(TEST_TABLE),
        );

        store.put(record("id-1")).await.expect("Put should succeed");

        assert_eq!(1, put_rule.num_calls());
    }

    #[tokio::test]
    async fn conditional_put_guards_form_id() {
        let put_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
            .match_requests(|req| {
                req.condition_expression() == Some("attribute_not_exists(form_id)")
            })
            .then_output(|| PutItemOutput::builder().build());

        let store = DynamoDbRecordStore::new(
            mock_client!(aws_sdk_dynamodb, [&put_rule]),
            DynamoDbStoreConfig {
                table_name: TEST_TABLE.to_string(),
                conditional_put: true,
            },
        );

        store.put(record("id-2")).await.expect("Put should succeed");

        assert_eq!(1, put_rule.num_calls());
    }

    #[tokio::test]
    async fn existing_form_id_is_a_conflict() {
        let put_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item)
            .then_error(|| {
                PutItemError::ConditionalCheckFailedException(
                    ConditionalCheckFailedException::builder()
                        .message("The conditional request failed")
                        .build(),
                )
            });

        let store = DynamoDbRecordStore::new(
            mock_client!(aws_sdk_dynamodb, [&put_rule]),
            DynamoDbStoreConfig {
                table_name: TEST_TABLE.to_string(),
                conditional_put: true,
            },
        );

        let err: StoreError = store.put(record("id-3")).await.unwrap_err();

        assert_eq!("id-3", err.form_id);
        assert!(matches!(err.reason, StoreErrorReason::Conflict));
    }

    #[tokio::test]
    async fn backend_failure_carries_service_message() {
        let store = DynamoDbRecordStore::new(
            create_failing_dynamodb_client("Requested resource not found"),
            DynamoDbStoreConfig::new(TEST_TABLE),
        );

        let err: StoreError = store.put(record("id-4")).await.unwrap_err();

        match err.reason {
            StoreErrorReason::BackendFailure(message) => assert_eq!(
                "ResourceNotFoundException: Requested resource not found",
                message
            ),
            other => panic!("Expected a backend failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unmodeled_error_reports_code_and_message() {
        let put_rule: Rule = mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
            PutItemError::generic(
                ErrorMetadata::builder()
                    .code("ThrottlingException")
                    .message("Rate exceeded")
                    .build(),
            )
        });

        let store = DynamoDbRecordStore::new(
            mock_client!(aws_sdk_dynamodb, [&put_rule]),
            DynamoDbStoreConfig::new(TEST_TABLE),
        );

        let err: StoreError = store.put(record("id-5")).await.unwrap_err();

        assert!(matches!(
            err.reason,
            StoreErrorReason::BackendFailure(ref message) if message == "ThrottlingException: Rate exceeded"
        ));
    }

    #[test]
    fn exposes_table_name() {
        let store = DynamoDbRecordStore::new(
            test_utils::create_mock_dynamodb_client(),
            DynamoDbStoreConfig::new(TEST_TABLE),
        );

        assert_eq!(TEST_TABLE, store.table_name());
    }
}
