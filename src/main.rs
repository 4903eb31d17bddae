use aws_config::BehaviorVersion;
use handler::{FormHandler, form_fn};
use lambda_runtime::{LambdaEvent, service_fn, tracing};
use model::{Error, FormEvent};
use std::sync::Arc;
use store_dynamodb::{DynamoDbRecordStore, DynamoDbStoreConfig, dynamodb_client};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config: DynamoDbStoreConfig = DynamoDbStoreConfig::from_env()?;
    tracing::info!(table_name = %config.table_name, "Starting form handler");

    let client: aws_sdk_dynamodb::Client =
        dynamodb_client(&aws_config::load_defaults(BehaviorVersion::latest()).await);
    let handler: FormHandler =
        FormHandler::new(Arc::new(DynamoDbRecordStore::new(client, config)));
    let handler: &FormHandler = &handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<FormEvent>| {
        form_fn(handler, event)
    }))
    .await
}
