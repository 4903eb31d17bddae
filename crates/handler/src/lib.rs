use crate::decode::decode_body;
use lambda_runtime::tracing::{Instrument, Span};
use lambda_runtime::{LambdaEvent, tracing};
use model::{Error, FormEvent, FormRecord, FormResponse};
use serde_json::{Map, Value};
use std::sync::Arc;
use store::{RecordStore, StoreError};
use uuid::Uuid;

mod decode;

pub use crate::decode::DecodeError;

/// Anything that stops a form from being stored.
/// Every variant is reported to the caller as the same 500 response.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Accepts form submissions and writes each one to a [`RecordStore`].
///
/// The store is created once per execution context and shared by every
/// invocation; nothing else outlives a call to [`FormHandler::handle`].
pub struct FormHandler {
    store: Arc<dyn RecordStore>,
}

impl FormHandler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        FormHandler { store }
    }

    /// Store the event body under a freshly generated `form_id`.
    ///
    /// Never fails: errors become a 500 response carrying the error message.
    pub async fn handle(&self, event: FormEvent) -> FormResponse {
        match self.store_form(event).await {
            Ok(form_id) => {
                tracing::info!(form_id = %form_id, "Stored form");

                FormResponse::stored(&form_id)
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to store form");

                FormResponse::error(err.to_string())
            }
        }
    }

    async fn store_form(&self, event: FormEvent) -> Result<String, HandlerError> {
        let fields: Map<String, Value> = decode_body(event.body)?;

        let form_id: String = Uuid::new_v4().to_string();
        let record: FormRecord = FormRecord::new(fields, &form_id);

        // Single attempt, no retry
        self.store.put(record).await?;

        Ok(form_id)
    }
}

/// Lambda entry point for a [`FormHandler`], for use with `lambda_runtime::run()`.
///
/// ```no_compile
/// let handler = FormHandler::new(Arc::new(store));
/// lambda_runtime::run(service_fn(|event| form_fn(&handler, event))).await?;
/// ```
pub async fn form_fn(
    handler: &FormHandler,
    event: LambdaEvent<FormEvent>,
) -> Result<FormResponse, Error> {
    let request_id: &str = &event.context.request_id;
    let form_span: Span = tracing::span!(tracing::Level::INFO, "Form", request_id);

    Ok(handler.handle(event.payload).instrument(form_span).await)
}
