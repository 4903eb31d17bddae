use async_trait::async_trait;
use model::FormRecord;

/// Persist form records.
///
/// A store only ever receives each record once. Implementations decide how the
/// record is keyed, `form_id` is the expected partition key.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn put(&self, record: FormRecord) -> Result<(), StoreError>;
}

/// Errors arising from writing a record.
#[derive(Debug, thiserror::Error)]
#[error("failed to store form {form_id}: {reason}")]
pub struct StoreError {
    pub form_id: String,
    pub reason: StoreErrorReason,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreErrorReason {
    // The record couldn't be converted for the backend
    #[error("bad record: {0}")]
    BadRecord(String),
    // A record with the same form_id already exists
    #[error("form_id already exists")]
    Conflict,
    // An error from the underlying store
    #[error("{0}")]
    BackendFailure(String),
}

impl StoreError {
    pub fn new(form_id: impl Into<String>, reason: StoreErrorReason) -> Self {
        StoreError {
            form_id: form_id.into(),
            reason,
        }
    }
}
