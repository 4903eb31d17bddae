use async_trait::async_trait;
use model::FormRecord;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use store::{RecordStore, StoreError, StoreErrorReason};

/// Keeps records in process, keyed by `form_id`.
/// Writing an existing `form_id` replaces the record, as an unconditional put would.
#[derive(Default, Clone)]
pub struct InMemoryRecordStore {
    records: Arc<Mutex<HashMap<String, FormRecord>>>,
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put(&self, record: FormRecord) -> Result<(), StoreError> {
        let form_id: String = record.form_id().to_string();

        self.records
            .lock()
            .map_err(|err| {
                StoreError::new(
                    form_id.clone(),
                    StoreErrorReason::BackendFailure(err.to_string()),
                )
            })?
            .insert(form_id, record);

        Ok(())
    }
}

impl InMemoryRecordStore {
    pub fn get(&self, form_id: &str) -> Option<FormRecord> {
        self.records.lock().ok()?.get(form_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
