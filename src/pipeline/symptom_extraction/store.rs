//! In-memory match store.
//!
//! Stands in for the caller's persistence layer: keeps every record handed
//! over by `BatchRunner::run_and_store`, in arrival order.

use std::sync::Mutex;

use super::error::ExtractionError;
use super::traits::MatchStore;
use super::types::MatchRecord;

#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    records: Mutex<Vec<MatchRecord>>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored records.
    pub fn records(&self) -> Result<Vec<MatchRecord>, ExtractionError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| ExtractionError::Store(e.to_string()))?;
        Ok(guard.clone())
    }

    /// Records stored for one patient.
    pub fn records_for_patient(&self, patient_id: &str) -> Result<Vec<MatchRecord>, ExtractionError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| ExtractionError::Store(e.to_string()))?;
        Ok(guard.iter().filter(|r| r.patient_id == patient_id).cloned().collect())
    }
}

impl MatchStore for InMemoryMatchStore {
    fn store_matches(&self, records: &[MatchRecord]) -> Result<(), ExtractionError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| ExtractionError::Store(e.to_string()))?;
        guard.extend_from_slice(records);
        Ok(())
    }

    fn stored_count(&self) -> Result<usize, ExtractionError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| ExtractionError::Store(e.to_string()))?;
        Ok(guard.len())
    }
}
