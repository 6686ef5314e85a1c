//! Process-lifetime print job store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use super::{NewPrintJob, PrintJob, PrintJobRepository};
use crate::error::StoreError;

/// In-memory job store keyed by job id.
///
/// Uses `std::sync::RwLock`; every operation is a single map access.
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: RwLock<HashMap<String, PrintJob>>,
}

impl MemoryJobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, PrintJob>> {
        match self.jobs.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Print job store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, PrintJob>> {
        match self.jobs.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Print job store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

impl PrintJobRepository for MemoryJobStore {
    fn create_with(
        &self,
        fields: &mut dyn FnMut(DateTime<Utc>) -> NewPrintJob,
    ) -> Result<PrintJob, StoreError> {
        let id = uuid::Uuid::new_v4().to_string();
        let created_at = Utc::now();
        let job = PrintJob::from_new(id, fields(created_at), created_at);

        self.write().insert(job.id.clone(), job.clone());
        tracing::debug!(job_id = %job.id, receipt = %job.receipt_number, "Stored print job");

        Ok(job)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<PrintJob>, StoreError> {
        let job = self.read().get(id).cloned();
        if job.is_none() {
            tracing::debug!(job_id = %id, "Print job not found");
        }
        Ok(job)
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.len())
    }
}
