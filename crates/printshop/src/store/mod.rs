//! Print job records and the storage seam the service writes through.

pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use memory::MemoryJobStore;

/// A priced, receipted upload batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintJob {
    /// Unique job identifier, assigned by the store.
    pub id: String,
    /// Every file name in the batch, joined with `", "`.
    pub file_name: String,
    /// Sum of the batch's file sizes in bytes.
    pub file_size: u64,
    /// Total price for the batch.
    pub price: u32,
    /// Display code printed on the bill. May repeat across jobs.
    pub receipt_number: String,
    /// When the store accepted the record.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a [`PrintJob`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrintJob {
    pub file_name: String,
    pub file_size: u64,
    pub price: u32,
    pub receipt_number: String,
}

impl PrintJob {
    fn from_new(id: String, new: NewPrintJob, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            file_name: new.file_name,
            file_size: new.file_size,
            price: new.price,
            receipt_number: new.receipt_number,
            created_at,
        }
    }
}

/// Insert-and-lookup storage for print jobs.
///
/// Records are immutable once created; there is no update or delete.
pub trait PrintJobRepository: Send + Sync {
    /// Assigns an id and creation time, stores the record, and returns it.
    ///
    /// `fields` receives the creation time the record will carry, so values
    /// derived from it (the receipt year) agree with `created_at`.
    fn create_with(
        &self,
        fields: &mut dyn FnMut(DateTime<Utc>) -> NewPrintJob,
    ) -> Result<PrintJob, StoreError>;

    /// Stores caller fields that do not depend on the creation time.
    fn create(&self, new: NewPrintJob) -> Result<PrintJob, StoreError> {
        self.create_with(&mut |_| new.clone())
    }

    /// Returns `Ok(None)` for an id that was never issued.
    fn get_by_id(&self, id: &str) -> Result<Option<PrintJob>, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;
}
