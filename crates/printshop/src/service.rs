//! Turns an upload batch into one priced, receipted print job.

use std::sync::Arc;

use chrono::Datelike;
use rand::Rng;
use serde::Serialize;

use crate::error::{Result, StoreError};
use crate::pricing::PricingPolicy;
use crate::store::{NewPrintJob, PrintJob, PrintJobRepository};
use crate::upload::{validate_batch, BatchAccumulator, BatchSummary, UploadedFile, MAX_BATCH_BYTES};

/// Response body for a successful print request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintReceipt {
    pub success: bool,
    pub print_job: PrintJob,
    pub file_count: usize,
}

#[derive(Clone)]
pub struct PrintService {
    store: Arc<dyn PrintJobRepository>,
    pricing: PricingPolicy,
    max_batch_bytes: u64,
}

impl PrintService {
    pub fn new(store: Arc<dyn PrintJobRepository>) -> Self {
        Self {
            store,
            pricing: PricingPolicy::default(),
            max_batch_bytes: MAX_BATCH_BYTES,
        }
    }

    pub fn max_batch_bytes(&self) -> u64 {
        self.max_batch_bytes
    }

    /// A fresh accumulator carrying this service's size ceiling.
    pub fn accumulator(&self) -> BatchAccumulator {
        BatchAccumulator::new(self.max_batch_bytes)
    }

    /// Validates, prices and stores a batch of declared files.
    pub fn submit(&self, files: &[UploadedFile]) -> Result<PrintReceipt> {
        self.submit_with_rng(files, &mut rand::thread_rng())
    }

    pub fn submit_with_rng<R: Rng + ?Sized>(
        &self,
        files: &[UploadedFile],
        rng: &mut R,
    ) -> Result<PrintReceipt> {
        let summary = validate_batch(files, self.max_batch_bytes)?;
        self.record_with_rng(summary, rng)
    }

    /// Prices and stores a batch that has already passed validation.
    pub fn record(&self, summary: BatchSummary) -> Result<PrintReceipt> {
        self.record_with_rng(summary, &mut rand::thread_rng())
    }

    pub fn record_with_rng<R: Rng + ?Sized>(
        &self,
        summary: BatchSummary,
        rng: &mut R,
    ) -> Result<PrintReceipt> {
        let file_count = summary.file_count();
        let quote = self.pricing.quote(file_count, rng)?;
        let file_name = summary.joined_names();
        let pricing = &self.pricing;

        let print_job = self.store.create_with(&mut |created_at| NewPrintJob {
            file_name: file_name.clone(),
            file_size: summary.total_bytes,
            price: quote.total,
            receipt_number: pricing.receipt_number(created_at.year(), rng),
        })?;

        tracing::info!(
            job_id = %print_job.id,
            file_count,
            file_size = print_job.file_size,
            price = print_job.price,
            receipt = %print_job.receipt_number,
            "Created print job"
        );

        Ok(PrintReceipt {
            success: true,
            print_job,
            file_count,
        })
    }

    pub fn find(&self, id: &str) -> std::result::Result<Option<PrintJob>, StoreError> {
        self.store.get_by_id(id)
    }

    pub fn job_count(&self) -> std::result::Result<usize, StoreError> {
        self.store.count()
    }
}
