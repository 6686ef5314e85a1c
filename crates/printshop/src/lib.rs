pub mod config;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod service;
pub mod store;
pub mod upload;

pub use config::{load_config, LogFormat, ServerConfig};
pub use error::{ConfigError, PricingError, PrintShopError, Result, StoreError, UploadError};
pub use pricing::{PriceQuote, PricingPolicy};
pub use service::{PrintReceipt, PrintService};
pub use store::{MemoryJobStore, NewPrintJob, PrintJob, PrintJobRepository};
pub use upload::{AllowedType, BatchAccumulator, UploadedFile, MAX_BATCH_BYTES};
