//! taskpulse-ingest: load workflow task tables (CSV) into typed records.

pub mod columns;
pub mod error;
pub mod loader;
pub mod timestamp;

pub use columns::{Column, ColumnMap};
pub use error::{IngestError, IngestResult};
pub use loader::{load_tasks_csv, read_tasks_csv, LoadOptions};
pub use timestamp::parse_timestamp;
