//! taskpulse-core: workflow task records and the pure analytics pipeline
//! (enrichment, filtering, aggregation).

pub mod dataset;
pub mod employee_id;
pub mod enrich;
pub mod filter;
pub mod record;
pub mod stats;

pub use dataset::{Dataset, DatasetId};
pub use employee_id::extract_employee_id;
pub use enrich::{enrich, enrich_record};
pub use filter::{FilterOptions, FilterSelection};
pub use record::{DelayFlag, EnrichedRecord, TaskRecord, APPROVAL_NOT_REQUIRED};
pub use stats::{DelayCosts, DelayCounts, DurationSummary, EmployeeWorkload, Kpis, TaskStats};
