//! Immutable, shareable handle over one loaded-and-enriched table.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::enrich::enrich;
use crate::filter::{FilterOptions, FilterSelection};
use crate::record::{EnrichedRecord, TaskRecord};

static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(u64);

/// Enriched records, loaded once and passed explicitly to every consumer.
///
/// Cloning shares the same records and keeps the same id.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: DatasetId,
    records: Arc<[EnrichedRecord]>,
}

impl Dataset {
    /// Enrich `raw` once and wrap it.
    pub fn from_raw(raw: Vec<TaskRecord>) -> Self {
        Self::from_enriched(enrich(raw))
    }

    /// Wrap rows that already went through [`enrich`](crate::enrich::enrich).
    pub fn from_enriched(records: Vec<EnrichedRecord>) -> Self {
        Self {
            id: DatasetId(NEXT_DATASET_ID.fetch_add(1, Ordering::Relaxed)),
            records: records.into(),
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.records)
    }

    /// Selection used when nothing has been chosen: every observed value.
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::all_from(&self.records)
    }

    pub fn select(&self, selection: &FilterSelection) -> Vec<EnrichedRecord> {
        selection.apply(&self.records)
    }
}
