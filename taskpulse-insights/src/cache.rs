//! Report memoization keyed by the exact filter selection.

use std::collections::HashMap;
use std::sync::Arc;
use taskpulse_core::{Dataset, DatasetId, FilterSelection};
use tracing::debug;

use crate::report::DashboardReport;

/// Caches reports for a single dataset.
///
/// Entries are keyed by `(selection, top_n)`. Asking for a report over a
/// different dataset drops every entry first.
///
/// Meant for long-lived consumers that re-render on every filter change
/// (an interactive dashboard embedding this crate). The `taskpulse` binary
/// builds exactly one report per run and goes through
/// [`DashboardReport::build`] directly.
#[derive(Debug, Default)]
pub struct ReportCache {
    dataset: Option<DatasetId>,
    entries: HashMap<(FilterSelection, usize), Arc<DashboardReport>>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build(
        &mut self,
        dataset: &Dataset,
        selection: &FilterSelection,
        top_n: usize,
    ) -> Arc<DashboardReport> {
        if self.dataset != Some(dataset.id()) {
            if !self.entries.is_empty() {
                debug!(dropped = self.entries.len(), "dataset changed, clearing report cache");
            }
            self.entries.clear();
            self.dataset = Some(dataset.id());
        }

        let key = (selection.clone(), top_n);
        if let Some(hit) = self.entries.get(&key) {
            debug!("report cache hit");
            return Arc::clone(hit);
        }

        debug!(cached = self.entries.len(), "report cache miss");
        let report = Arc::new(DashboardReport::build(dataset, selection, top_n));
        self.entries.insert(key, Arc::clone(&report));
        report
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.dataset = None;
    }
}
