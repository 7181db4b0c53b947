//! Dashboard report: everything the presentation layer renders for one selection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use taskpulse_core::{
    Dataset, DatasetId, DelayCosts, DurationSummary, EmployeeWorkload, EnrichedRecord, FilterSelection, Kpis,
    TaskStats,
};

use crate::rules::{evaluate, Insight};

/// Default size of the workload ranking.
pub const DEFAULT_TOP_EMPLOYEES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDelayCount {
    pub date: NaiveDate,
    pub delayed: usize,
    pub on_time: usize,
}

/// Precomputed view for one (dataset, selection) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub dataset_id: DatasetId,
    pub selection: FilterSelection,
    pub records: Vec<EnrichedRecord>,
    pub kpis: Kpis,
    pub cost_by_department: BTreeMap<String, f64>,
    /// Same departments as `cost_by_department`, split by delay flag.
    pub cost_by_department_and_delay: BTreeMap<String, DelayCosts>,
    pub duration_by_priority: BTreeMap<String, DurationSummary>,
    /// Ascending by date.
    pub daily_delay_trend: Vec<DailyDelayCount>,
    pub top_workload: Vec<EmployeeWorkload>,
    pub insights: Vec<Insight>,
}

impl DashboardReport {
    /// Filter, then aggregate, then evaluate insights, all over the same subset.
    pub fn build(dataset: &Dataset, selection: &FilterSelection, top_n: usize) -> Self {
        let records = dataset.select(selection);
        let stats = TaskStats::new(&records);

        let daily_delay_trend = stats
            .daily_delay_trend()
            .into_iter()
            .map(|(date, counts)| DailyDelayCount {
                date,
                delayed: counts.delayed,
                on_time: counts.on_time,
            })
            .collect();

        let kpis = stats.kpis();
        let cost_by_department = stats.group_cost_by_department();
        let cost_by_department_and_delay = stats.cost_by_department_and_delay();
        let duration_by_priority = stats.distribution_by_priority();
        let top_workload = stats.workload_by_employee(top_n);
        let insights = evaluate(&records);

        Self {
            dataset_id: dataset.id(),
            selection: selection.clone(),
            records,
            kpis,
            cost_by_department,
            cost_by_department_and_delay,
            duration_by_priority,
            daily_delay_trend,
            top_workload,
            insights,
        }
    }

    /// Ordered recommendation strings.
    pub fn recommendations(&self) -> Vec<&str> {
        self.insights.iter().map(|i| i.message.as_str()).collect()
    }
}
