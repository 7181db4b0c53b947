//! Multi-dimensional inclusion filter over enriched records.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::record::{DelayFlag, EnrichedRecord};

/// Which values to keep, per dimension.
///
/// An empty set means "select none" for that dimension, so nothing passes.
/// It is never read as "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    pub departments: BTreeSet<String>,
    pub priorities: BTreeSet<String>,
    pub delay_statuses: BTreeSet<DelayFlag>,
}

impl FilterSelection {
    /// Every distinct value observed in `records`, i.e. the identity filter.
    pub fn all_from(records: &[EnrichedRecord]) -> Self {
        Self {
            departments: records.iter().map(|r| r.department.clone()).collect(),
            priorities: records.iter().map(|r| r.priority_level.clone()).collect(),
            delay_statuses: records.iter().map(|r| r.delay_flag).collect(),
        }
    }

    pub fn with_departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = departments.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_priorities<I, S>(mut self, priorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.priorities = priorities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_delay_statuses(mut self, statuses: impl IntoIterator<Item = DelayFlag>) -> Self {
        self.delay_statuses = statuses.into_iter().collect();
        self
    }

    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        self.departments.contains(&record.department)
            && self.priorities.contains(&record.priority_level)
            && self.delay_statuses.contains(&record.delay_flag)
    }

    /// Select matching rows, keeping input order. Rows are copied, never changed.
    pub fn apply(&self, records: &[EnrichedRecord]) -> Vec<EnrichedRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Distinct values per dimension, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub departments: Vec<String>,
    pub priorities: Vec<String>,
    pub delay_statuses: Vec<DelayFlag>,
}

impl FilterOptions {
    pub fn from_records(records: &[EnrichedRecord]) -> Self {
        Self {
            departments: distinct(records.iter().map(|r| r.department.clone())),
            priorities: distinct(records.iter().map(|r| r.priority_level.clone())),
            delay_statuses: distinct(records.iter().map(|r| r.delay_flag)),
        }
    }

    pub fn to_selection(&self) -> FilterSelection {
        FilterSelection {
            departments: self.departments.iter().cloned().collect(),
            priorities: self.priorities.iter().cloned().collect(),
            delay_statuses: self.delay_statuses.iter().copied().collect(),
        }
    }
}

fn distinct<T>(values: impl Iterator<Item = T>) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for v in values {
        if seen.insert(v.clone()) {
            out.push(v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich;
    use crate::record::TaskRecord;
    use chrono::NaiveDate;

    fn sample() -> Vec<EnrichedRecord> {
        let t = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        enrich(vec![
            TaskRecord::new(t, "Ops", "High", "A_1").with_durations(10.0, 20.0),
            TaskRecord::new(t, "IT", "Low", "B_2").with_durations(10.0, 5.0),
            TaskRecord::new(t, "Ops", "Medium", "C_3").with_durations(10.0, 10.0),
            TaskRecord::new(t, "HR", "High", "D_4").with_durations(10.0, 11.0),
        ])
    }

    #[test]
    fn test_identity_filter_returns_everything() {
        let records = sample();
        let sel = FilterSelection::all_from(&records);
        assert_eq!(sel.apply(&records), records);
    }

    #[test]
    fn test_empty_dimension_selects_none() {
        let records = sample();
        let all = FilterSelection::all_from(&records);

        let no_dept = all.clone().with_departments(Vec::<String>::new());
        assert!(no_dept.apply(&records).is_empty());

        let no_priority = all.clone().with_priorities(Vec::<String>::new());
        assert!(no_priority.apply(&records).is_empty());

        let no_delay = all.with_delay_statuses([]);
        assert!(no_delay.apply(&records).is_empty());

        assert!(FilterSelection::default().apply(&records).is_empty());
    }

    #[test]
    fn test_dimensions_combine_with_and() {
        let records = sample();
        let sel = FilterSelection::all_from(&records)
            .with_departments(["Ops", "HR"])
            .with_delay_statuses([DelayFlag::Delayed]);

        let out = sel.apply(&records);
        let names: Vec<_> = out.iter().map(|r| r.assigned_employee.as_str()).collect();
        assert_eq!(names, vec!["A_1", "D_4"]);
    }

    #[test]
    fn test_unseen_values_do_not_match() {
        let records = sample();
        let sel = FilterSelection::all_from(&records).with_priorities(["Critical"]);
        assert!(sel.apply(&records).is_empty());
    }

    #[test]
    fn test_options_first_seen_order() {
        let opts = FilterOptions::from_records(&sample());
        assert_eq!(opts.departments, vec!["Ops", "IT", "HR"]);
        assert_eq!(opts.priorities, vec!["High", "Low", "Medium"]);
        assert_eq!(opts.delay_statuses, vec![DelayFlag::Delayed, DelayFlag::OnTime]);
        assert_eq!(opts.to_selection(), FilterSelection::all_from(&sample()));
    }
}
