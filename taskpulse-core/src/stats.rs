//! Read-only aggregate queries over a (filtered) record slice.
//!
//! Null numeric cells are excluded from sums and means, never read as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::{DelayFlag, EnrichedRecord};

/// Headline KPI scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub count: usize,
    /// `None` when no row has an actual duration.
    pub mean_actual_duration: Option<f64>,
    pub total_cost: f64,
    /// 0..=100.
    pub delay_percentage: f64,
}

/// Per-day counts of each delay flag. Missing combinations are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayCounts {
    pub delayed: usize,
    pub on_time: usize,
}

impl DelayCounts {
    pub fn get(&self, flag: DelayFlag) -> usize {
        match flag {
            DelayFlag::Delayed => self.delayed,
            DelayFlag::OnTime => self.on_time,
        }
    }

    fn bump(&mut self, flag: DelayFlag) {
        match flag {
            DelayFlag::Delayed => self.delayed += 1,
            DelayFlag::OnTime => self.on_time += 1,
        }
    }
}

/// Summed cost per delay flag. Null costs are left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DelayCosts {
    pub delayed: f64,
    pub on_time: f64,
}

impl DelayCosts {
    pub fn get(&self, flag: DelayFlag) -> f64 {
        match flag {
            DelayFlag::Delayed => self.delayed,
            DelayFlag::OnTime => self.on_time,
        }
    }

    pub fn total(&self) -> f64 {
        self.delayed + self.on_time
    }

    fn add(&mut self, flag: DelayFlag, cost: f64) {
        match flag {
            DelayFlag::Delayed => self.delayed += cost,
            DelayFlag::OnTime => self.on_time += cost,
        }
    }
}

/// Box-plot style summary of a group of durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl DurationSummary {
    /// Summarize ascending-sorted values. `None` for an empty slice.
    pub fn from_sorted(values: &[f64]) -> Option<Self> {
        let (&min, &max) = (values.first()?, values.last()?);
        Some(Self {
            count: values.len(),
            min,
            q1: quantile(values, 0.25),
            median: quantile(values, 0.5),
            q3: quantile(values, 0.75),
            max,
        })
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// One entry of the workload ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeWorkload {
    pub employee: String,
    pub total_actual_duration: f64,
}

/// Aggregations over a borrowed record slice.
///
/// Nothing is cached here: build one per filtered set and drop it when the
/// selection changes.
#[derive(Debug, Clone, Copy)]
pub struct TaskStats<'a> {
    records: &'a [EnrichedRecord],
}

impl<'a> TaskStats<'a> {
    pub fn new(records: &'a [EnrichedRecord]) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &'a [EnrichedRecord] {
        self.records
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn mean_actual_duration(&self) -> Option<f64> {
        mean(self.records.iter().filter_map(|r| r.actual_duration))
    }

    pub fn total_cost(&self) -> f64 {
        self.records.iter().filter_map(|r| r.cost_per_task).sum()
    }

    pub fn delayed_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_delayed()).count()
    }

    /// Share of delayed rows in percent; 0 for an empty slice.
    pub fn delay_percentage(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.delayed_count() as f64 / self.records.len() as f64 * 100.0
    }

    pub fn kpis(&self) -> Kpis {
        Kpis {
            count: self.count(),
            mean_actual_duration: self.mean_actual_duration(),
            total_cost: self.total_cost(),
            delay_percentage: self.delay_percentage(),
        }
    }

    /// Department -> summed cost. Every department present gets an entry.
    pub fn group_cost_by_department(&self) -> BTreeMap<String, f64> {
        let mut out: BTreeMap<String, f64> = BTreeMap::new();
        for r in self.records {
            *out.entry(r.department.clone()).or_insert(0.0) += r.cost_per_task.unwrap_or(0.0);
        }
        out
    }

    /// Department -> summed cost split by delay flag.
    ///
    /// Every department present gets an entry; `total()` of each entry equals
    /// the matching `group_cost_by_department` value.
    pub fn cost_by_department_and_delay(&self) -> BTreeMap<String, DelayCosts> {
        let mut out: BTreeMap<String, DelayCosts> = BTreeMap::new();
        for r in self.records {
            let costs = out.entry(r.department.clone()).or_default();
            if let Some(cost) = r.cost_per_task {
                costs.add(r.delay_flag, cost);
            }
        }
        out
    }

    /// Department -> mean cost. Departments with no known cost are left out.
    pub fn mean_cost_by_department(&self) -> BTreeMap<String, f64> {
        let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for r in self.records {
            if let Some(cost) = r.cost_per_task {
                let e = sums.entry(r.department.as_str()).or_insert((0.0, 0));
                e.0 += cost;
                e.1 += 1;
            }
        }
        sums.into_iter()
            .map(|(dept, (sum, n))| (dept.to_string(), sum / n as f64))
            .collect()
    }

    /// Priority -> known actual durations, sorted ascending.
    ///
    /// Every priority present gets an entry, possibly empty.
    pub fn duration_by_priority(&self) -> BTreeMap<String, Vec<f64>> {
        let mut out: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for r in self.records {
            let durations = out.entry(r.priority_level.clone()).or_default();
            if let Some(d) = r.actual_duration {
                durations.push(d);
            }
        }
        for durations in out.values_mut() {
            durations.sort_by(f64::total_cmp);
        }
        out
    }

    /// Priority -> box-plot summary. Groups with no known duration are omitted.
    pub fn distribution_by_priority(&self) -> BTreeMap<String, DurationSummary> {
        self.duration_by_priority()
            .into_iter()
            .filter_map(|(priority, values)| {
                DurationSummary::from_sorted(&values).map(|s| (priority, s))
            })
            .collect()
    }

    /// Calendar date of `start_time` -> delay flag counts.
    pub fn daily_delay_trend(&self) -> BTreeMap<NaiveDate, DelayCounts> {
        let mut out: BTreeMap<NaiveDate, DelayCounts> = BTreeMap::new();
        for r in self.records {
            out.entry(r.start_time.date()).or_default().bump(r.delay_flag);
        }
        out
    }

    /// Top `top_n` employees by summed actual duration, highest first.
    ///
    /// Ties are broken by employee name ascending.
    pub fn workload_by_employee(&self, top_n: usize) -> Vec<EmployeeWorkload> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for r in self.records {
            *totals.entry(r.assigned_employee.as_str()).or_insert(0.0) +=
                r.actual_duration.unwrap_or(0.0);
        }

        let mut ranked: Vec<EmployeeWorkload> = totals
            .into_iter()
            .map(|(employee, total)| EmployeeWorkload {
                employee: employee.to_string(),
                total_actual_duration: total,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.total_actual_duration
                .total_cmp(&a.total_actual_duration)
                .then_with(|| a.employee.cmp(&b.employee))
        });
        ranked.truncate(top_n);
        ranked
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::enrich;
    use crate::record::TaskRecord;
    use chrono::NaiveDateTime;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn row(dept: &str, prio: &str, emp: &str, est: f64, act: f64, cost: f64) -> TaskRecord {
        TaskRecord::new(at(2024, 1, 1, 9), dept, prio, emp)
            .with_durations(est, act)
            .with_cost(cost)
    }

    #[test]
    fn test_empty_slice_defaults() {
        let stats = TaskStats::new(&[]);
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean_actual_duration(), None);
        assert_eq!(stats.total_cost(), 0.0);
        assert_eq!(stats.delay_percentage(), 0.0);
        assert!(stats.group_cost_by_department().is_empty());
        assert!(stats.cost_by_department_and_delay().is_empty());
        assert!(stats.daily_delay_trend().is_empty());
        assert!(stats.workload_by_employee(10).is_empty());
    }

    #[test]
    fn test_all_delayed_is_hundred_percent() {
        let records = enrich(vec![
            row("Ops", "High", "A", 10.0, 12.0, 1.0),
            row("IT", "Low", "B", 5.0, 6.0, 1.0),
        ]);
        assert_eq!(TaskStats::new(&records).delay_percentage(), 100.0);
    }

    #[test]
    fn test_delay_percentage_mixed() {
        let records = enrich(vec![
            row("Ops", "High", "A", 10.0, 12.0, 1.0),
            row("Ops", "High", "A", 10.0, 8.0, 1.0),
            row("Ops", "High", "A", 10.0, 10.0, 1.0),
            row("Ops", "High", "A", 10.0, 30.0, 1.0),
        ]);
        assert_eq!(TaskStats::new(&records).delay_percentage(), 50.0);
    }

    #[test]
    fn test_nulls_excluded_from_sums_and_means() {
        let mut raw = vec![
            row("Ops", "High", "A", 10.0, 20.0, 100.0),
            row("Ops", "High", "B", 10.0, 40.0, 50.0),
        ];
        let mut blank = TaskRecord::new(at(2024, 1, 1, 9), "Ops", "High", "C");
        blank.estimated_duration = Some(10.0);
        raw.push(blank);

        let records = enrich(raw);
        let stats = TaskStats::new(&records);
        assert_eq!(stats.count(), 3);
        assert_eq!(stats.mean_actual_duration(), Some(30.0));
        assert_eq!(stats.total_cost(), 150.0);
        assert_eq!(stats.mean_cost_by_department().get("Ops"), Some(&75.0));
    }

    #[test]
    fn test_group_cost_by_department() {
        let records = enrich(vec![
            row("Ops", "High", "A", 1.0, 1.0, 10.0),
            row("IT", "High", "B", 1.0, 1.0, 50.0),
            row("Ops", "Low", "C", 1.0, 1.0, 15.5),
        ]);
        let by_dept = TaskStats::new(&records).group_cost_by_department();
        assert_eq!(by_dept.len(), 2);
        assert_eq!(by_dept["Ops"], 25.5);
        assert_eq!(by_dept["IT"], 50.0);
    }

    #[test]
    fn test_cost_split_by_delay_flag() {
        let mut no_cost = TaskRecord::new(at(2024, 1, 1, 9), "Legal", "Low", "Z");
        no_cost.actual_duration = Some(5.0);
        let records = enrich(vec![
            row("Ops", "High", "A", 10.0, 20.0, 100.0),
            row("Ops", "Low", "B", 10.0, 10.0, 40.0),
            row("Ops", "Low", "C", 10.0, 12.0, 25.0),
            row("IT", "High", "D", 10.0, 5.0, 50.0),
            no_cost,
        ]);
        let stats = TaskStats::new(&records);
        let split = stats.cost_by_department_and_delay();

        assert_eq!(split["Ops"], DelayCosts { delayed: 125.0, on_time: 40.0 });
        assert_eq!(split["IT"].get(DelayFlag::Delayed), 0.0);
        assert_eq!(split["IT"].get(DelayFlag::OnTime), 50.0);
        assert_eq!(split["Legal"], DelayCosts::default());

        let totals = stats.group_cost_by_department();
        for (dept, costs) in &split {
            assert_eq!(costs.total(), totals[dept]);
        }
    }

    #[test]
    fn test_mean_cost_skips_departments_without_costs() {
        let mut no_cost = TaskRecord::new(at(2024, 1, 1, 9), "Legal", "Low", "Z");
        no_cost.actual_duration = Some(5.0);
        let records = enrich(vec![row("IT", "High", "B", 1.0, 1.0, 50.0), no_cost]);

        let stats = TaskStats::new(&records);
        assert!(!stats.mean_cost_by_department().contains_key("Legal"));
        assert_eq!(stats.group_cost_by_department()["Legal"], 0.0);
    }

    #[test]
    fn test_duration_by_priority_sorted() {
        let records = enrich(vec![
            row("Ops", "High", "A", 1.0, 30.0, 1.0),
            row("Ops", "Low", "B", 1.0, 5.0, 1.0),
            row("Ops", "High", "C", 1.0, 10.0, 1.0),
            row("Ops", "High", "D", 1.0, 20.0, 1.0),
        ]);
        let by_prio = TaskStats::new(&records).duration_by_priority();
        assert_eq!(by_prio["High"], vec![10.0, 20.0, 30.0]);
        assert_eq!(by_prio["Low"], vec![5.0]);
    }

    #[test]
    fn test_duration_summary_quartiles() {
        let s = DurationSummary::from_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (1.0, 2.0, 3.0, 4.0, 5.0));

        let s = DurationSummary::from_sorted(&[10.0, 20.0, 30.0, 40.0]).unwrap();
        assert_eq!(s.q1, 17.5);
        assert_eq!(s.median, 25.0);
        assert_eq!(s.q3, 32.5);

        let s = DurationSummary::from_sorted(&[7.0]).unwrap();
        assert_eq!((s.min, s.median, s.max), (7.0, 7.0, 7.0));

        assert!(DurationSummary::from_sorted(&[]).is_none());
    }

    #[test]
    fn test_daily_trend_zero_fills_missing_flags() {
        let mut raw = vec![
            row("Ops", "High", "A", 10.0, 20.0, 1.0),
            row("Ops", "High", "A", 10.0, 5.0, 1.0),
            row("Ops", "High", "A", 10.0, 50.0, 1.0),
        ];
        raw[1].start_time = at(2024, 1, 1, 23);
        raw[2].start_time = at(2024, 1, 2, 0);

        let records = enrich(raw);
        let trend = TaskStats::new(&records).daily_delay_trend();
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[&jan1], DelayCounts { delayed: 1, on_time: 1 });
        assert_eq!(trend[&jan2].get(DelayFlag::Delayed), 1);
        assert_eq!(trend[&jan2].get(DelayFlag::OnTime), 0);
    }

    #[test]
    fn test_workload_top_n_ranking() {
        let records = enrich(vec![
            row("Ops", "High", "A", 1.0, 30.0, 1.0),
            row("Ops", "High", "B", 1.0, 20.0, 1.0),
            row("Ops", "High", "C", 1.0, 10.0, 1.0),
            row("Ops", "High", "B", 1.0, 30.0, 1.0),
        ]);
        let top = TaskStats::new(&records).workload_by_employee(2);
        let names: Vec<_> = top.iter().map(|w| w.employee.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(top[0].total_actual_duration, 50.0);
    }

    #[test]
    fn test_workload_ties_break_by_name() {
        let records = enrich(vec![
            row("Ops", "High", "Zed_1", 1.0, 10.0, 1.0),
            row("Ops", "High", "Amy_2", 1.0, 10.0, 1.0),
            row("Ops", "High", "Max_3", 1.0, 10.0, 1.0),
        ]);
        let top = TaskStats::new(&records).workload_by_employee(10);
        let names: Vec<_> = top.iter().map(|w| w.employee.as_str()).collect();
        assert_eq!(names, vec!["Amy_2", "Max_3", "Zed_1"]);
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let records = enrich(vec![
            row("Ops", "High", "A", 10.0, 12.0, 3.0),
            row("IT", "Low", "B", 10.0, 8.0, 4.0),
        ]);
        let stats = TaskStats::new(&records);
        assert_eq!(stats.kpis(), stats.kpis());
        assert_eq!(stats.daily_delay_trend(), stats.daily_delay_trend());
        assert_eq!(stats.workload_by_employee(5), stats.workload_by_employee(5));
        assert_eq!(stats.distribution_by_priority(), stats.distribution_by_priority());
    }
}
