//! Enrichment stage: fill defaults and derive id, duration delta and delay flag.
//!
//! Total and order-preserving: every raw row yields exactly one enriched row.

use tracing::debug;

use crate::employee_id::extract_employee_id;
use crate::record::{DelayFlag, EnrichedRecord, TaskRecord, APPROVAL_NOT_REQUIRED};

/// Enrich a single row.
pub fn enrich_record(raw: TaskRecord) -> EnrichedRecord {
    let employee_id_number = extract_employee_id(&raw.assigned_employee);

    let duration_difference = match (raw.actual_duration, raw.estimated_duration) {
        (Some(actual), Some(estimated)) => Some(actual - estimated),
        _ => None,
    };
    let delay_flag = DelayFlag::classify(duration_difference);

    let approval_level = raw
        .approval_level
        .unwrap_or_else(|| APPROVAL_NOT_REQUIRED.to_string());

    EnrichedRecord {
        start_time: raw.start_time,
        end_time: raw.end_time,
        department: raw.department,
        priority_level: raw.priority_level,
        assigned_employee: raw.assigned_employee,
        approval_level,
        estimated_duration: raw.estimated_duration,
        actual_duration: raw.actual_duration,
        cost_per_task: raw.cost_per_task,
        employee_id_number,
        duration_difference,
        delay_flag,
    }
}

/// Enrich a whole table, keeping length and order.
pub fn enrich(raw: Vec<TaskRecord>) -> Vec<EnrichedRecord> {
    let out: Vec<EnrichedRecord> = raw.into_iter().map(enrich_record).collect();

    debug!(
        rows = out.len(),
        without_employee_id = out.iter().filter(|r| r.employee_id_number.is_none()).count(),
        without_duration_difference = out.iter().filter(|r| r.duration_difference.is_none()).count(),
        "enriched task records"
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_end_to_end_row() {
        let raw = TaskRecord::new(day(2024, 1, 1), "Ops", "High", "Asha_7")
            .with_durations(10.0, 15.0)
            .with_cost(100.0);

        let r = enrich_record(raw);
        assert_eq!(r.employee_id_number.as_deref(), Some("7"));
        assert_eq!(r.duration_difference, Some(5.0));
        assert_eq!(r.delay_flag, DelayFlag::Delayed);
        assert_eq!(r.approval_level, "Not Required");
    }

    #[test]
    fn test_existing_approval_is_kept() {
        let raw = TaskRecord::new(day(2024, 1, 1), "IT", "Low", "Mo_3").with_approval("Manager");
        assert_eq!(enrich_record(raw).approval_level, "Manager");
    }

    #[test]
    fn test_missing_duration_defaults_on_time() {
        let mut raw = TaskRecord::new(day(2024, 1, 2), "IT", "High", "Lee");
        raw.actual_duration = Some(90.0);

        let r = enrich_record(raw);
        assert_eq!(r.duration_difference, None);
        assert_eq!(r.delay_flag, DelayFlag::OnTime);
        assert_eq!(r.employee_id_number, None);
    }

    #[test]
    fn test_equal_durations_are_on_time() {
        let raw = TaskRecord::new(day(2024, 1, 3), "HR", "Medium", "Kai_9").with_durations(20.0, 20.0);
        let r = enrich_record(raw);
        assert_eq!(r.duration_difference, Some(0.0));
        assert_eq!(r.delay_flag, DelayFlag::OnTime);
    }

    #[test]
    fn test_enrich_preserves_length_and_order() {
        let raw = vec![
            TaskRecord::new(day(2024, 1, 1), "Ops", "High", "A_1").with_durations(10.0, 12.0),
            TaskRecord::new(day(2024, 1, 2), "IT", "Low", "B"),
            TaskRecord::new(day(2024, 1, 3), "HR", "Urgent", "C_3").with_durations(30.0, 5.0),
        ];
        let out = enrich(raw.clone());

        assert_eq!(out.len(), raw.len());
        for (r, e) in raw.iter().zip(&out) {
            assert_eq!(r.assigned_employee, e.assigned_employee);
            assert_eq!(r.start_time, e.start_time);
        }
    }

    #[test]
    fn test_delay_flag_tracks_difference() {
        let raw: Vec<TaskRecord> = [(10.0, 9.0), (10.0, 10.0), (10.0, 11.0), (0.0, -1.0)]
            .into_iter()
            .map(|(est, act)| {
                TaskRecord::new(day(2024, 2, 1), "Ops", "Low", "X_1").with_durations(est, act)
            })
            .collect();

        for r in enrich(raw) {
            let diff = r.duration_difference.unwrap();
            assert_eq!(r.delay_flag == DelayFlag::Delayed, diff > 0.0);
        }
    }

    #[test]
    fn test_enrich_empty() {
        assert!(enrich(Vec::new()).is_empty());
    }
}
