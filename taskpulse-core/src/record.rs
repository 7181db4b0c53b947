//! Task record model: raw rows as loaded, and enriched rows with derived fields.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default approval level for rows that carry none.
pub const APPROVAL_NOT_REQUIRED: &str = "Not Required";

/// One row of the source table, typed but not yet cleaned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub start_time: NaiveDateTime,
    /// Not guaranteed to be >= `start_time`.
    pub end_time: NaiveDateTime,
    pub department: String,
    /// Usually "Low", "Medium" or "High", but never validated.
    pub priority_level: String,
    /// Free-text name with an embedded numeric id, e.g. "John_42".
    pub assigned_employee: String,
    pub approval_level: Option<String>,
    /// Minutes.
    pub estimated_duration: Option<f64>,
    /// Minutes.
    pub actual_duration: Option<f64>,
    pub cost_per_task: Option<f64>,
}

impl TaskRecord {
    pub fn new(
        start_time: NaiveDateTime,
        department: impl Into<String>,
        priority_level: impl Into<String>,
        assigned_employee: impl Into<String>,
    ) -> Self {
        Self {
            start_time,
            end_time: start_time,
            department: department.into(),
            priority_level: priority_level.into(),
            assigned_employee: assigned_employee.into(),
            approval_level: None,
            estimated_duration: None,
            actual_duration: None,
            cost_per_task: None,
        }
    }

    pub fn with_end_time(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_durations(mut self, estimated: f64, actual: f64) -> Self {
        self.estimated_duration = Some(estimated);
        self.actual_duration = Some(actual);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost_per_task = Some(cost);
        self
    }

    pub fn with_approval(mut self, approval_level: impl Into<String>) -> Self {
        self.approval_level = Some(approval_level.into());
        self
    }
}

/// Delay classification of an enriched row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DelayFlag {
    #[serde(rename = "Delayed")]
    Delayed,
    #[serde(rename = "On-Time")]
    OnTime,
}

impl DelayFlag {
    /// Classify a duration difference. `Delayed` only when strictly positive.
    ///
    /// A difference that could not be computed (missing or non-numeric
    /// duration) is classified `OnTime`: "unknown" is treated as "not greater
    /// than zero". Questionable, since it under-reports delays, but relied on.
    pub fn classify(duration_difference: Option<f64>) -> Self {
        match duration_difference {
            Some(diff) if diff > 0.0 => DelayFlag::Delayed,
            Some(_) => DelayFlag::OnTime,
            None => DelayFlag::OnTime,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DelayFlag::Delayed => "Delayed",
            DelayFlag::OnTime => "On-Time",
        }
    }
}

impl fmt::Display for DelayFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DelayFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Delayed" => Ok(DelayFlag::Delayed),
            "On-Time" => Ok(DelayFlag::OnTime),
            other => Err(format!("unknown delay status: {other:?} (expected Delayed or On-Time)")),
        }
    }
}

/// A cleaned row with derived fields.
///
/// Only the enrichment stage builds these, and fields are read-only outside
/// this crate, so `delay_flag` always agrees with `duration_difference` and
/// `duration_difference` with the two durations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub(crate) start_time: NaiveDateTime,
    pub(crate) end_time: NaiveDateTime,
    pub(crate) department: String,
    pub(crate) priority_level: String,
    pub(crate) assigned_employee: String,
    pub(crate) approval_level: String,
    pub(crate) estimated_duration: Option<f64>,
    pub(crate) actual_duration: Option<f64>,
    pub(crate) cost_per_task: Option<f64>,

    /// First run of ASCII digits in `assigned_employee`.
    pub(crate) employee_id_number: Option<String>,
    /// `actual_duration - estimated_duration`, when both are present.
    pub(crate) duration_difference: Option<f64>,
    pub(crate) delay_flag: DelayFlag,
}

impl EnrichedRecord {
    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn priority_level(&self) -> &str {
        &self.priority_level
    }

    pub fn assigned_employee(&self) -> &str {
        &self.assigned_employee
    }

    /// Never missing: defaults to [`APPROVAL_NOT_REQUIRED`].
    pub fn approval_level(&self) -> &str {
        &self.approval_level
    }

    pub fn estimated_duration(&self) -> Option<f64> {
        self.estimated_duration
    }

    pub fn actual_duration(&self) -> Option<f64> {
        self.actual_duration
    }

    pub fn cost_per_task(&self) -> Option<f64> {
        self.cost_per_task
    }

    pub fn employee_id_number(&self) -> Option<&str> {
        self.employee_id_number.as_deref()
    }

    pub fn duration_difference(&self) -> Option<f64> {
        self.duration_difference
    }

    pub fn delay_flag(&self) -> DelayFlag {
        self.delay_flag
    }

    pub fn is_delayed(&self) -> bool {
        self.delay_flag == DelayFlag::Delayed
    }
}
