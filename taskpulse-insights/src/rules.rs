//! Ordered heuristic rules that turn a filtered record set into recommendations.
//!
//! Rules are independent (condition, message) pairs evaluated in table order.
//! A rule with no well-defined target on the given data emits nothing.

use serde::{Deserialize, Serialize};
use taskpulse_core::{EnrichedRecord, TaskStats};

/// Delay share (0..1) above which the delay-rate rule fires.
pub const HIGH_DELAY_RATE_THRESHOLD: f64 = 0.3;

/// Priority label the escalation rule looks for.
pub const HIGH_PRIORITY: &str = "High";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    HighDelayRate,
    HighestCostDepartment,
    OverloadedEmployee,
    HighPriorityDelays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

/// What a fired rule is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "snake_case")]
pub enum Subject {
    /// The filtered set as a whole.
    Selection,
    Department(String),
    Employee(String),
}

impl Subject {
    pub fn name(&self) -> &str {
        match self {
            Subject::Selection => "",
            Subject::Department(name) | Subject::Employee(name) => name,
        }
    }
}

/// A fired rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    pub subject: Subject,
    pub message: String,
}

/// One entry of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct InsightRule {
    pub kind: InsightKind,
    pub severity: Severity,
    /// Returns the rule's target when it fires.
    pub condition: fn(&TaskStats<'_>) -> Option<Subject>,
    pub message: fn(&Subject) -> String,
}

impl InsightRule {
    pub fn evaluate(&self, stats: &TaskStats<'_>) -> Option<Insight> {
        let subject = (self.condition)(stats)?;
        Some(Insight {
            kind: self.kind,
            severity: self.severity,
            message: (self.message)(&subject),
            subject,
        })
    }
}

/// The rule table. Order is part of the output contract.
pub const RULES: [InsightRule; 4] = [
    InsightRule {
        kind: InsightKind::HighDelayRate,
        severity: Severity::Warning,
        condition: high_delay_rate,
        message: high_delay_rate_message,
    },
    InsightRule {
        kind: InsightKind::HighestCostDepartment,
        severity: Severity::Info,
        condition: highest_cost_department,
        message: highest_cost_department_message,
    },
    InsightRule {
        kind: InsightKind::OverloadedEmployee,
        severity: Severity::Info,
        condition: most_loaded_employee,
        message: overloaded_employee_message,
    },
    InsightRule {
        kind: InsightKind::HighPriorityDelays,
        severity: Severity::Critical,
        condition: high_priority_delays,
        message: high_priority_delays_message,
    },
];

fn high_delay_rate(stats: &TaskStats<'_>) -> Option<Subject> {
    (stats.delay_percentage() / 100.0 > HIGH_DELAY_RATE_THRESHOLD).then_some(Subject::Selection)
}

fn high_delay_rate_message(_: &Subject) -> String {
    "High delay rate detected. Consider redistributing workload or revising time estimation models."
        .to_string()
}

/// Department with the highest mean cost; alphabetically first on ties.
fn highest_cost_department(stats: &TaskStats<'_>) -> Option<Subject> {
    let mut best: Option<(String, f64)> = None;
    // BTreeMap iterates alphabetically, so only a strictly larger mean replaces.
    for (dept, mean) in stats.mean_cost_by_department() {
        if best.as_ref().is_none_or(|(_, best_mean)| mean > *best_mean) {
            best = Some((dept, mean));
        }
    }
    best.map(|(dept, _)| Subject::Department(dept))
}

fn highest_cost_department_message(subject: &Subject) -> String {
    format!(
        "{} department shows highest average cost per task. Audit cost drivers.",
        subject.name()
    )
}

fn most_loaded_employee(stats: &TaskStats<'_>) -> Option<Subject> {
    stats
        .workload_by_employee(1)
        .into_iter()
        .next()
        .map(|w| Subject::Employee(w.employee))
}

fn overloaded_employee_message(subject: &Subject) -> String {
    format!("{} appears overloaded. Workload balancing recommended.", subject.name())
}

fn high_priority_delays(stats: &TaskStats<'_>) -> Option<Subject> {
    stats
        .records()
        .iter()
        .any(|r| r.priority_level() == HIGH_PRIORITY && r.is_delayed())
        .then_some(Subject::Selection)
}

fn high_priority_delays_message(_: &Subject) -> String {
    "High priority tasks are being delayed. Escalation policy review suggested.".to_string()
}

/// Evaluate `rules` in order.
pub fn evaluate_rules(rules: &[InsightRule], stats: &TaskStats<'_>) -> Vec<Insight> {
    rules.iter().filter_map(|rule| rule.evaluate(stats)).collect()
}

/// Evaluate the standard rule table over a filtered record set.
pub fn evaluate(records: &[EnrichedRecord]) -> Vec<Insight> {
    evaluate_rules(&RULES, &TaskStats::new(records))
}

/// Just the ordered recommendation strings.
pub fn recommendations(records: &[EnrichedRecord]) -> Vec<String> {
    evaluate(records).into_iter().map(|i| i.message).collect()
}
