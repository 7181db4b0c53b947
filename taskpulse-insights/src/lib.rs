//! taskpulse-insights: rule-based recommendations and dashboard reports
//! over filtered task records.

pub mod cache;
pub mod report;
pub mod rules;

pub use cache::ReportCache;
pub use report::{DailyDelayCount, DashboardReport, DEFAULT_TOP_EMPLOYEES};
pub use rules::{
    evaluate, evaluate_rules, recommendations, Insight, InsightKind, InsightRule, Severity, Subject,
    RULES,
};
