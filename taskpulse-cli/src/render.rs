//! Plain-text rendering of pipeline results.

use taskpulse_core::{FilterOptions, Kpis};
use taskpulse_insights::{DashboardReport, Insight, Severity};

fn print_section_header(title: &str) {
    println!("\n{}", "═".repeat(72));
    println!("  {}", title);
    println!("{}\n", "═".repeat(72));
}

fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[i]",
        Severity::Warning => "[!]",
        Severity::Critical => "[!!]",
    }
}

pub fn print_kpis(kpis: &Kpis) {
    print_section_header("Key Performance Indicators");
    println!("  Total Tasks:          {:>12}", kpis.count);
    match kpis.mean_actual_duration {
        Some(mean) => println!("  Avg Actual Duration:  {:>12.2}", mean),
        None => println!("  Avg Actual Duration:  {:>12}", "n/a"),
    }
    println!("  Total Cost:           {:>12.2}", kpis.total_cost);
    println!("  Delay %:              {:>11.2}%", kpis.delay_percentage);
}

pub fn print_insights(insights: &[Insight]) {
    print_section_header("Insights & Recommendations");
    if insights.is_empty() {
        println!("  (no recommendations for this selection)");
        return;
    }
    for insight in insights {
        println!("  {:<5} {}", severity_marker(insight.severity), insight.message);
    }
}

pub fn print_report(report: &DashboardReport) {
    print_kpis(&report.kpis);

    print_section_header("Cost by Department");
    println!("  {:<24} {:>12} {:>12} {:>12}", "department", "delayed", "on-time", "total");
    for (dept, cost) in &report.cost_by_department {
        let split = report
            .cost_by_department_and_delay
            .get(dept)
            .copied()
            .unwrap_or_default();
        println!(
            "  {:<24} {:>12.2} {:>12.2} {:>12.2}",
            display_label(dept),
            split.delayed,
            split.on_time,
            cost
        );
    }

    print_section_header("Actual Duration by Priority");
    println!(
        "  {:<12} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "priority", "n", "min", "q1", "median", "q3", "max"
    );
    for (priority, s) in &report.duration_by_priority {
        println!(
            "  {:<12} {:>6} {:>9.1} {:>9.1} {:>9.1} {:>9.1} {:>9.1}",
            display_label(priority),
            s.count,
            s.min,
            s.q1,
            s.median,
            s.q3,
            s.max
        );
    }

    print_section_header("Daily Delay Trend");
    println!("  {:<12} {:>8} {:>8}", "date", "Delayed", "On-Time");
    for day in &report.daily_delay_trend {
        println!("  {:<12} {:>8} {:>8}", day.date.to_string(), day.delayed, day.on_time);
    }

    print_section_header(&format!("Top {} Employees by Workload", report.top_workload.len()));
    for (rank, w) in report.top_workload.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {:>10.1}",
            rank + 1,
            display_label(&w.employee),
            w.total_actual_duration
        );
    }

    print_insights(&report.insights);
}

pub fn print_options(options: &FilterOptions) {
    print_section_header("Filter Options");
    println!("  Departments:    {}", join_labels(&options.departments));
    println!("  Priorities:     {}", join_labels(&options.priorities));
    let statuses: Vec<String> = options.delay_statuses.iter().map(|d| d.to_string()).collect();
    println!("  Delay statuses: {}", statuses.join(", "));
}

fn display_label(label: &str) -> &str {
    if label.is_empty() { "(blank)" } else { label }
}

fn join_labels(labels: &[String]) -> String {
    labels
        .iter()
        .map(|l| display_label(l))
        .collect::<Vec<_>>()
        .join(", ")
}
