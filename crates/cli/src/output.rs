//! Console formatting for pipeline progress and the verification report.

use colored::Colorize;
use sqlstage_core::VerificationReport;

const RULE_WIDTH: usize = 76;

pub(crate) fn header(text: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "{}\n{}\n{}",
        rule.bright_blue(),
        text.bright_blue(),
        rule.bright_blue()
    )
}

pub(crate) fn success(text: &str) -> String {
    format!("{} {}", "✓".green(), text.green())
}

pub(crate) fn failure(text: &str) -> String {
    format!("{} {}", "✗".red(), text.red())
}

pub(crate) fn info(text: &str) -> String {
    format!("{} {}", "ℹ".yellow(), text.yellow())
}

pub(crate) fn render_verification(report: &VerificationReport) -> String {
    let mut out = String::new();

    out.push_str(&success(&format!(
        "Database objects created: Tables: {}, Views: {}, Procedures: {}, Functions: {}, Triggers: {}",
        count(report.tables),
        count(report.views),
        count(report.procedures),
        count(report.functions),
        count(report.triggers),
    )));

    if !report.row_counts.is_empty() {
        out.push_str(&format!("\n\n{:<30} {:>10}\n", "Table", "Row Count"));
        out.push_str(&"-".repeat(42));
        for (table, rows) in &report.row_counts {
            out.push_str(&format!("\n{table:<30} {:>10}", count(*rows)));
        }
    }

    out
}

fn count(value: Option<u64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |value| value.to_string())
}
