//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;

/// Formats a health check report as a table followed by a summary line
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Check", "Status", "Time", "Result", "Validates"]);

    for outcome in &report.outcomes {
        let result = &outcome.result;
        builder.push_record([
            outcome.name.to_string(),
            result.status.as_colored_str(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
            outcome.description.unwrap_or("").to_string(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    format!("{table}\n\n{}", format_summary(report))
}

fn format_summary(report: &HealthCheckReport) -> String {
    let overall = match report.status() {
        CheckStatus::Pass => "HEALTHY".green().bold(),
        CheckStatus::Warn => "HEALTHY (with warnings)".yellow().bold(),
        CheckStatus::Fail => "UNHEALTHY".red().bold(),
    };

    format!(
        "{overall}: {} checks, {} passed, {} warned, {} failed",
        report.total(),
        report.passed(),
        report.warned(),
        report.failed()
    )
}

/// Prints the report, then the details of every check that has them
pub fn print_report(report: &HealthCheckReport) {
    println!("{}", format_report(report));

    for outcome in &report.outcomes {
        if let Some(details) = &outcome.result.details {
            println!("\n{}", outcome.name.bold());
            println!("{details}");
        }
    }
}
