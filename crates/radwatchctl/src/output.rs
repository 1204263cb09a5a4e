//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use radwatch_core::{AlertMode, LogEntry, TickOutcome};
use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let mut details = serde_json::Map::new();
    details.insert("message".to_string(), json!(error.to_string()));
    details.insert("type".to_string(), json!(error_type_name(error)));
    if let Some(field) = error.downcast_ref::<CliError>().and_then(CliError::config_field) {
        details.insert("field".to_string(), json!(field));
    }
    let error_json = json!({
        "success": false,
        "error": details
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> String {
    format!("{:?}", error)
        .split('(')
        .next()
        .unwrap_or("Unknown")
        .to_string()
}

/// Print any serializable value as a `success` JSON document
pub fn print_json<T: Serialize>(key: &str, value: &T) {
    let mut output = serde_json::Map::new();
    output.insert("success".to_string(), json!(true));
    output.insert(key.to_string(), json!(value));
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", key, e),
    }
}

pub fn alert_label(alert: bool) -> &'static str {
    if alert { "active" } else { "inactive" }
}

pub fn protection_label(protection_mode: bool) -> &'static str {
    if protection_mode { "enabled" } else { "disabled" }
}

/// One uncolored report line for a tick
pub fn tick_line(outcome: &TickOutcome) -> String {
    format!(
        "radiation level: {}, alert: {}, mode: {}, protection: {}",
        outcome.radiation_level,
        alert_label(outcome.alert),
        outcome.alert_mode,
        protection_label(outcome.protection_mode)
    )
}

fn colored_mode(mode: AlertMode) -> ColoredString {
    match mode {
        AlertMode::Safe => mode.label().green(),
        AlertMode::Moderate => mode.label().yellow(),
        AlertMode::Critical => mode.label().red().bold(),
    }
}

/// Print one tick in human format
pub fn print_tick_human(outcome: &TickOutcome) {
    let alert = if outcome.alert {
        alert_label(true).red().bold()
    } else {
        alert_label(false).normal()
    };
    let protection = if outcome.protection_mode {
        protection_label(true).red()
    } else {
        protection_label(false).normal()
    };

    println!(
        "radiation level: {}, alert: {}, mode: {}, protection: {}",
        outcome.radiation_level,
        alert,
        colored_mode(outcome.alert_mode),
        protection
    );
}

pub fn print_stop_on_alert() {
    println!("{}", "alert triggered, stopping simulation".red().bold());
}

/// Print the trip log, oldest entry first
pub fn print_log_human(entries: &[LogEntry], log_index: usize) {
    if entries.is_empty() {
        println!("{}", "Trip log is empty".dimmed());
        return;
    }

    println!("{} (next slot {})", "Trip log:".bold(), log_index);
    for entry in entries {
        println!(
            "  {} level {} ({})",
            "●".color(if entry.alert_mode == AlertMode::Safe { "yellow" } else { "red" }),
            entry.radiation_level,
            colored_mode(entry.alert_mode)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radwatch_core::RadiationMonitor;

    #[test]
    fn test_reference_report_lines() {
        let mut monitor = RadiationMonitor::with_defaults();
        let report: Vec<String> = [45, 75, 150, 90]
            .into_iter()
            .map(|level| tick_line(&monitor.step(level)))
            .collect();

        insta::assert_snapshot!(report.join("\n"), @r"
        radiation level: 45, alert: inactive, mode: safe, protection: disabled
        radiation level: 75, alert: inactive, mode: safe, protection: disabled
        radiation level: 150, alert: inactive, mode: moderate, protection: disabled
        radiation level: 90, alert: active, mode: safe, protection: disabled
        ");
    }

    #[test]
    fn test_critical_line() {
        let mut monitor = RadiationMonitor::with_defaults();
        let line = tick_line(&monitor.step(200));
        assert_eq!(
            line,
            "radiation level: 200, alert: inactive, mode: critical, protection: enabled"
        );
    }
}
