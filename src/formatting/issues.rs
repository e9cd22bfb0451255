use colored::*;

use super::utils::*;
use crate::models::{Issue, Progress};

pub fn format_state_color(state: &str) -> ColoredString {
    match state {
        "new" => state.cyan(),
        "open" => state.yellow(),
        "resolved" | "closed" => state.green(),
        "on hold" => state.dimmed(),
        "invalid" | "duplicate" | "wontfix" => state.red().dimmed(),
        _ => state.normal(),
    }
}

pub fn format_kind(kind: &str) -> ColoredString {
    match kind {
        "bug" => kind.red(),
        "enhancement" => kind.green(),
        "proposal" => kind.blue(),
        "task" => kind.normal(),
        _ => kind.dimmed(),
    }
}

pub fn print_issues(issues: &[Issue], format: &str) {
    if issues.is_empty() {
        println!("{}", "No issues found.".dimmed());
        return;
    }

    match format {
        "json" => match serde_json::to_string_pretty(&issues) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize issues: {}", e),
        },
        _ => {
            println!("{}", "─".repeat(110).dimmed());
            println!(
                "{:<8} {:<56} {:<12} {:<10} {:<20}",
                "ID".bold(),
                "Title".bold(),
                "Kind".bold(),
                "State".bold(),
                "Created".bold()
            );
            println!("{}", "─".repeat(110).dimmed());

            for issue in issues {
                println!(
                    "{:<8} {:<56} {:<12} {:<10} {:<20}",
                    format!("#{}", issue.id).blue(),
                    truncate(&issue.title, 56),
                    format_kind(&issue.kind),
                    format_state_color(&issue.state),
                    format_date_time(&issue.created_on).dimmed()
                );
            }
            println!("{}", "─".repeat(110).dimmed());
        }
    }
}

pub fn format_progress(progress: &Progress) -> String {
    format!(
        "fetched page {} ({} issues, ~{:.2}% in {} (ETA: {}))",
        progress
            .page
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string()),
        progress.fetched,
        progress.percentage,
        format_seconds(progress.elapsed),
        format_seconds(progress.eta)
    )
}
