use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local};

/// `YYYY-MM-DD HH:MM:SS` in local time.
pub fn format_date_time(date: &DateTime<FixedOffset>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn format_seconds(duration: Duration) -> String {
    format!("{}s", duration.as_secs_f64().round() as u64)
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Parses ids given as separate arguments and/or comma separated lists.
pub fn parse_issue_ids<'a, I>(values: I) -> Result<Vec<u64>, String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut ids = Vec::new();

    for value in values {
        for id in value.split(',') {
            let trimmed = id.trim();
            if trimmed.is_empty() {
                continue;
            }
            let id = trimmed
                .parse::<u64>()
                .map_err(|_| format!("'{}' is not an issue id", trimmed))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    Ok(ids)
}
