//! Display formatting for admin templates

use chrono::{NaiveDateTime, Utc};

/// "$250" or "$250.50"
pub fn format_cents(cents: i64) -> String {
    let dollars = cents / 100;
    let remainder = cents % 100;
    if remainder == 0 {
        format!("${}", dollars)
    } else {
        format!("${}.{:02}", dollars, remainder)
    }
}

/// Coarse relative timestamp for inquiry lists.
pub fn time_ago(t: NaiveDateTime) -> String {
    let elapsed = Utc::now().naive_utc() - t;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    match () {
        _ if minutes < 1 => "just now".to_string(),
        _ if minutes == 1 => "1 minute ago".to_string(),
        _ if minutes < 60 => format!("{} minutes ago", minutes),
        _ if hours == 1 => "1 hour ago".to_string(),
        _ if hours < 24 => format!("{} hours ago", hours),
        _ if hours < 48 => "yesterday".to_string(),
        _ => t.format("%b %-d, %Y").to_string(),
    }
}

/// Capitalized label for an inquiry status filter tab.
pub fn status_label(status: &str) -> &str {
    match status {
        "new" => "New",
        "contacted" => "Contacted",
        "booked" => "Booked",
        "archived" => "Archived",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn cents_formatting() {
        assert_eq!(format_cents(25_000), "$250");
        assert_eq!(format_cents(25_050), "$250.50");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(0), "$0");
    }

    #[test]
    fn relative_times() {
        let now = Utc::now().naive_utc();
        assert_eq!(time_ago(now), "just now");
        assert_eq!(time_ago(now - Duration::minutes(5)), "5 minutes ago");
        assert_eq!(time_ago(now - Duration::hours(3)), "3 hours ago");
        assert_eq!(time_ago(now - Duration::hours(30)), "yesterday");
        let old = now - Duration::days(30);
        assert!(time_ago(old).contains(", "));
    }

    #[test]
    fn labels() {
        assert_eq!(status_label("new"), "New");
        assert_eq!(status_label("weird"), "weird");
    }
}
