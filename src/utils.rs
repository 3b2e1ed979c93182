use chrono::{DateTime, Utc};

/// Render an ISO-8601 timestamp relative to `now` ("just now", "5 minutes
/// ago", ...). Missing or unparseable input renders as "No activity".
pub fn format_time_ago(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(raw) = timestamp.filter(|s| !s.is_empty()) else {
        return "No activity".to_string();
    };
    let Ok(parsed) = DateTime::parse_from_rfc3339(raw) else {
        return "No activity".to_string();
    };

    let seconds = (now - parsed.with_timezone(&Utc)).num_seconds().max(0);
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else {
        format!("{} days ago", seconds / 86400)
    }
}

/// Part of an email address before the `@`; "Anonymous" when absent.
pub fn extract_username(email: Option<&str>) -> String {
    match email {
        Some(e) if !e.is_empty() => e.split('@').next().unwrap_or(e).to_string(),
        _ => "Anonymous".to_string(),
    }
}

/// Names of fields whose value is empty or whitespace-only.
pub fn missing_fields(fields: &[(&str, &str)]) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| (*name).to_string())
        .collect()
}
