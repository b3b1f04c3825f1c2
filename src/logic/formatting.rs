//! Formatting and display logic
//!
//! Pure functions for formatting data for human-readable display.

use unicode_width::UnicodeWidthChar;

use crate::api::{TTL_MISSING, TTL_PERSISTENT};

/// Format a TTL snapshot showing the two most significant units
///
/// # Examples
/// ```
/// use keytui::logic::formatting::format_ttl;
///
/// assert_eq!(format_ttl(-1), "never");
/// assert_eq!(format_ttl(-2), "missing");
/// assert_eq!(format_ttl(0), "expired");
/// assert_eq!(format_ttl(45), "45s");
/// assert_eq!(format_ttl(200), "3m 20s");
/// assert_eq!(format_ttl(7500), "2h 5m");
/// assert_eq!(format_ttl(93600), "1d 2h");
/// ```
pub fn format_ttl(seconds: i64) -> String {
    match seconds {
        TTL_PERSISTENT => return "never".to_string(),
        TTL_MISSING => return "missing".to_string(),
        s if s <= 0 => return "expired".to_string(),
        _ => {}
    }

    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Clock-style countdown: `HH:MM:SS` when an hour or more is left, else `MM:SS`
///
/// # Examples
/// ```
/// use keytui::logic::formatting::format_countdown;
///
/// assert_eq!(format_countdown(-1), "∞");
/// assert_eq!(format_countdown(0), "00:00:00");
/// assert_eq!(format_countdown(75), "01:15");
/// assert_eq!(format_countdown(3725), "01:02:05");
/// ```
pub fn format_countdown(seconds: i64) -> String {
    if seconds == TTL_PERSISTENT {
        return "∞".to_string();
    }
    if seconds <= 0 {
        return "00:00:00".to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// How close a key is to expiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlUrgency {
    Normal,
    /// Five minutes or less
    Warning,
    /// One minute or less, or already expired
    Critical,
}

pub fn ttl_urgency(seconds: i64) -> TtlUrgency {
    if seconds == TTL_PERSISTENT {
        TtlUrgency::Normal
    } else if seconds <= 60 {
        TtlUrgency::Critical
    } else if seconds <= 300 {
        TtlUrgency::Warning
    } else {
        TtlUrgency::Normal
    }
}

/// Format bytes into human-readable string (e.g., "1.2 KB", "5.3 MB")
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Cut a string to at most `max_width` terminal columns, ending with "…" if cut
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Single-line preview of a stored value
pub fn preview_value(value: &serde_json::Value, max_width: usize) -> String {
    let raw = match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => s.replace('\n', "⏎"),
        other => other.to_string(),
    };
    truncate_to_width(&raw, max_width)
}
