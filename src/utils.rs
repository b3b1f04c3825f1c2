/// Utility functions used throughout the application
use std::path::PathBuf;

/// Get platform-specific debug log path
pub fn get_debug_log_path() -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push("keytui-debug.log");
    path
}

/// Parse a TTL typed by the user. Whole seconds, at least 1.
pub fn parse_ttl_input(input: &str) -> Option<i64> {
    match input.trim().parse::<i64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_log_path() {
        assert!(get_debug_log_path().ends_with("keytui-debug.log"));
    }

    #[test]
    fn test_parse_ttl_input() {
        assert_eq!(parse_ttl_input(" 120 "), Some(120));
        assert_eq!(parse_ttl_input("0"), None);
        assert_eq!(parse_ttl_input("-5"), None);
        assert_eq!(parse_ttl_input("soon"), None);
    }
}
