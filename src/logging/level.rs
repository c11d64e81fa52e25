use std::fmt;

/// Severity of a log record.
///
/// `Command` is a domain-specific level between `Info` and `Warning`, used
/// solely for audit-style "a command was invoked" events. The derived
/// ordering follows declaration order, so severity comparisons stay
/// type-checked instead of leaning on raw integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Command,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// All levels in ascending severity order.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Command,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// Embed accent color for this level.
    pub fn color(self) -> u32 {
        match self {
            Level::Debug => 0x95a5a6,
            Level::Info => 0x3498db,
            Level::Command => 0x9b59b6,
            Level::Warning => 0xf1c40f,
            Level::Error => 0xe74c3c,
            Level::Critical => 0x992d22,
        }
    }

    /// Author icon URL for this level.
    pub fn icon_url(self) -> &'static str {
        match self {
            Level::Debug => "https://cdn.jsdelivr.net/gh/twitter/twemoji/assets/72x72/1f41b.png",
            Level::Info => "https://cdn.jsdelivr.net/gh/twitter/twemoji/assets/72x72/2139.png",
            Level::Command => "https://cdn.jsdelivr.net/gh/twitter/twemoji/assets/72x72/2328.png",
            Level::Warning => "https://cdn.jsdelivr.net/gh/twitter/twemoji/assets/72x72/26a0.png",
            Level::Error => "https://cdn.jsdelivr.net/gh/twitter/twemoji/assets/72x72/274c.png",
            Level::Critical => "https://cdn.jsdelivr.net/gh/twitter/twemoji/assets/72x72/2620.png",
        }
    }

    /// Whether records at this level must carry an error payload.
    pub fn requires_error_payload(self) -> bool {
        matches!(self, Level::Error | Level::Critical)
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Command => "COMMAND",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Ordering Tests ====================

    #[test]
    fn test_level_total_order() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Command);
        assert!(Level::Command < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_all_is_sorted_ascending() {
        let mut sorted = Level::ALL;
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
    }

    // ==================== Total Map Tests ====================

    #[test]
    fn test_colors_are_distinct() {
        let colors: std::collections::HashSet<u32> =
            Level::ALL.iter().map(|l| l.color()).collect();
        assert_eq!(colors.len(), Level::ALL.len());
    }

    #[test]
    fn test_icons_are_distinct_urls() {
        let icons: std::collections::HashSet<&str> =
            Level::ALL.iter().map(|l| l.icon_url()).collect();
        assert_eq!(icons.len(), Level::ALL.len());
        for icon in icons {
            assert!(icon.starts_with("https://"));
        }
    }

    #[test]
    fn test_payload_requirement() {
        assert!(!Level::Debug.requires_error_payload());
        assert!(!Level::Info.requires_error_payload());
        assert!(!Level::Command.requires_error_payload());
        assert!(!Level::Warning.requires_error_payload());
        assert!(Level::Error.requires_error_payload());
        assert!(Level::Critical.requires_error_payload());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Level::Command.to_string(), "COMMAND");
        assert_eq!(Level::Critical.to_string(), "CRITICAL");
    }
}
