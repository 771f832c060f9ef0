//! Shared helper functions for CLI commands

use console::style;

use crate::core::identity::EntityId;
use crate::risk::BandMatch;

/// Format an EntityId for display, truncating if too long
///
/// IDs longer than 16 characters are truncated to 13 chars with "..." suffix.
pub fn format_short_id(id: &EntityId) -> String {
    let s = id.to_string();
    if s.len() > 16 {
        format!("{}...", &s[..13])
    } else {
        s
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Apply the band's color to a value for terminal display.
///
/// Band colors are hex strings; the small platform palette maps back to
/// ANSI colors, anything else renders unstyled.
pub fn style_banded(text: &str, band: &BandMatch) -> String {
    match band.color.as_str() {
        "#c62828" => style(text).red().bold().to_string(),
        "#ef6c00" => style(text).red().to_string(),
        "#f9a825" => style(text).yellow().to_string(),
        "#2e7d32" => style(text).green().to_string(),
        _ => text.to_string(),
    }
}
