//! Formatting Helpers
//!
//! Color encoding, truncation, casing, durations and date rendering used by
//! the transformers when building attachments.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::value_objects::DateStyle;

/// Largest 24-bit RGB value
pub const MAX_RGB: u32 = 0xFF_FFFF;

/// Suffix appended by [`truncate_chars`]
pub const ELLIPSIS: &str = "...";

/// Convert a decimal 24-bit color to `#rrggbb`
///
/// Values above `0xFFFFFF` are not colors and yield `None`.
pub fn hex_color(color: u32) -> Option<String> {
    (color <= MAX_RGB).then(|| format!("#{:06x}", color))
}

/// Truncate to `max_chars` characters, appending `...` when anything was cut
///
/// Counts chars, not bytes, so multi-byte text is never split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
        None => text.to_string(),
    }
}

/// First `n` characters of `text`, without a suffix
pub fn take_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Upper-case the first character
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"deployment.promoted"` → `"Deployment Promoted"`
pub fn title_from_dotted(name: &str) -> String {
    name.split('.')
        .filter(|segment| !segment.is_empty())
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a millisecond duration as `XhYmZs`, omitting leading zero units
pub fn format_duration_ms(millis: u64) -> String {
    let total_secs = millis / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Render a UTC instant in the given style
pub fn render_datetime(at: &DateTime<Utc>, style: DateStyle) -> String {
    at.format(style.pattern()).to_string()
}

/// Render unix seconds; `None` when the instant is out of range
pub fn render_epoch_seconds(secs: i64, style: DateStyle) -> Option<String> {
    DateTime::<Utc>::from_timestamp(secs, 0).map(|at| render_datetime(&at, style))
}

/// `2024-01-01T00:00:00.000Z`
pub fn iso8601(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color(3447003).as_deref(), Some("#3498db"));
        assert_eq!(hex_color(16711680).as_deref(), Some("#ff0000"));
        assert_eq!(hex_color(0).as_deref(), Some("#000000"));
        assert_eq!(hex_color(MAX_RGB).as_deref(), Some("#ffffff"));
        assert_eq!(hex_color(MAX_RGB + 1), None);
    }

    #[test]
    fn test_truncate_chars() {
        let exact = "a".repeat(200);
        assert_eq!(truncate_chars(&exact, 200), exact);

        let long = "b".repeat(201);
        let truncated = truncate_chars(&long, 200);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("b..."));

        assert_eq!(truncate_chars("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_take_chars() {
        assert_eq!(take_chars("5c54a91795358ed8", 7), "5c54a91");
        assert_eq!(take_chars("abc", 7), "abc");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("production"), "Production");
        assert_eq!(title_case(""), "");
        assert_eq!(title_from_dotted("domain.moved"), "Domain Moved");
        assert_eq!(title_from_dotted("deployment..x"), "Deployment X");
    }

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(0), "0s");
        assert_eq!(format_duration_ms(999), "0s");
        assert_eq!(format_duration_ms(42_000), "42s");
        assert_eq!(format_duration_ms(65_000), "1m5s");
        assert_eq!(format_duration_ms(3_600_000), "1h0m0s");
        assert_eq!(format_duration_ms(3_725_000), "1h2m5s");
    }

    #[test]
    fn test_render_epoch_seconds() {
        let secs = 1640995200; // 2022-01-01T00:00:00Z
        assert_eq!(
            render_epoch_seconds(secs, DateStyle::ShortTime).as_deref(),
            Some("12:00 AM")
        );
        assert_eq!(
            render_epoch_seconds(secs, DateStyle::LongTime).as_deref(),
            Some("12:00:00 AM")
        );
        assert_eq!(
            render_epoch_seconds(secs, DateStyle::ShortDate).as_deref(),
            Some("01/01/2022")
        );
        assert_eq!(
            render_epoch_seconds(secs, DateStyle::LongDate).as_deref(),
            Some("January 1, 2022")
        );
        assert_eq!(
            render_epoch_seconds(secs, DateStyle::ShortDateTime).as_deref(),
            Some("January 1, 2022 12:00 AM")
        );
        assert_eq!(
            render_epoch_seconds(secs, DateStyle::LongDateTime).as_deref(),
            Some("Saturday, January 1, 2022 12:00 AM")
        );
        assert_eq!(render_epoch_seconds(i64::MAX, DateStyle::LongDate), None);
    }

    #[test]
    fn test_iso8601() {
        let at = DateTime::<Utc>::from_timestamp(1704067200, 0).unwrap();
        assert_eq!(iso8601(&at), "2024-01-01T00:00:00.000Z");
    }
}
