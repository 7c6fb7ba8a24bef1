//! Discord markdown post-processing
//!
//! Mattermost does not understand Discord's timestamp tags and renders
//! emoji inside inline code as plain text; both are fixed up here. URLs are
//! never passed through these functions.

use std::borrow::Cow;
use std::sync::LazyLock;

use hookrelay::domain::services::render_epoch_seconds;
use hookrelay::DateStyle;
use regex::{Captures, Regex};

/// `<t:1640995200:F>`
static TIMESTAMP_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<t:(\d+):([tTdDfFR])>").expect("timestamp tag pattern is valid")
});

/// Inline code span: `` `...` ``
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`").expect("code span pattern is valid"));

/// Emoji code points plus the joiners that glue sequences together
/// (ZWJ, variation selector 16, combining keycap, tag characters).
static EMOJI_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Emoji}\x{200D}\x{FE0F}\x{20E3}\x{E0020}-\x{E007F}]+$")
        .expect("emoji pattern is valid")
});

/// `\p{Emoji}` also covers digits, `#` and `*`; at least one of these must be present.
static PICTOGRAPHIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\p{Emoji_Presentation}\x{20E3}]")
        .expect("pictographic pattern is valid")
});

/// Apply all post-processing steps
///
/// Absent or empty input yields `None`, so the destination field is omitted.
pub fn process_text(text: Option<&str>) -> Option<String> {
    let text = text.filter(|t| !t.is_empty())?;
    let rendered = render_timestamp_tags(text);
    Some(unwrap_emoji_code_spans(&rendered).into_owned())
}

/// Replace well-formed timestamp tags with a rendered UTC date/time
///
/// Tags whose epoch does not fit a date are left verbatim.
pub fn render_timestamp_tags(text: &str) -> Cow<'_, str> {
    TIMESTAMP_TAG.replace_all(text, |caps: &Captures| {
        let secs = caps[1].parse::<i64>().ok();
        let style = caps[2].chars().next().and_then(DateStyle::from_tag);

        secs.zip(style)
            .and_then(|(secs, style)| render_epoch_seconds(secs, style))
            .unwrap_or_else(|| caps[0].to_string())
    })
}

/// Strip backticks around code spans that contain nothing but emoji
pub fn unwrap_emoji_code_spans(text: &str) -> Cow<'_, str> {
    CODE_SPAN.replace_all(text, |caps: &Captures| {
        let content = &caps[1];
        if is_emoji_only(content) {
            content.to_string()
        } else {
            caps[0].to_string()
        }
    })
}

fn is_emoji_only(content: &str) -> bool {
    EMOJI_ONLY.is_match(content) && PICTOGRAPHIC.is_match(content)
}
