//! DateStyle - How a point in time is rendered for humans
//!
//! Renderings follow en-US conventions in UTC, matching the styles chat
//! clients offer for timestamp tags (`<t:SECONDS:STYLE>`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `12:00 AM`
    ShortTime,
    /// `12:00:00 AM`
    LongTime,
    /// `01/01/2022`
    ShortDate,
    /// `January 1, 2022`
    LongDate,
    /// `January 1, 2022 12:00 AM`
    ShortDateTime,
    /// `Saturday, January 1, 2022 12:00 AM`
    LongDateTime,
    /// Rendered like [`DateStyle::LongDateTime`]; no "3 days ago" phrasing.
    Relative,
}

impl DateStyle {
    /// Map a timestamp-tag style character (`t`, `T`, `d`, `D`, `f`, `F`, `R`)
    pub fn from_tag(c: char) -> Option<Self> {
        match c {
            't' => Some(DateStyle::ShortTime),
            'T' => Some(DateStyle::LongTime),
            'd' => Some(DateStyle::ShortDate),
            'D' => Some(DateStyle::LongDate),
            'f' => Some(DateStyle::ShortDateTime),
            'F' => Some(DateStyle::LongDateTime),
            'R' => Some(DateStyle::Relative),
            _ => None,
        }
    }

    /// chrono `strftime` pattern for this style
    pub fn pattern(&self) -> &'static str {
        match self {
            DateStyle::ShortTime => "%-I:%M %p",
            DateStyle::LongTime => "%-I:%M:%S %p",
            DateStyle::ShortDate => "%m/%d/%Y",
            DateStyle::LongDate => "%B %-d, %Y",
            DateStyle::ShortDateTime => "%B %-d, %Y %-I:%M %p",
            DateStyle::LongDateTime | DateStyle::Relative => "%A, %B %-d, %Y %-I:%M %p",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(DateStyle::from_tag('F'), Some(DateStyle::LongDateTime));
        assert_eq!(DateStyle::from_tag('R'), Some(DateStyle::Relative));
        assert_eq!(DateStyle::from_tag('x'), None);
    }
}
