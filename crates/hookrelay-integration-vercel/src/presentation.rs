//! Per-event presentation: color, glyph, title and priority

use std::borrow::Cow;
use std::fmt;

use hookrelay::domain::services::title_from_dotted;

/// Color used for failed deployments and processing errors
pub const ERROR_COLOR: &str = "#ee0000";

/// How loudly an event is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Normal,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Normal => write!(f, "normal"),
            Priority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    /// `#rrggbb`
    pub color: &'static str,
    /// Mattermost emoji shortcode
    pub emoji: &'static str,
    pub title: Cow<'static, str>,
    pub priority: Priority,
}

const fn entry(
    color: &'static str,
    emoji: &'static str,
    title: &'static str,
    priority: Priority,
) -> Presentation {
    Presentation {
        color,
        emoji,
        title: Cow::Borrowed(title),
        priority,
    }
}

static PRESENTATIONS: [(&str, Presentation); 10] = [
    ("deployment.created", entry("#0070f3", ":rocket:", "Deployment Started", Priority::Normal)),
    ("deployment.succeeded", entry("#0f9549", ":white_check_mark:", "Deployment Succeeded", Priority::Normal)),
    ("deployment.ready", entry("#0f9549", ":white_check_mark:", "Deployment Ready", Priority::Normal)),
    ("deployment.error", entry(ERROR_COLOR, ":x:", "Deployment Failed", Priority::High)),
    ("deployment.canceled", entry("#f5a623", ":no_entry_sign:", "Deployment Canceled", Priority::Normal)),
    ("project.created", entry("#7928ca", ":sparkles:", "Project Created", Priority::Low)),
    ("project.removed", entry("#666666", ":wastebasket:", "Project Removed", Priority::Normal)),
    ("domain.created", entry("#50e3c2", ":globe_with_meridians:", "Domain Created", Priority::Low)),
    ("domain.certificate-add", entry("#0f9549", ":lock:", "Certificate Added", Priority::Low)),
    ("domain.renewal", entry("#0070f3", ":arrows_counterclockwise:", "Domain Renewed", Priority::Low)),
];

/// Look up how `event_type` is presented
///
/// Unknown types get a generic bell with a title derived from the dotted name.
pub fn presentation_for(event_type: &str) -> Presentation {
    PRESENTATIONS
        .iter()
        .find(|(name, _)| *name == event_type)
        .map(|(_, presentation)| presentation.clone())
        .unwrap_or_else(|| Presentation {
            color: "#0070f3",
            emoji: ":bell:",
            title: Cow::Owned(title_from_dotted(event_type)),
            priority: Priority::Normal,
        })
}
