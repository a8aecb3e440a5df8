use serde::{Deserialize, Serialize};

use crate::error::AlertError;

/// Closed set of hazard categories the rendering boundary knows how to draw.
/// Text that matches no keyword lands on `Unknown`, which the scene selector
/// resolves to the generic warning icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Flood,
    Typhoon,
    Disease,
    Drought,
    Heatwave,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Flood => "flood",
            Category::Typhoon => "typhoon",
            Category::Disease => "disease",
            Category::Drought => "drought",
            Category::Heatwave => "heatwave",
            Category::Unknown => "unknown",
        }
    }
}

/// Severity scale: 1 is lowest concern, 5 is highest. Unmatched text stays
/// at 1 so noise never produces a spurious high-alarm frame.
pub type Severity = u8;

pub const DEFAULT_SEVERITY: Severity = 1;

/// One classified alert, produced once per accepted packet and consumed
/// exactly once by the rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub category: Category,
    pub severity: Severity,
    pub message: String,
}

/// Ordered keyword tables. Both are scanned by substring against the
/// lower-cased alert phrase, but with deliberately different tie-breaks:
/// the category scan runs to the end and keeps the LAST hit, while the
/// severity scan stops at the FIRST hit. The asymmetry is load-bearing
/// behavior carried over from the field prototype; slices keep the scan
/// order explicit instead of leaning on map iteration order.
const CATEGORY_KEYWORDS: &[(&str, Category)] = &[
    ("flood", Category::Flood),
    ("torrential rain", Category::Flood),
    ("rising water", Category::Flood),
    ("typhoon", Category::Typhoon),
    ("cyclone", Category::Typhoon),
    ("tropical storm", Category::Typhoon),
    ("disease", Category::Disease),
    ("outbreak", Category::Disease),
    ("epidemic", Category::Disease),
    ("drought", Category::Drought),
    ("water shortage", Category::Drought),
    ("heatwave", Category::Heatwave),
    ("extreme heat", Category::Heatwave),
];

const SEVERITY_KEYWORDS: &[(&str, Severity)] = &[
    ("catastrophic", 5),
    ("extreme", 5),
    ("severe", 4),
    ("serious", 4),
    ("moderate", 3),
    ("significant", 3),
    ("minor", 2),
    ("slight", 2),
];

/// Splits alert text into the phrase used for keyword lookup and the message
/// shown on the panel, then resolves category and severity.
#[derive(Debug, Clone, Default)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, text: &str) -> Result<AlertRecord, AlertError> {
        if text.is_empty() {
            return Err(AlertError::EmptyAlert);
        }

        let (alert_phrase, message) = split_alert_text(text);
        let phrase = alert_phrase.to_lowercase();

        let category = lookup_category(&phrase);
        if category == Category::Unknown {
            tracing::debug!(
                target: "classify",
                phrase = %phrase.trim_end(),
                "no category keyword matched; treating phrase as a general alert"
            );
        }

        Ok(AlertRecord {
            category,
            severity: lookup_severity(&phrase),
            message,
        })
    }
}

/// Delimiter rule: with fewer than two periods the whole text is both the
/// lookup phrase and the message, untouched. With two or more, the phrase is
/// everything before the first period and the message is the segment between
/// the first and second period, trimmed; the trailer after the second period
/// is discarded.
fn split_alert_text(text: &str) -> (&str, String) {
    let period_count = text.matches('.').count();
    if period_count < 2 {
        return (text, text.to_string());
    }

    let (alert_phrase, remainder) = text.split_once('.').unwrap_or((text, ""));
    let action_phrase = remainder.split_once('.').map_or(remainder, |(head, _)| head);
    (alert_phrase, action_phrase.trim().to_string())
}

fn lookup_category(phrase: &str) -> Category {
    // Full scan, each hit overwriting the previous one.
    let mut category = Category::Unknown;
    for (keyword, candidate) in CATEGORY_KEYWORDS {
        if phrase.contains(keyword) {
            category = *candidate;
        }
    }
    category
}

fn lookup_severity(phrase: &str) -> Severity {
    // Early exit on the first hit.
    for (keyword, severity) in SEVERITY_KEYWORDS {
        if phrase.contains(keyword) {
            return *severity;
        }
    }
    DEFAULT_SEVERITY
}
