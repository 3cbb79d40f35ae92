//! Labels a resolved annotation as a minor or significant change and phrases
//! what the client did.

use serde::Serialize;

use crate::annotation::Annotation;
use crate::region::{Importance, Region};
use crate::resolver::{MatchMethod, Resolution};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Highest importance tier that still counts as a minor change.
///
/// `Medium` and `Low` regions are minor (auto-approvable); `High` and
/// `Critical` regions are significant and need review.
pub const MINOR_CHANGE_CEILING: Importance = Importance::Medium;

/// Stand-in for a text note with no content. Whitespace is kept as typed.
pub const EMPTY_NOTE_PLACEHOLDER: &str = "...";

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Whether a change to a region of `importance` is minor.
pub fn is_minor_change(importance: Importance) -> bool {
    importance <= MINOR_CHANGE_CEILING
}

/// Verb phrase describing what the client did with `annotation`.
pub fn describe_action(annotation: &Annotation) -> String {
    match annotation {
        Annotation::Rectangle { .. } => "highlighted an area".to_string(),
        Annotation::Circle { .. } => "circled".to_string(),
        Annotation::Polyline { .. } => "drew attention to".to_string(),
        Annotation::Text { text, .. } => {
            let note = if text.is_empty() {
                EMPTY_NOTE_PLACEHOLDER
            } else {
                text.as_str()
            };
            format!("added note \"{note}\"")
        }
    }
}

/// Outcome of classifying one annotation against its resolved region.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub action: String,
    pub is_minor_change: bool,
    pub summary: String,
}

/// Classify `annotation` against the region it resolved to.
pub fn classify(annotation: &Annotation, region: &Region) -> Classification {
    let action = describe_action(annotation);
    let is_minor_change = is_minor_change(region.importance);
    let summary = if is_minor_change {
        format!(
            "Client {action} the {}. This is a minor adjustment that won't affect the approved scope.",
            region.label
        )
    } else {
        format!(
            "Client {action} the {}. This is a key element - changes may require review.",
            region.label
        )
    };

    Classification {
        action,
        is_minor_change,
        summary,
    }
}

// ---------------------------------------------------------------------------
// IntentResult
// ---------------------------------------------------------------------------

/// Per-annotation result: the resolved region plus its classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResult {
    /// Region name.
    pub region: String,
    pub label: String,
    pub importance: Importance,
    pub action: String,
    pub summary: String,
    pub is_minor_change: bool,
    /// Resolver phase that picked the region. Not part of the wire form.
    #[serde(skip)]
    pub matched_by: MatchMethod,
}

impl IntentResult {
    pub fn new(resolution: Resolution<'_>, classification: Classification) -> Self {
        let region = resolution.region;
        Self {
            region: region.name.clone(),
            label: region.label.clone(),
            importance: region.importance,
            action: classification.action,
            summary: classification.summary,
            is_minor_change: classification.is_minor_change,
            matched_by: resolution.method,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    fn region(importance: Importance) -> Region {
        Region::new("sign", "shop sign", BoundingBox::new(0.0, 0.0, 1.0, 1.0), importance)
    }

    fn circle() -> Annotation {
        Annotation::Circle { x: 0.0, y: 0.0, radius: 5.0 }
    }

    #[test]
    fn threshold_splits_between_medium_and_high() {
        assert!(is_minor_change(Importance::Low));
        assert!(is_minor_change(Importance::Medium));
        assert!(!is_minor_change(Importance::High));
        assert!(!is_minor_change(Importance::Critical));
    }

    #[test]
    fn action_phrases_per_type() {
        let rect = Annotation::Rectangle { x: 0.0, y: 0.0, width: 1.0, height: 1.0 };
        let line = Annotation::Polyline { x: 0.0, y: 0.0, points: vec![0.0, 0.0, 1.0, 1.0] };
        assert_eq!(describe_action(&rect), "highlighted an area");
        assert_eq!(describe_action(&circle()), "circled");
        assert_eq!(describe_action(&line), "drew attention to");
    }

    #[test]
    fn text_action_quotes_note() {
        let note = Annotation::Text { x: 0.0, y: 0.0, text: "make it blue".into() };
        assert_eq!(describe_action(&note), "added note \"make it blue\"");
    }

    #[test]
    fn empty_text_uses_placeholder() {
        let note = Annotation::Text { x: 0.0, y: 0.0, text: String::new() };
        assert_eq!(describe_action(&note), "added note \"...\"");
    }

    #[test]
    fn whitespace_note_kept_literally() {
        let note = Annotation::Text { x: 0.0, y: 0.0, text: "  ".into() };
        assert_eq!(describe_action(&note), "added note \"  \"");
    }

    #[test]
    fn minor_summary_for_low_region() {
        let c = classify(&circle(), &region(Importance::Low));
        assert!(c.is_minor_change);
        assert_eq!(
            c.summary,
            "Client circled the shop sign. This is a minor adjustment that won't affect the approved scope."
        );
    }

    #[test]
    fn review_summary_for_critical_region() {
        let c = classify(&circle(), &region(Importance::Critical));
        assert!(!c.is_minor_change);
        assert_eq!(
            c.summary,
            "Client circled the shop sign. This is a key element - changes may require review."
        );
    }

    #[test]
    fn intent_result_serializes_camel_case() {
        let r = region(Importance::High);
        let resolution = Resolution { region: &r, method: MatchMethod::Overlap };
        let result = IntentResult::new(resolution, classify(&circle(), &r));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["region"], "sign");
        assert_eq!(json["label"], "shop sign");
        assert_eq!(json["importance"], "high");
        assert_eq!(json["action"], "circled");
        assert_eq!(json["isMinorChange"], false);
        assert!(json.get("matchedBy").is_none());
    }
}
