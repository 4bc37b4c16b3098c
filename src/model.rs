use serde::{Deserialize, Serialize};

/// Parsed response from the `/parse` endpoint. `error` and a non-empty
/// `assignments` list select mutually exclusive render branches.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkoutData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignments: Vec<Assignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl WorkoutData {
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// The error branch wins over everything else in the payload.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_assignments(&self) -> bool {
        self.error.is_none() && !self.assignments.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Voice,
    Text,
}

/// Badge class for the confidence label; unknown labels fall back to the
/// neutral badge.
pub fn confidence_badge_class(confidence: Option<&str>) -> &'static str {
    match confidence {
        Some("High") => "badge badge-high",
        Some("Medium") => "badge badge-medium",
        _ => "badge",
    }
}

pub fn confidence_badge_text(confidence: Option<&str>) -> String {
    format!("{} Confidence", confidence.unwrap_or("Unknown"))
}

/// Chip class for well-known attribute values; everything else renders as
/// plain text.
pub fn attribute_value_class(key: &str, value: &str) -> Option<&'static str> {
    match key {
        "Activity" => Some("chip chip-activity"),
        "Intensity" => Some(match value {
            "Easy" => "chip chip-easy",
            "Moderate" => "chip chip-moderate",
            "Hard" => "chip chip-hard",
            _ => "chip",
        }),
        _ => None,
    }
}

pub fn card_title(total: usize, index: usize) -> String {
    if total > 1 {
        format!("Assignment {}", index + 1)
    } else {
        "Parsed Assignment".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "confidence": "High",
            "assignments": [
                {"attributes": [
                    {"key": "Activity", "value": "Run"},
                    {"key": "Distance", "value": "10km"}
                ]}
            ],
            "original_text": "Assign a 10km run to Sarah at 7am"
        }"#
    }

    #[test]
    fn deserializes_success_shape_preserving_order() {
        let data: WorkoutData = serde_json::from_str(sample_json()).unwrap();
        assert!(data.has_assignments());
        assert!(!data.is_error());
        assert_eq!(data.confidence.as_deref(), Some("High"));
        let attrs = &data.assignments[0].attributes;
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].key, "Activity");
        assert_eq!(attrs[0].value, "Run");
        assert_eq!(attrs[1].key, "Distance");
        assert_eq!(attrs[1].value, "10km");
    }

    #[test]
    fn deserializes_error_shape() {
        let data: WorkoutData =
            serde_json::from_str(r#"{"assignments": [], "error": "No significant speech detected.", "original_text": "x"}"#)
                .unwrap();
        assert!(data.is_error());
        assert!(!data.has_assignments());
    }

    #[test]
    fn error_branch_wins_even_with_assignments_present() {
        let data: WorkoutData = serde_json::from_str(
            r#"{"error": "boom", "assignments": [{"attributes": [{"key": "k", "value": "v"}]}]}"#,
        )
        .unwrap();
        assert!(data.is_error());
        assert!(!data.has_assignments());
    }

    #[test]
    fn both_absent_renders_nothing() {
        let data = WorkoutData::default();
        assert!(!data.is_error());
        assert!(!data.has_assignments());
    }

    #[test]
    fn missing_fields_default() {
        let data: WorkoutData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, WorkoutData::default());
    }

    #[test]
    fn synthesized_error_result() {
        let data = WorkoutData::from_error("Could not process text.");
        assert!(data.is_error());
        assert!(data.assignments.is_empty());
    }

    #[test]
    fn pretty_json_skips_absent_fields() {
        let json = serde_json::to_string_pretty(&WorkoutData::from_error("x")).unwrap();
        assert!(json.contains("\"error\""));
        assert!(!json.contains("confidence"));
        assert!(!json.contains("assignments"));
    }

    #[test]
    fn confidence_badge_tiers() {
        assert_eq!(confidence_badge_class(Some("High")), "badge badge-high");
        assert_eq!(confidence_badge_class(Some("Medium")), "badge badge-medium");
        assert_eq!(confidence_badge_class(Some("Low")), "badge");
        assert_eq!(confidence_badge_class(None), "badge");
        assert_eq!(confidence_badge_text(Some("High")), "High Confidence");
    }

    #[test]
    fn attribute_chips() {
        assert_eq!(
            attribute_value_class("Activity", "Run"),
            Some("chip chip-activity")
        );
        assert_eq!(
            attribute_value_class("Intensity", "Easy"),
            Some("chip chip-easy")
        );
        assert_eq!(
            attribute_value_class("Intensity", "Tempo"),
            Some("chip")
        );
        assert_eq!(attribute_value_class("Distance", "10km"), None);
    }

    #[test]
    fn card_titles() {
        assert_eq!(card_title(1, 0), "Parsed Assignment");
        assert_eq!(card_title(3, 1), "Assignment 2");
    }
}
