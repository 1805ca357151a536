//! Per-category validation of report submissions
//!
//! Pure over the draft and the current program listing; nothing is written
//! until the whole draft checks out. The first missing field halts
//! validation with an error naming that field.

use super::{BugSeverity, ReportDetails};
use serde::Deserialize;

/// An unvalidated report submission, as received from the client.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    #[serde(default)]
    pub report_type: String,
    // info
    #[serde(default)]
    pub internship: Option<String>,
    #[serde(default)]
    pub incorrect_info_type: Option<String>,
    #[serde(default)]
    pub correct_info: Option<String>,
    // bug
    #[serde(default)]
    pub bug_title: Option<String>,
    #[serde(default)]
    pub bug_description: Option<String>,
    #[serde(default)]
    pub bug_steps: Option<String>,
    #[serde(default)]
    pub bug_severity: Option<String>,
    // other
    #[serde(default)]
    pub other_subject: Option<String>,
    #[serde(default)]
    pub other_description: Option<String>,
}

/// Why a draft was rejected. Field names match what the client submitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    UnknownReportType(String),
    UnknownProgram(String),
    UnknownSeverity(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField(field) => {
                write!(f, "Required field '{}' is missing", field)
            }
            ValidationError::UnknownReportType(value) => {
                write!(f, "Unknown report type '{}'", value)
            }
            ValidationError::UnknownProgram(value) => {
                write!(f, "'{}' does not match any listed program", value)
            }
            ValidationError::UnknownSeverity(value) => {
                write!(f, "Unknown bug severity '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A present, non-blank field, trimmed. Blank counts as missing.
fn required(value: &Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Validate a draft against the current program listing.
///
/// Returns the typed category payload; the caller assembles the full
/// record around it.
pub fn validate(
    draft: &ReportDraft,
    program_labels: &[String],
) -> Result<ReportDetails, ValidationError> {
    match draft.report_type.as_str() {
        "info" => {
            let internship = required(&draft.internship, "internship")?;
            if !program_labels.iter().any(|label| *label == internship) {
                return Err(ValidationError::UnknownProgram(internship));
            }
            let incorrect_info_type = required(&draft.incorrect_info_type, "incorrectInfoType")?;
            let correct_info = required(&draft.correct_info, "correctInfo")?;
            Ok(ReportDetails::Info {
                internship,
                incorrect_info_type,
                correct_info,
            })
        }
        "bug" => {
            let bug_title = required(&draft.bug_title, "bugTitle")?;
            let bug_description = required(&draft.bug_description, "bugDescription")?;
            let bug_steps = required(&draft.bug_steps, "bugSteps")?;
            let severity = required(&draft.bug_severity, "bugSeverity")?;
            let bug_severity = BugSeverity::from_str(&severity)
                .ok_or(ValidationError::UnknownSeverity(severity))?;
            Ok(ReportDetails::Bug {
                bug_title,
                bug_description,
                bug_steps,
                bug_severity,
            })
        }
        "other" => {
            let other_subject = required(&draft.other_subject, "otherSubject")?;
            let other_description = required(&draft.other_description, "otherDescription")?;
            Ok(ReportDetails::Other {
                other_subject,
                other_description,
            })
        }
        other => Err(ValidationError::UnknownReportType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec![
            "Robotics Lab — Tech Institute".to_string(),
            "City Orchestra — Arts Council".to_string(),
        ]
    }

    fn info_draft() -> ReportDraft {
        ReportDraft {
            report_type: "info".to_string(),
            internship: Some("Robotics Lab — Tech Institute".to_string()),
            incorrect_info_type: Some("location".to_string()),
            correct_info: Some("Chicago, IL".to_string()),
            ..Default::default()
        }
    }

    fn bug_draft() -> ReportDraft {
        ReportDraft {
            report_type: "bug".to_string(),
            bug_title: Some("Search crashes".to_string()),
            bug_description: Some("Searching for an empty string crashes".to_string()),
            bug_steps: Some("1. Clear the box 2. Press enter".to_string()),
            bug_severity: Some("High".to_string()),
            ..Default::default()
        }
    }

    fn other_draft() -> ReportDraft {
        ReportDraft {
            report_type: "other".to_string(),
            other_subject: Some("Feature request".to_string()),
            other_description: Some("Please add a calendar view".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_info_draft_yields_info_payload() {
        let details = validate(&info_draft(), &labels()).unwrap();
        assert_eq!(
            details,
            ReportDetails::Info {
                internship: "Robotics Lab — Tech Institute".to_string(),
                incorrect_info_type: "location".to_string(),
                correct_info: "Chicago, IL".to_string(),
            }
        );
    }

    #[test]
    fn valid_bug_draft_yields_bug_payload() {
        let details = validate(&bug_draft(), &labels()).unwrap();
        assert_eq!(details.report_type(), "bug");
        match details {
            ReportDetails::Bug { bug_severity, .. } => {
                assert_eq!(bug_severity, BugSeverity::High)
            }
            other => panic!("expected bug payload, got {:?}", other),
        }
    }

    #[test]
    fn valid_other_draft_yields_other_payload() {
        let details = validate(&other_draft(), &labels()).unwrap();
        assert_eq!(details.report_type(), "other");
    }

    #[test]
    fn info_missing_each_field_names_that_field() {
        let cases: [(fn(&mut ReportDraft), &str); 3] = [
            (|d| d.internship = None, "internship"),
            (|d| d.incorrect_info_type = None, "incorrectInfoType"),
            (|d| d.correct_info = None, "correctInfo"),
        ];
        for (clear, field) in cases {
            let mut draft = info_draft();
            clear(&mut draft);
            assert_eq!(
                validate(&draft, &labels()),
                Err(ValidationError::MissingField(field))
            );
        }
    }

    #[test]
    fn bug_missing_each_field_names_that_field() {
        let cases: [(fn(&mut ReportDraft), &str); 4] = [
            (|d| d.bug_title = None, "bugTitle"),
            (|d| d.bug_description = None, "bugDescription"),
            (|d| d.bug_steps = None, "bugSteps"),
            (|d| d.bug_severity = None, "bugSeverity"),
        ];
        for (clear, field) in cases {
            let mut draft = bug_draft();
            clear(&mut draft);
            assert_eq!(
                validate(&draft, &labels()),
                Err(ValidationError::MissingField(field))
            );
        }
    }

    #[test]
    fn other_missing_each_field_names_that_field() {
        let cases: [(fn(&mut ReportDraft), &str); 2] = [
            (|d| d.other_subject = None, "otherSubject"),
            (|d| d.other_description = None, "otherDescription"),
        ];
        for (clear, field) in cases {
            let mut draft = other_draft();
            clear(&mut draft);
            assert_eq!(
                validate(&draft, &labels()),
                Err(ValidationError::MissingField(field))
            );
        }
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let mut draft = bug_draft();
        draft.bug_title = Some("   ".to_string());
        assert_eq!(
            validate(&draft, &labels()),
            Err(ValidationError::MissingField("bugTitle"))
        );
    }

    #[test]
    fn first_missing_field_wins() {
        let mut draft = bug_draft();
        draft.bug_title = None;
        draft.bug_steps = None;
        assert_eq!(
            validate(&draft, &labels()),
            Err(ValidationError::MissingField("bugTitle"))
        );
    }

    #[test]
    fn info_program_must_match_listing() {
        let mut draft = info_draft();
        draft.internship = Some("Defunct Program — Nobody".to_string());
        assert_eq!(
            validate(&draft, &labels()),
            Err(ValidationError::UnknownProgram(
                "Defunct Program — Nobody".to_string()
            ))
        );
    }

    #[test]
    fn unknown_report_type_is_rejected() {
        let mut draft = other_draft();
        draft.report_type = "complaint".to_string();
        assert_eq!(
            validate(&draft, &labels()),
            Err(ValidationError::UnknownReportType("complaint".to_string()))
        );
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let mut draft = bug_draft();
        draft.bug_severity = Some("catastrophic".to_string());
        assert_eq!(
            validate(&draft, &labels()),
            Err(ValidationError::UnknownSeverity("catastrophic".to_string()))
        );
    }
}
