//! Report domain model
//!
//! A report is a user-submitted issue (incorrect program data, a bug, or
//! anything else) tracked through operator review. The category payload is
//! a tagged union on `reportType`, so bug fields can never leak onto an
//! info report. Status and its derived timestamp/reason fields co-vary
//! under the rules in [`transition`].

pub mod store;
pub mod transition;
pub mod validate;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Substituted when an operator rejects a report without giving a reason.
pub const REJECTION_REASON_FALLBACK: &str = "No reason provided";

/// Review state of a report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ReportStatus::Pending),
            "resolved" => Some(ReportStatus::Resolved),
            "rejected" => Some(ReportStatus::Rejected),
            _ => None,
        }
    }
}

/// Operator-assigned triage priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Submitter-assigned severity on bug reports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BugSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BugSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            BugSeverity::Low => "Low",
            BugSeverity::Medium => "Medium",
            BugSeverity::High => "High",
            BugSeverity::Critical => "Critical",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(BugSeverity::Low),
            "Medium" => Some(BugSeverity::Medium),
            "High" => Some(BugSeverity::High),
            "Critical" => Some(BugSeverity::Critical),
            _ => None,
        }
    }
}

/// Category-specific report payload, tagged by `reportType`.
///
/// Fixed at creation; a record is never reinterpreted under another tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reportType")]
pub enum ReportDetails {
    /// Incorrect data on a program listing
    #[serde(rename = "info", rename_all = "camelCase")]
    Info {
        /// Display label of the referenced program
        internship: String,
        /// Which listed field is wrong (e.g. "location")
        incorrect_info_type: String,
        /// What the field should say
        correct_info: String,
    },
    /// Something in the application is broken
    #[serde(rename = "bug", rename_all = "camelCase")]
    Bug {
        bug_title: String,
        bug_description: String,
        bug_steps: String,
        bug_severity: BugSeverity,
    },
    /// Anything else
    #[serde(rename = "other", rename_all = "camelCase")]
    Other {
        other_subject: String,
        other_description: String,
    },
}

impl ReportDetails {
    pub fn report_type(&self) -> &'static str {
        match self {
            ReportDetails::Info { .. } => "info",
            ReportDetails::Bug { .. } => "bug",
            ReportDetails::Other { .. } => "other",
        }
    }

    /// The category's description-like field, used as the report summary.
    pub fn summary(&self) -> &str {
        match self {
            ReportDetails::Info { correct_info, .. } => correct_info,
            ReportDetails::Bug {
                bug_description, ..
            } => bug_description,
            ReportDetails::Other {
                other_description, ..
            } => other_description,
        }
    }
}

/// A user-submitted issue record tracked through review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Store document key; generated at creation, immutable.
    pub id: String,
    pub user_id: String,
    /// May be empty when the identity provider has no email on file.
    pub user_email: String,
    #[serde(flatten)]
    pub details: ReportDetails,
    /// Free-text summary populated from the category description field.
    pub report_details: String,
    pub status: ReportStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set iff status is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<NaiveDateTime>,
    /// Set iff status is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<NaiveDateTime>,
    /// Set iff status is rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Report {
    /// Build a freshly submitted report: pending, medium priority, no
    /// derived fields set.
    pub fn new(
        user_id: String,
        user_email: String,
        details: ReportDetails,
        now: NaiveDateTime,
    ) -> Self {
        let report_details = details.summary().to_string();
        Report {
            id: Uuid::new_v4().to_string(),
            user_id,
            user_email,
            details,
            report_details,
            status: ReportStatus::Pending,
            priority: Priority::Medium,
            notes: None,
            resolved_at: None,
            rejected_at: None,
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        }
    }
}
