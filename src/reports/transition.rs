//! Status transition engine
//!
//! Every operator save goes through [`apply_transition`], which overwrites
//! the mutable fields and re-derives `resolved_at` / `rejected_at` /
//! `rejection_reason` from the target status. The function is total: any
//! status may follow any other, including itself (a re-save re-stamps the
//! timestamp). Unknown status strings are rejected at the web boundary
//! before the store is touched.

use super::{Priority, Report, ReportStatus, REJECTION_REASON_FALLBACK};
use chrono::NaiveDateTime;

/// Operator input for a review save.
#[derive(Clone, Debug)]
pub struct ReviewUpdate {
    pub status: ReportStatus,
    pub priority: Priority,
    pub notes: Option<String>,
    /// Only consulted when `status` is rejected. Blank or absent text
    /// becomes [`REJECTION_REASON_FALLBACK`].
    pub rejection_reason: Option<String>,
}

/// Compute the record as it should be persisted after an operator save.
///
/// Immutable fields (`id`, `user_id`, `user_email`, the category payload,
/// `created_at`) are carried over untouched.
pub fn apply_transition(current: &Report, update: &ReviewUpdate, now: NaiveDateTime) -> Report {
    let mut report = current.clone();
    report.status = update.status;
    report.priority = update.priority;
    report.notes = update.notes.clone();

    match update.status {
        ReportStatus::Pending => {
            report.resolved_at = None;
            report.rejected_at = None;
            report.rejection_reason = None;
        }
        ReportStatus::Resolved => {
            report.resolved_at = Some(now);
            report.rejected_at = None;
            report.rejection_reason = None;
        }
        ReportStatus::Rejected => {
            report.resolved_at = None;
            report.rejected_at = Some(now);
            let reason = update
                .rejection_reason
                .as_deref()
                .map(str::trim)
                .unwrap_or("");
            report.rejection_reason = Some(if reason.is_empty() {
                REJECTION_REASON_FALLBACK.to_string()
            } else {
                reason.to_string()
            });
        }
    }

    report.updated_at = now;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportDetails;
    use chrono::{Duration, Utc};

    const ALL_STATUSES: [ReportStatus; 3] = [
        ReportStatus::Pending,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];

    fn base_report() -> Report {
        Report::new(
            "user-1".to_string(),
            "student@example.com".to_string(),
            ReportDetails::Other {
                other_subject: "Subject".to_string(),
                other_description: "Description".to_string(),
            },
            Utc::now().naive_utc(),
        )
    }

    fn update_to(status: ReportStatus) -> ReviewUpdate {
        ReviewUpdate {
            status,
            priority: Priority::Medium,
            notes: None,
            rejection_reason: None,
        }
    }

    /// resolved_at iff resolved, rejected_at iff rejected,
    /// rejection_reason iff rejected.
    fn assert_derived_fields_consistent(report: &Report) {
        assert_eq!(
            report.resolved_at.is_some(),
            report.status == ReportStatus::Resolved,
            "resolved_at inconsistent for {:?}",
            report.status
        );
        assert_eq!(
            report.rejected_at.is_some(),
            report.status == ReportStatus::Rejected,
            "rejected_at inconsistent for {:?}",
            report.status
        );
        assert_eq!(
            report.rejection_reason.is_some(),
            report.status == ReportStatus::Rejected,
            "rejection_reason inconsistent for {:?}",
            report.status
        );
    }

    #[test]
    fn invariants_hold_for_every_status_pair() {
        let now = Utc::now().naive_utc();
        for from in ALL_STATUSES {
            for to in ALL_STATUSES {
                let start = apply_transition(&base_report(), &update_to(from), now);
                let end = apply_transition(&start, &update_to(to), now);
                assert_eq!(end.status, to);
                assert_derived_fields_consistent(&end);
            }
        }
    }

    #[test]
    fn immutable_fields_survive_every_transition() {
        let original = base_report();
        let now = Utc::now().naive_utc();
        for to in ALL_STATUSES {
            let next = apply_transition(&original, &update_to(to), now);
            assert_eq!(next.id, original.id);
            assert_eq!(next.user_id, original.user_id);
            assert_eq!(next.user_email, original.user_email);
            assert_eq!(next.details, original.details);
            assert_eq!(next.report_details, original.report_details);
            assert_eq!(next.created_at, original.created_at);
        }
    }

    #[test]
    fn resolving_stamps_and_clears() {
        let now = Utc::now().naive_utc();
        let resolved = apply_transition(&base_report(), &update_to(ReportStatus::Resolved), now);
        assert_eq!(resolved.resolved_at, Some(now));
        assert!(resolved.rejected_at.is_none());
        assert!(resolved.rejection_reason.is_none());
    }

    #[test]
    fn rejecting_with_reason_keeps_trimmed_text() {
        let now = Utc::now().naive_utc();
        let update = ReviewUpdate {
            status: ReportStatus::Rejected,
            priority: Priority::Low,
            notes: Some("duplicate of an earlier report".to_string()),
            rejection_reason: Some("  Duplicate submission  ".to_string()),
        };
        let rejected = apply_transition(&base_report(), &update, now);
        assert_eq!(rejected.rejected_at, Some(now));
        assert_eq!(
            rejected.rejection_reason.as_deref(),
            Some("Duplicate submission")
        );
        assert_eq!(rejected.priority, Priority::Low);
        assert_eq!(
            rejected.notes.as_deref(),
            Some("duplicate of an earlier report")
        );
    }

    #[test]
    fn rejecting_with_blank_reason_uses_fallback() {
        let now = Utc::now().naive_utc();
        for reason in [None, Some("".to_string()), Some("   ".to_string())] {
            let update = ReviewUpdate {
                status: ReportStatus::Rejected,
                priority: Priority::Medium,
                notes: None,
                rejection_reason: reason,
            };
            let rejected = apply_transition(&base_report(), &update, now);
            assert_eq!(
                rejected.rejection_reason.as_deref(),
                Some(REJECTION_REASON_FALLBACK)
            );
        }
    }

    #[test]
    fn reopening_clears_all_derived_fields() {
        let now = Utc::now().naive_utc();
        let rejected = apply_transition(&base_report(), &update_to(ReportStatus::Rejected), now);
        let reopened = apply_transition(&rejected, &update_to(ReportStatus::Pending), now);
        assert_eq!(reopened.status, ReportStatus::Pending);
        assert!(reopened.resolved_at.is_none());
        assert!(reopened.rejected_at.is_none());
        assert!(reopened.rejection_reason.is_none());
    }

    #[test]
    fn resaving_same_status_restamps_timestamp_only() {
        let first_save = Utc::now().naive_utc();
        let second_save = first_save + Duration::seconds(90);

        let update = ReviewUpdate {
            status: ReportStatus::Rejected,
            priority: Priority::High,
            notes: Some("spam".to_string()),
            rejection_reason: Some("Not actionable".to_string()),
        };

        let once = apply_transition(&base_report(), &update, first_save);
        let twice = apply_transition(&once, &update, second_save);

        assert_eq!(twice.rejected_at, Some(second_save));
        assert_eq!(twice.updated_at, second_save);

        // Everything except the re-stamped timestamps is identical.
        let mut expected = once.clone();
        expected.rejected_at = Some(second_save);
        expected.updated_at = second_save;
        assert_eq!(twice, expected);
    }
}
