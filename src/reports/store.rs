//! Report persistence
//!
//! The store is the sole persistence layer for reports; there is no cache
//! with independent lifetime. Reads and writes carry no concurrency token,
//! so two operators saving the same report concurrently race and the later
//! write wins silently. That gap is accepted; review traffic is low and
//! every save re-derives the status fields from scratch.

use super::{BugSeverity, Priority, Report, ReportDetails, ReportStatus};
use crate::orm::reports;
use async_trait::async_trait;
use sea_orm::{entity::*, query::*, ColumnTrait, DatabaseConnection, DbErr, EntityTrait};

/// Store operation errors.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying database error
    Db(DbErr),
    /// A stored row that cannot be mapped back to a typed report
    Corrupt(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Db(e) => write!(f, "Database error: {}", e),
            StoreError::Corrupt(msg) => write!(f, "Corrupt report row: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<DbErr> for StoreError {
    fn from(e: DbErr) -> Self {
        StoreError::Db(e)
    }
}

/// Document-style access to report records, keyed by report id.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn insert(&self, report: &Report) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Report>, StoreError>;

    /// Overwrite the full record. The caller must have produced `report`
    /// through the transition engine so the status invariants hold.
    async fn update(&self, report: &Report) -> Result<(), StoreError>;

    /// All reports, newest first, optionally filtered by status.
    async fn list(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, StoreError>;
}

/// SeaORM-backed store over the `reports` table.
pub struct DbReportStore {
    db: DatabaseConnection,
}

impl DbReportStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportStore for DbReportStore {
    async fn insert(&self, report: &Report) -> Result<(), StoreError> {
        let row: reports::ActiveModel = to_model(report).into();
        row.insert(&self.db).await?;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Report>, StoreError> {
        let row = reports::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        row.map(from_model).transpose()
    }

    async fn update(&self, report: &Report) -> Result<(), StoreError> {
        let row: reports::ActiveModel = to_model(report).into();
        row.update(&self.db).await?;
        Ok(())
    }

    async fn list(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, StoreError> {
        let mut query = reports::Entity::find().order_by_desc(reports::Column::CreatedAt);

        if let Some(status) = status {
            query = query.filter(reports::Column::Status.eq(status.as_str()));
        }

        let rows = query.all(&self.db).await?;
        rows.into_iter().map(from_model).collect()
    }
}

/// Flatten a typed report into its row shape. Every column carries a value,
/// so a write overwrites the full document.
fn to_model(report: &Report) -> reports::Model {
    let mut row = reports::Model {
        id: report.id.clone(),
        user_id: report.user_id.clone(),
        user_email: report.user_email.clone(),
        report_type: report.details.report_type().to_string(),
        report_details: report.report_details.clone(),
        status: report.status.as_str().to_string(),
        priority: Some(report.priority.as_str().to_string()),
        notes: report.notes.clone(),
        rejection_reason: report.rejection_reason.clone(),
        internship: None,
        incorrect_info_type: None,
        correct_info: None,
        bug_title: None,
        bug_description: None,
        bug_steps: None,
        bug_severity: None,
        other_subject: None,
        other_description: None,
        resolved_at: report.resolved_at,
        rejected_at: report.rejected_at,
        created_at: report.created_at,
        updated_at: report.updated_at,
    };

    match &report.details {
        ReportDetails::Info {
            internship,
            incorrect_info_type,
            correct_info,
        } => {
            row.internship = Some(internship.clone());
            row.incorrect_info_type = Some(incorrect_info_type.clone());
            row.correct_info = Some(correct_info.clone());
        }
        ReportDetails::Bug {
            bug_title,
            bug_description,
            bug_steps,
            bug_severity,
        } => {
            row.bug_title = Some(bug_title.clone());
            row.bug_description = Some(bug_description.clone());
            row.bug_steps = Some(bug_steps.clone());
            row.bug_severity = Some(bug_severity.as_str().to_string());
        }
        ReportDetails::Other {
            other_subject,
            other_description,
        } => {
            row.other_subject = Some(other_subject.clone());
            row.other_description = Some(other_description.clone());
        }
    }

    row
}

/// Rebuild the typed report from a flat row.
fn from_model(row: reports::Model) -> Result<Report, StoreError> {
    let details = match row.report_type.as_str() {
        "info" => ReportDetails::Info {
            internship: row.internship.unwrap_or_default(),
            incorrect_info_type: row.incorrect_info_type.unwrap_or_default(),
            correct_info: row.correct_info.unwrap_or_default(),
        },
        "bug" => {
            let severity = row.bug_severity.unwrap_or_default();
            let bug_severity = BugSeverity::from_str(&severity).ok_or_else(|| {
                StoreError::Corrupt(format!(
                    "report {} has unknown bug severity '{}'",
                    row.id, severity
                ))
            })?;
            ReportDetails::Bug {
                bug_title: row.bug_title.unwrap_or_default(),
                bug_description: row.bug_description.unwrap_or_default(),
                bug_steps: row.bug_steps.unwrap_or_default(),
                bug_severity,
            }
        }
        "other" => ReportDetails::Other {
            other_subject: row.other_subject.unwrap_or_default(),
            other_description: row.other_description.unwrap_or_default(),
        },
        other => {
            return Err(StoreError::Corrupt(format!(
                "report {} has unknown report type '{}'",
                row.id, other
            )))
        }
    };

    let status = ReportStatus::from_str(&row.status).ok_or_else(|| {
        StoreError::Corrupt(format!(
            "report {} has unknown status '{}'",
            row.id, row.status
        ))
    })?;

    // Priority defaults to medium when the column is absent.
    let priority = match row.priority.as_deref() {
        None => Priority::Medium,
        Some(p) => Priority::from_str(p).ok_or_else(|| {
            StoreError::Corrupt(format!("report {} has unknown priority '{}'", row.id, p))
        })?,
    };

    Ok(Report {
        id: row.id,
        user_id: row.user_id,
        user_email: row.user_email,
        details,
        report_details: row.report_details,
        status,
        priority,
        notes: row.notes,
        resolved_at: row.resolved_at,
        rejected_at: row.rejected_at,
        rejection_reason: row.rejection_reason,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
