//! Report submission and review endpoints
//!
//! Thin orchestration: the validator and transition engine do the real
//! work; these handlers sequence store writes and notification dispatch.
//! A store failure aborts the operation outright; a dispatch failure after
//! a committed write is reported as a non-blocking warning.

use crate::middleware::Identity;
use crate::notifications::Dispatcher;
use crate::programs::ProgramDirectory;
use crate::reports::store::ReportStore;
use crate::reports::transition::{apply_transition, ReviewUpdate};
use crate::reports::validate::{validate, ReportDraft};
use crate::reports::{Priority, Report, ReportStatus};
use actix_web::{error, get, post, web, Error, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(submit_report)
        .service(view_reports)
        .service(view_report)
        .service(update_report);
}

#[derive(Serialize)]
struct ReportResponse {
    success: bool,
    message: String,
    report_id: Option<String>,
    /// Set when the operation succeeded but notification delivery failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

/// Submit a report
#[post("/reports")]
async fn submit_report(
    identity: Identity,
    store: web::Data<Arc<dyn ReportStore>>,
    dispatcher: web::Data<Dispatcher>,
    programs: web::Data<Arc<dyn ProgramDirectory>>,
    form: web::Json<ReportDraft>,
) -> Result<HttpResponse, Error> {
    let labels = programs
        .active_labels()
        .await
        .map_err(error::ErrorInternalServerError)?;

    // Validation is all-or-nothing; nothing is written on failure.
    let details = match validate(&form, &labels) {
        Ok(details) => details,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ReportResponse {
                success: false,
                message: e.to_string(),
                report_id: None,
                warning: None,
            }))
        }
    };

    let now = Utc::now().naive_utc();
    let report = Report::new(identity.user_id, identity.user_email, details, now);

    store
        .insert(&report)
        .await
        .map_err(error::ErrorInternalServerError)?;

    // The record is durably stored; a failed notification must not fail
    // the submission.
    let warning = match dispatcher.notify_created(&report).await {
        Ok(()) => None,
        Err(_) => Some("Report saved, but notification delivery failed.".to_string()),
    };

    Ok(HttpResponse::Ok().json(ReportResponse {
        success: true,
        message: "Report submitted successfully. Thank you for helping keep the directory accurate."
            .to_string(),
        report_id: Some(report.id.clone()),
        warning,
    }))
}

#[derive(Deserialize)]
struct ReportsQuery {
    status: Option<String>,
}

/// View all reports (operators only)
#[get("/admin/reports")]
async fn view_reports(
    identity: Identity,
    store: web::Data<Arc<dyn ReportStore>>,
    query: web::Query<ReportsQuery>,
) -> Result<HttpResponse, Error> {
    identity.require_operator()?;

    let filter = match query.status.as_deref() {
        None | Some("all") => None,
        Some(raw) => Some(
            ReportStatus::from_str(raw).ok_or_else(|| error::ErrorBadRequest("Invalid status"))?,
        ),
    };

    let reports = store
        .list(filter)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(reports))
}

/// View single report details (operators only)
#[get("/admin/reports/{id}")]
async fn view_report(
    identity: Identity,
    store: web::Data<Arc<dyn ReportStore>>,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    identity.require_operator()?;

    let report = store
        .get(&path.into_inner())
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("Report not found"))?;

    Ok(HttpResponse::Ok().json(report))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateReportForm {
    status: String,
    priority: Option<String>,
    notes: Option<String>,
    rejection_reason: Option<String>,
}

/// Update report status (operators only)
#[post("/admin/reports/{id}/update")]
async fn update_report(
    identity: Identity,
    store: web::Data<Arc<dyn ReportStore>>,
    dispatcher: web::Data<Dispatcher>,
    path: web::Path<String>,
    form: web::Json<UpdateReportForm>,
) -> Result<HttpResponse, Error> {
    identity.require_operator()?;
    let report_id = path.into_inner();

    // Reject bad input before the store is touched.
    let status = ReportStatus::from_str(&form.status)
        .ok_or_else(|| error::ErrorBadRequest("Invalid status"))?;

    let current = store
        .get(&report_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("Report not found"))?;

    // Fields absent from the form keep their current values; blank notes
    // text clears the notes.
    let priority = match form.priority.as_deref() {
        None => current.priority,
        Some(raw) => {
            Priority::from_str(raw).ok_or_else(|| error::ErrorBadRequest("Invalid priority"))?
        }
    };

    let notes = match form.notes.as_deref() {
        None => current.notes.clone(),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
    };

    let updated = apply_transition(
        &current,
        &ReviewUpdate {
            status,
            priority,
            notes,
            rejection_reason: form.rejection_reason.clone(),
        },
        Utc::now().naive_utc(),
    );

    store
        .update(&updated)
        .await
        .map_err(error::ErrorInternalServerError)?;

    // Re-read so the dispatcher sees exactly what was committed.
    let committed = store
        .get(&report_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorInternalServerError("Report disappeared during update"))?;

    let warning = match dispatcher.notify_updated(&committed).await {
        Ok(()) => None,
        Err(_) => Some("Report saved, but notification delivery failed.".to_string()),
    };

    Ok(HttpResponse::Ok().json(ReportResponse {
        success: true,
        message: "Report updated.".to_string(),
        report_id: Some(report_id),
        warning,
    }))
}
