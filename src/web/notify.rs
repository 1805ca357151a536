//! Standalone notification endpoints
//!
//! Callers post the full committed report record after their own store
//! write; these endpoints only attempt delivery. A 500 from here never
//! implies the store write failed, since the write always precedes the call.

use crate::notifications::Dispatcher;
use crate::reports::Report;
use actix_web::{post, web, HttpResponse};
use serde::Serialize;

pub(super) fn configure(conf: &mut actix_web::web::ServiceConfig) {
    conf.service(notify_created).service(notify_updated);
}

#[derive(Serialize)]
struct NotifyResponse {
    message: String,
}

/// Notify operators of a newly created report
#[post("/notify-created")]
async fn notify_created(
    dispatcher: web::Data<Dispatcher>,
    report: web::Json<Report>,
) -> HttpResponse {
    match dispatcher.notify_created(&report).await {
        Ok(()) => HttpResponse::Ok().json(NotifyResponse {
            message: "Notification sent".to_string(),
        }),
        Err(e) => HttpResponse::InternalServerError().json(NotifyResponse {
            message: e.to_string(),
        }),
    }
}

/// Notify operators and the submitter of an updated report
#[post("/notify-updated")]
async fn notify_updated(
    dispatcher: web::Data<Dispatcher>,
    report: web::Json<Report>,
) -> HttpResponse {
    match dispatcher.notify_updated(&report).await {
        Ok(()) => HttpResponse::Ok().json(NotifyResponse {
            message: "Notifications sent".to_string(),
        }),
        Err(e) => HttpResponse::InternalServerError().json(NotifyResponse {
            message: e.to_string(),
        }),
    }
}
