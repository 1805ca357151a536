//! Shared test doubles and fixtures for the report subsystem tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use pathways::email::{EmailError, EmailResult, Mailer};
use pathways::programs::ProgramDirectory;
use pathways::reports::store::{ReportStore, StoreError};
use pathways::reports::validate::ReportDraft;
use pathways::reports::{BugSeverity, Report, ReportDetails, ReportStatus};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub const PROGRAM_LABEL: &str = "Robotics Lab — Tech Institute";

/// In-memory document store, keyed by report id.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: Mutex<HashMap<String, Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn insert(&self, report: &Report) -> Result<(), StoreError> {
        self.reports
            .lock()
            .unwrap()
            .insert(report.id.clone(), report.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Report>, StoreError> {
        Ok(self.reports.lock().unwrap().get(id).cloned())
    }

    async fn update(&self, report: &Report) -> Result<(), StoreError> {
        self.reports
            .lock()
            .unwrap()
            .insert(report.id.clone(), report.clone());
        Ok(())
    }

    async fn list(&self, status: Option<ReportStatus>) -> Result<Vec<Report>, StoreError> {
        let mut reports: Vec<Report> = self
            .reports
            .lock()
            .unwrap()
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }
}

#[derive(Clone, Debug)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// Records every send and always succeeds.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body_text: &str,
        body_html: Option<&str>,
    ) -> EmailResult<()> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            text: body_text.to_string(),
            html: body_html.map(str::to_string),
        });
        Ok(())
    }
}

/// Simulates a transport outage: every send fails.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _: &str, _: &str, _: &str, _: Option<&str>) -> EmailResult<()> {
        Err(EmailError::ConfigError(
            "simulated transport failure".to_string(),
        ))
    }
}

/// Simulates a hung relay: sends take far longer than any sane timeout.
pub struct HangingMailer;

#[async_trait]
impl Mailer for HangingMailer {
    async fn send(&self, _: &str, _: &str, _: &str, _: Option<&str>) -> EmailResult<()> {
        actix_web::rt::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

/// Fixed program listing.
pub struct StaticProgramDirectory(pub Vec<String>);

#[async_trait]
impl ProgramDirectory for StaticProgramDirectory {
    async fn active_labels(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.0.clone())
    }
}

pub fn program_labels() -> Vec<String> {
    vec![PROGRAM_LABEL.to_string()]
}

pub fn info_draft() -> ReportDraft {
    ReportDraft {
        report_type: "info".to_string(),
        internship: Some(PROGRAM_LABEL.to_string()),
        incorrect_info_type: Some("location".to_string()),
        correct_info: Some("Chicago, IL".to_string()),
        ..Default::default()
    }
}

pub fn info_report() -> Report {
    Report::new(
        "user-1".to_string(),
        "student@example.com".to_string(),
        ReportDetails::Info {
            internship: PROGRAM_LABEL.to_string(),
            incorrect_info_type: "location".to_string(),
            correct_info: "Chicago, IL".to_string(),
        },
        Utc::now().naive_utc(),
    )
}

pub fn bug_report() -> Report {
    Report::new(
        "user-2".to_string(),
        "tester@example.com".to_string(),
        ReportDetails::Bug {
            bug_title: "Search crashes".to_string(),
            bug_description: "Searching for an empty string crashes".to_string(),
            bug_steps: "1. Clear the box 2. Press enter".to_string(),
            bug_severity: BugSeverity::High,
        },
        Utc::now().naive_utc(),
    )
}
