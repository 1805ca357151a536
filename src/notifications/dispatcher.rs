//! Notification dispatcher for report lifecycle events
//!
//! Composes and sends the operator and submitter emails for report
//! creation and update events. Dispatch is fire-and-forget relative to the
//! record mutation: the store write has already committed when these run,
//! a failure is logged and surfaced as a generic [`DispatchError`], and
//! nothing is retried or rolled back. No partial-send state is tracked.

use crate::email::templates::{
    report_created_operator, report_updated_operator, report_updated_submitter, EmailBody,
};
use crate::email::Mailer;
use crate::reports::Report;
use std::env;
use std::sync::Arc;
use std::time::Duration;

/// Applied to every transport call; a hung SMTP server must not hang the
/// enclosing request. Timeout counts as dispatch failure.
pub const DEFAULT_SEND_TIMEOUT_SECS: u64 = 10;

/// Generic delivery failure. The underlying transport error is logged, not
/// carried; callers only need to know the notification did not go out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchError;

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Notification dispatch failed")
    }
}

impl std::error::Error for DispatchError {}

/// Sends report notifications through a [`Mailer`].
#[derive(Clone)]
pub struct Dispatcher {
    mailer: Arc<dyn Mailer>,
    operator_emails: Vec<String>,
    send_timeout: Duration,
}

impl Dispatcher {
    pub fn new(mailer: Arc<dyn Mailer>, operator_emails: Vec<String>, send_timeout: Duration) -> Self {
        Self {
            mailer,
            operator_emails,
            send_timeout,
        }
    }

    /// Build from environment: REPORT_OPERATOR_EMAILS (comma-separated
    /// distribution list) and REPORT_DISPATCH_TIMEOUT_SECS.
    pub fn from_env(mailer: Arc<dyn Mailer>) -> Self {
        let operator_emails =
            parse_operator_list(&env::var("REPORT_OPERATOR_EMAILS").unwrap_or_default());
        if operator_emails.is_empty() {
            log::warn!("REPORT_OPERATOR_EMAILS is empty; operator notifications will not be sent");
        }

        let send_timeout = env::var("REPORT_DISPATCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_SEND_TIMEOUT_SECS));

        Self::new(mailer, operator_emails, send_timeout)
    }

    /// One message to the operator distribution list summarizing the new
    /// report.
    pub async fn notify_created(&self, report: &Report) -> Result<(), DispatchError> {
        let body = report_created_operator(report);
        let result = self.send_operators(&body).await;
        if result.is_ok() {
            log::info!("Dispatched creation notification for report {}", report.id);
        }
        result
    }

    /// Operator message with full administrative detail plus, when the
    /// submitter has an email on file, a status message to the submitter.
    pub async fn notify_updated(&self, report: &Report) -> Result<(), DispatchError> {
        let operator_body = report_updated_operator(report);
        let mut failed = self.send_operators(&operator_body).await.is_err();

        if !report.user_email.is_empty() {
            let submitter_body = report_updated_submitter(report);
            if self
                .send_one(&report.user_email, &submitter_body)
                .await
                .is_err()
            {
                failed = true;
            }
        }

        if failed {
            Err(DispatchError)
        } else {
            log::info!("Dispatched update notification for report {}", report.id);
            Ok(())
        }
    }

    /// One transport send per listed operator address. All addresses are
    /// attempted even after a failure.
    async fn send_operators(&self, body: &EmailBody) -> Result<(), DispatchError> {
        let mut failed = false;
        for to in &self.operator_emails {
            if self.send_one(to, body).await.is_err() {
                failed = true;
            }
        }
        if failed {
            Err(DispatchError)
        } else {
            Ok(())
        }
    }

    async fn send_one(&self, to: &str, body: &EmailBody) -> Result<(), DispatchError> {
        let send = self
            .mailer
            .send(to, &body.subject, &body.text, Some(&body.html));

        match actix_web::rt::time::timeout(self.send_timeout, send).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                log::error!("Failed to send report notification to {}: {}", to, e);
                Err(DispatchError)
            }
            Err(_) => {
                log::error!(
                    "Report notification to {} timed out after {:?}",
                    to,
                    self.send_timeout
                );
                Err(DispatchError)
            }
        }
    }
}

/// Split the distribution list on commas. Entries pass through verbatim,
/// with no trimming or address validation; an unset or empty variable
/// yields an empty list.
fn parse_operator_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_list_splits_on_commas_without_trimming() {
        assert_eq!(
            parse_operator_list("a@example.com, b@example.com"),
            vec!["a@example.com".to_string(), " b@example.com".to_string()]
        );
    }

    #[test]
    fn empty_operator_list_yields_no_entries() {
        assert!(parse_operator_list("").is_empty());
    }

    #[test]
    fn blank_entries_pass_through_verbatim() {
        assert_eq!(
            parse_operator_list("a@example.com,,b@example.com"),
            vec![
                "a@example.com".to_string(),
                String::new(),
                "b@example.com".to_string()
            ]
        );
    }
}
