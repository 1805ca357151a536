//! Email bodies for report lifecycle notifications
//!
//! Three messages: new report → operators, updated report → operators,
//! updated report → submitter. Operator messages are fixed-shape: absent
//! optional fields render a placeholder instead of being omitted, so every
//! message looks the same regardless of which fields were filled in.

use crate::reports::{Report, ReportDetails, ReportStatus};

/// Rendered for optional fields that are not set.
const ABSENT: &str = "N/A";

/// A composed message, ready for the transport.
pub struct EmailBody {
    pub subject: String,
    pub text: String,
    pub html: String,
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(ABSENT)
}

fn category_name(details: &ReportDetails) -> &'static str {
    match details {
        ReportDetails::Info { .. } => "Incorrect program data",
        ReportDetails::Bug { .. } => "Bug",
        ReportDetails::Other { .. } => "Other",
    }
}

/// Category fields as (label, value) pairs, in display order.
fn category_fields(details: &ReportDetails) -> Vec<(&'static str, String)> {
    match details {
        ReportDetails::Info {
            internship,
            incorrect_info_type,
            correct_info,
        } => vec![
            ("Program", internship.clone()),
            ("Field in error", incorrect_info_type.clone()),
            ("Correct information", correct_info.clone()),
        ],
        ReportDetails::Bug {
            bug_title,
            bug_description,
            bug_steps,
            bug_severity,
        } => vec![
            ("Title", bug_title.clone()),
            ("Description", bug_description.clone()),
            ("Steps to reproduce", bug_steps.clone()),
            ("Severity", bug_severity.as_str().to_string()),
        ],
        ReportDetails::Other {
            other_subject,
            other_description,
        } => vec![
            ("Subject", other_subject.clone()),
            ("Description", other_description.clone()),
        ],
    }
}

fn fields_as_text(fields: &[(&'static str, String)]) -> String {
    fields
        .iter()
        .map(|(label, value)| format!("{}: {}", label, value))
        .collect::<Vec<_>>()
        .join("\n")
}

fn fields_as_html_rows(fields: &[(&'static str, String)]) -> String {
    fields
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">{}</td>
    <td style="padding: 6px 12px;">{}</td>
</tr>"#,
                label, value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_html(title: &str, inner: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{}</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2>{}</h2>
{}
        <hr style="margin: 30px 0; border: none; border-top: 1px solid #ddd;">
        <p style="color: #666; font-size: 0.9em;">
            This is an automated message from the Pathways report system.
        </p>
    </div>
</body>
</html>"#,
        title, title, inner
    )
}

/// New report summary for the operator distribution list.
pub fn report_created_operator(report: &Report) -> EmailBody {
    let category = category_name(&report.details);
    let fields = category_fields(&report.details);
    let subject = format!("New report submitted: {}", category);

    let text = format!(
        r#"A new report has been submitted.

Report ID: {}
Category: {}
Submitted by: {} <{}>
Submitted at: {} UTC
Priority: {}
Status: {}

{}
"#,
        report.id,
        category,
        report.user_id,
        if report.user_email.is_empty() {
            ABSENT
        } else {
            &report.user_email
        },
        report.created_at.format("%Y-%m-%d %H:%M"),
        report.priority.as_str(),
        report.status.as_str(),
        fields_as_text(&fields),
    );

    let inner = format!(
        r#"        <p>A new report has been submitted and is waiting for triage.</p>
        <table style="border-collapse: collapse; background: #f8f9fa; width: 100%;">
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Report ID</td>
    <td style="padding: 6px 12px;">{}</td>
</tr>
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Category</td>
    <td style="padding: 6px 12px;">{}</td>
</tr>
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Submitted by</td>
    <td style="padding: 6px 12px;">{} &lt;{}&gt;</td>
</tr>
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Submitted at</td>
    <td style="padding: 6px 12px;">{} UTC</td>
</tr>
{}
        </table>"#,
        report.id,
        category,
        report.user_id,
        if report.user_email.is_empty() {
            ABSENT
        } else {
            &report.user_email
        },
        report.created_at.format("%Y-%m-%d %H:%M"),
        fields_as_html_rows(&fields),
    );

    EmailBody {
        subject,
        text,
        html: wrap_html("New Report Submitted", &inner),
    }
}

/// Full administrative detail for the operator distribution list.
pub fn report_updated_operator(report: &Report) -> EmailBody {
    let category = category_name(&report.details);
    let fields = category_fields(&report.details);
    let subject = format!(
        "Report {} updated: {}",
        report.id,
        report.status.as_str()
    );

    let text = format!(
        r#"A report has been updated.

Report ID: {}
Category: {}
Submitted by: {} <{}>
Status: {}
Priority: {}
Notes: {}
Rejection reason: {}

{}
"#,
        report.id,
        category,
        report.user_id,
        if report.user_email.is_empty() {
            ABSENT
        } else {
            &report.user_email
        },
        report.status.as_str(),
        report.priority.as_str(),
        opt(&report.notes),
        opt(&report.rejection_reason),
        fields_as_text(&fields),
    );

    let inner = format!(
        r#"        <p>A report has been updated by an operator.</p>
        <table style="border-collapse: collapse; background: #f8f9fa; width: 100%;">
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Report ID</td>
    <td style="padding: 6px 12px;">{}</td>
</tr>
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Status</td>
    <td style="padding: 6px 12px;"><strong>{}</strong></td>
</tr>
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Priority</td>
    <td style="padding: 6px 12px;">{}</td>
</tr>
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Notes</td>
    <td style="padding: 6px 12px;">{}</td>
</tr>
<tr>
    <td style="padding: 6px 12px; color: #666; white-space: nowrap;">Rejection reason</td>
    <td style="padding: 6px 12px;">{}</td>
</tr>
{}
        </table>"#,
        report.id,
        report.status.as_str(),
        report.priority.as_str(),
        opt(&report.notes),
        opt(&report.rejection_reason),
        fields_as_html_rows(&fields),
    );

    EmailBody {
        subject,
        text,
        html: wrap_html("Report Updated", &inner),
    }
}

/// Status update for the original submitter. Includes the rejection reason
/// when rejected and the operator notes when any exist.
pub fn report_updated_submitter(report: &Report) -> EmailBody {
    let subject = "An update on your report".to_string();

    let status_line = match report.status {
        ReportStatus::Pending => "Your report is pending review.",
        ReportStatus::Resolved => "Your report has been resolved.",
        ReportStatus::Rejected => "Your report has been reviewed and was not actioned.",
    };

    let mut text = format!(
        r#"Hello,

{}

Report: {}
Status: {}
"#,
        status_line,
        report.report_details,
        report.status.as_str(),
    );

    let mut inner = format!(
        r#"        <p>{}</p>
        <div style="background: #f8f9fa; border-left: 4px solid #007bff; padding: 15px; margin: 20px 0;">
            <p style="margin: 0; white-space: pre-wrap;">{}</p>
        </div>
        <p>Status: <strong>{}</strong></p>"#,
        status_line,
        report.report_details,
        report.status.as_str(),
    );

    if report.status == ReportStatus::Rejected {
        let reason = opt(&report.rejection_reason);
        text.push_str(&format!("Reason: {}\n", reason));
        inner.push_str(&format!("\n        <p>Reason: {}</p>", reason));
    }

    if let Some(notes) = report.notes.as_deref().filter(|n| !n.is_empty()) {
        text.push_str(&format!("Reviewer notes: {}\n", notes));
        inner.push_str(&format!("\n        <p>Reviewer notes: {}</p>", notes));
    }

    text.push_str("\nThank you for helping keep the program directory accurate.\n");
    inner.push_str(
        "\n        <p>Thank you for helping keep the program directory accurate.</p>",
    );

    EmailBody {
        subject,
        text,
        html: wrap_html("An Update on Your Report", &inner),
    }
}
