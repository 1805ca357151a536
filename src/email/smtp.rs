//! SMTP delivery over lettre's tokio transport.
//!
//! The transport call itself is async so the dispatcher's send timeout can
//! preempt a hung connection.

use super::{EmailConfig, EmailError, EmailResult};
use lettre::message::{header::ContentType, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

fn build_transport(config: &EmailConfig) -> EmailResult<AsyncSmtpTransport<Tokio1Executor>> {
    let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

    let builder = if config.use_tls {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
    };

    Ok(builder.credentials(creds).port(config.smtp_port).build())
}

fn build_message(
    config: &EmailConfig,
    to: &Mailbox,
    subject: &str,
    body_text: &str,
    body_html: Option<&str>,
) -> EmailResult<Message> {
    let from: Mailbox = format!("{} <{}>", config.from_name, config.from_email)
        .parse()
        .map_err(|e| EmailError::ConfigError(format!("Invalid from address: {}", e)))?;

    let builder = Message::builder()
        .from(from)
        .to(to.clone())
        .subject(subject);

    let message = match body_html {
        Some(html) => builder.multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(body_text.to_string()),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html.to_string()),
                ),
        )?,
        None => builder
            .header(ContentType::TEXT_PLAIN)
            .body(body_text.to_string())?,
    };

    Ok(message)
}

/// Send one message through the configured SMTP relay.
pub async fn send_email(
    config: &EmailConfig,
    to: &str,
    subject: &str,
    body_text: &str,
    body_html: Option<&str>,
) -> EmailResult<()> {
    let recipient: Mailbox = to
        .parse()
        .map_err(|e| EmailError::ConfigError(format!("Invalid to address: {}", e)))?;

    let message = build_message(config, &recipient, subject, body_text, body_html)?;
    let transport = build_transport(config)?;

    transport.send(message).await?;
    log::info!("Email sent successfully to: {}", to);

    Ok(())
}
