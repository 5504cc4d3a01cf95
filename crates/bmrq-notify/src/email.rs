//! SMTP result notification.

use bmrq_instrument::scoring::Sensitivity;
use jiff::Timestamp;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::error::NotifyError;

/// SMTP settings for the notification channel. Absent credentials disable
/// the channel rather than breaking it.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    /// Implicit-TLS (SMTPS) port, 465 in the usual setup.
    pub smtp_port: u16,
    /// Sending account; also the SMTP login.
    pub from: String,
    /// Researcher mailbox receiving the notifications.
    pub to: String,
    /// App password for the sending account. `None` disables the channel.
    pub app_password: Option<String>,
}

/// What became of a notification attempt. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    /// Required credential or address unconfigured; the channel is
    /// disabled, not broken.
    Skipped,
    Failed(String),
}

impl NotifyOutcome {
    /// Display text for the shell.
    pub fn message(&self) -> String {
        match self {
            NotifyOutcome::Sent => "notification emailed to the researcher".to_string(),
            NotifyOutcome::Skipped => {
                "email credential not configured, notification skipped".to_string()
            }
            NotifyOutcome::Failed(reason) => format!("notification failed: {reason}"),
        }
    }
}

/// Email the submission result to the researcher, best-effort.
pub async fn notify(
    config: &EmailConfig,
    name: &str,
    total: u16,
    submitted_at: Timestamp,
) -> NotifyOutcome {
    let Some(password) = config.app_password.as_deref() else {
        info!("no email credential configured, skipping notification");
        return NotifyOutcome::Skipped;
    };
    if config.from.is_empty() || config.to.is_empty() {
        info!("no notification addresses configured, skipping notification");
        return NotifyOutcome::Skipped;
    }

    match send(config, password, name, total, submitted_at).await {
        Ok(()) => {
            info!(to = %config.to, "result notification sent");
            NotifyOutcome::Sent
        }
        Err(e) => {
            // The submission is already persisted; this is a warning only.
            warn!("result notification failed: {e}");
            NotifyOutcome::Failed(e.to_string())
        }
    }
}

async fn send(
    config: &EmailConfig,
    password: &str,
    name: &str,
    total: u16,
    submitted_at: Timestamp,
) -> Result<(), NotifyError> {
    let display_name = if name.trim().is_empty() {
        "anonymous"
    } else {
        name.trim()
    };
    let sensitivity = Sensitivity::classify(total);
    let body = format!(
        "Subject: {display_name}\n\
         Total: {total}\n\
         Result: {sensitivity}\n\
         \n\
         Submitted at: {submitted_at}\n"
    );

    let message = Message::builder()
        .from(config.from.parse()?)
        .to(config.to.parse()?)
        .subject("BMRQ result notification")
        .header(ContentType::TEXT_PLAIN)
        .body(body)?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        .port(config.smtp_port)
        .credentials(Credentials::new(
            config.from.clone(),
            password.to_string(),
        ))
        .build();

    transport.send(message).await?;
    Ok(())
}
