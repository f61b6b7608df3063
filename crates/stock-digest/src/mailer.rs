//! Report delivery over SMTP

use crate::config::MailSettings;
use crate::error::{DigestError, Result};
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Code;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, instrument};

/// Delivers a finished report
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportSender: Send + Sync {
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> Result<()>;
}

/// Build a multipart message with a single plain-text part
///
/// Fails when `recipients` is empty or any address does not parse.
pub fn build_message(
    sender: &str,
    recipients: &[String],
    subject: &str,
    body: &str,
) -> Result<Message> {
    let mut builder = Message::builder()
        .from(parse_mailbox(sender)?)
        .subject(subject);
    for recipient in recipients {
        builder = builder.to(parse_mailbox(recipient)?);
    }

    let message = builder
        .multipart(MultiPart::mixed().singlepart(SinglePart::plain(body.to_string())))?;
    Ok(message)
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .parse::<Mailbox>()
        .map_err(|e| DigestError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// SMTP reply codes that mean the credentials were refused
fn is_auth_failure(code: Option<Code>) -> bool {
    code.is_some_and(|c| matches!(c.to_string().as_str(), "530" | "534" | "535"))
}

fn classify_smtp_error(err: lettre::transport::smtp::Error) -> DigestError {
    if is_auth_failure(err.status()) {
        DigestError::MailAuthentication(err.to_string())
    } else {
        DigestError::MailTransport(err.to_string())
    }
}

/// Sends through an authenticated STARTTLS relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
    host: String,
    port: u16,
}

impl SmtpMailer {
    pub fn new(settings: &MailSettings) -> Result<Self> {
        let credentials = Credentials::new(settings.sender.clone(), settings.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
            .map_err(|e| DigestError::MailTransport(e.to_string()))?
            .port(settings.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender: settings.sender.clone(),
            host: settings.smtp_host.clone(),
            port: settings.smtp_port,
        })
    }
}

#[async_trait]
impl ReportSender for SmtpMailer {
    #[instrument(skip(self, body), fields(host = %self.host, port = self.port))]
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> Result<()> {
        let message = build_message(&self.sender, recipients, subject, body)?;

        self.transport
            .send(message)
            .await
            .map_err(classify_smtp_error)?;

        info!(recipients = recipients.len(), "✅ Email sent successfully.");
        Ok(())
    }
}

/// Prints the report to stdout instead of mailing it
#[derive(Debug, Default)]
pub struct ConsoleSender;

#[async_trait]
impl ReportSender for ConsoleSender {
    async fn send(&self, subject: &str, body: &str, recipients: &[String]) -> Result<()> {
        println!("Subject: {subject}");
        println!("To: {}", recipients.join(", "));
        println!();
        println!("{body}");
        info!("Dry run: report printed instead of sent");
        Ok(())
    }
}
