use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::path::PathBuf;

use crate::config::EmailSettings;
use crate::domain::lead_email::LeadEmail;

const ROADMAP_FILENAME: &str = "roadmap.pdf";
const ROADMAP_SUBJECT: &str = "Your Personalized Full Stack Marketing Career Roadmap";

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("mail credentials are not configured")]
    MissingCredentials,
    #[error("roadmap attachment not found at {0}")]
    MissingAttachment(PathBuf),
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("invalid attachment content type")]
    ContentType(#[from] lettre::message::header::ContentTypeErr),
    #[error("failed to build the email message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("failed to send the email: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub struct EmailClient {
    // None when SMTP credentials are not configured; sending then aborts
    // with MissingCredentials instead of attempting a connection
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    sender: Mailbox,
    attachment_dir: PathBuf,
}

impl EmailClient {
    pub fn new(settings: EmailSettings) -> Result<EmailClient, NotifyError> {
        let sender: Mailbox = settings.from_address.parse()?;
        let transport = if settings.has_credentials() {
            Some(build_transport(&settings)?)
        } else {
            None
        };

        Ok(EmailClient {
            transport,
            sender,
            attachment_dir: settings.attachment_dir,
        })
    }

    pub fn attachment_path(&self) -> PathBuf {
        self.attachment_dir.join(ROADMAP_FILENAME)
    }

    /// Sends the roadmap email with the static PDF attached. The caller is a
    /// background worker, so every failure is a typed error for it to log;
    /// nothing here reaches the submission response.
    pub async fn send_roadmap_email(
        &self,
        recipient: &LeadEmail,
        full_name: &str,
    ) -> Result<(), NotifyError> {
        let transport = self
            .transport
            .as_ref()
            .ok_or(NotifyError::MissingCredentials)?;

        let attachment_path = self.attachment_path();
        if !attachment_path.exists() {
            return Err(NotifyError::MissingAttachment(attachment_path));
        }
        let pdf_bytes = tokio::fs::read(&attachment_path).await?;

        let message = build_roadmap_message(
            self.sender.clone(),
            recipient.as_ref().parse()?,
            full_name,
            pdf_bytes,
        )?;

        transport.send(message).await?;

        tracing::info!("Roadmap email sent to {}", recipient.as_ref());

        Ok(())
    }
}

fn build_transport(
    settings: &EmailSettings,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
    let builder = if settings.use_tls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
    };
    let credentials = Credentials::new(
        settings.username.clone(),
        settings.password.expose_secret().clone(),
    );

    Ok(builder.port(settings.port).credentials(credentials).build())
}

fn build_roadmap_message(
    sender: Mailbox,
    recipient: Mailbox,
    full_name: &str,
    pdf_bytes: Vec<u8>,
) -> Result<Message, NotifyError> {
    let attachment = Attachment::new(ROADMAP_FILENAME.to_string())
        .body(pdf_bytes, ContentType::parse("application/pdf")?);

    let message = Message::builder()
        .from(sender)
        .to(recipient)
        .subject(ROADMAP_SUBJECT)
        .multipart(
            MultiPart::mixed()
                .multipart(MultiPart::alternative_plain_html(
                    roadmap_text_body(full_name),
                    roadmap_html_body(full_name),
                ))
                .singlepart(attachment),
        )?;

    Ok(message)
}

fn roadmap_html_body(full_name: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family:sans-serif;color:#0f172a;">
    <h1>Your Full Stack Marketing Career Roadmap</h1>
    <p>Hi {full_name},</p>
    <p>Thank you for using the Career ROI tool.</p>
    <p>
      Based on your skills and experience, we've prepared a
      <strong>Full Stack Marketing Career Roadmap</strong> to help you understand
      how to grow toward higher-impact roles and stronger salary outcomes.
    </p>
    <p>This roadmap covers:</p>
    <ul>
      <li>Core marketing foundations and strategy</li>
      <li>Growth, performance, and analytics skills</li>
      <li>AI and MarTech capabilities shaping modern marketing</li>
      <li>A structured path to becoming a full-stack marketing professional</li>
    </ul>
    <p>You'll find the roadmap attached to this email as a PDF.</p>
    <p>
      Wishing you clarity and growth ahead,<br>
      <strong>Team Digital Maven</strong>
    </p>
  </body>
</html>"#
    )
}

fn roadmap_text_body(full_name: &str) -> String {
    format!(
        "Hi {full_name},\n\n\
         Thank you for using the Career ROI tool.\n\n\
         Based on your skills and experience, we've prepared a Full Stack Marketing \
         Career Roadmap to help you understand how to grow toward higher-impact roles \
         and stronger salary outcomes.\n\n\
         This roadmap covers:\n\
         - Core marketing foundations and strategy\n\
         - Growth, performance, and analytics skills\n\
         - AI and MarTech capabilities shaping modern marketing\n\
         - A structured path to becoming a full-stack marketing professional\n\n\
         You'll find the roadmap attached to this email as a PDF.\n\n\
         Wishing you clarity and growth ahead,\n\
         Team Digital Maven\n"
    )
}
