use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::domain::lead_email::LeadEmail;
use crate::email_client::{EmailClient, NotifyError};

// Bounds in-flight notification memory under submission bursts; a full queue
// drops the notification (at-most-once delivery, nothing to retry from)
const QUEUE_CAPACITY: usize = 64;
const ERROR_LOG_FILE: &str = "email_errors.log";

#[derive(Debug)]
pub struct Notification {
    pub email: LeadEmail,
    pub full_name: String,
}

/// Cheap handle the submission handler uses to hand a notification off to the
/// background worker without ever blocking the response.
#[derive(Clone)]
pub struct NotifierHandle {
    tx: mpsc::Sender<Notification>,
}

impl NotifierHandle {
    pub fn dispatch(&self, email: LeadEmail, full_name: String) {
        let notification = Notification { email, full_name };

        if let Err(err) = self.tx.try_send(notification) {
            tracing::error!("Failed to queue roadmap notification: {}", err);
        }
    }
}

/// Spawns the single background worker owning the SMTP transport and returns
/// the handle to feed it. The worker never propagates a failure: every error
/// is logged, appended to the error log file on a best-effort basis, and the
/// attempt is abandoned.
pub fn spawn_notifier(email_client: EmailClient) -> NotifierHandle {
    let (tx, mut rx) = mpsc::channel::<Notification>(QUEUE_CAPACITY);

    tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            match email_client
                .send_roadmap_email(&notification.email, &notification.full_name)
                .await
            {
                Ok(()) => {}
                Err(err @ (NotifyError::MissingCredentials | NotifyError::MissingAttachment(_))) => {
                    tracing::warn!(
                        "Skipping roadmap email to {}: {}",
                        notification.email.as_ref(),
                        err
                    );
                }
                Err(err) => {
                    tracing::error!(
                        "Failed to send roadmap email to {}: {:?}",
                        notification.email.as_ref(),
                        err
                    );
                    append_error_log(&notification, &err).await;
                }
            }
        }
    });

    NotifierHandle { tx }
}

async fn append_error_log(notification: &Notification, err: &NotifyError) {
    let entry = format!(
        "{}\nTimestamp: {}\nEmail: {}\nError: {:?}\n",
        "=".repeat(60),
        Utc::now(),
        notification.email.as_ref(),
        err
    );
    let result = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(ERROR_LOG_FILE)
        .await;

    // The log file is diagnostics only, a failure here must not take the
    // worker down with it
    match result {
        Ok(mut file) => {
            if let Err(io_err) = file.write_all(entry.as_bytes()).await {
                tracing::warn!("Failed to append to {}: {}", ERROR_LOG_FILE, io_err);
            }
        }
        Err(io_err) => {
            tracing::warn!("Failed to open {}: {}", ERROR_LOG_FILE, io_err);
        }
    }
}
