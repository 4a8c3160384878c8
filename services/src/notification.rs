//! Decision notifications sent to submitters.
//!
//! Delivery is best-effort: a failed or slow send is logged and never changes the
//! outcome of the decision that triggered it.

use async_trait::async_trait;
use db::models::submission::Model as SubmissionModel;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("invalid recipient address {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError>;
}

/// Notifier used when no mail transport is configured. Logs and drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyNotifier;

#[async_trait]
impl Notifier for LogOnlyNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            "Mail transport not configured, notification dropped"
        );
        Ok(())
    }
}

/// Sends `notification` with an upper bound on how long it may take.
///
/// Never fails: errors and timeouts are logged at warn level.
pub async fn deliver(notifier: &dyn Notifier, notification: Notification, limit: Duration) {
    match tokio::time::timeout(limit, notifier.send(&notification)).await {
        Ok(Ok(())) => info!(to = %notification.to, subject = %notification.subject, "Notification sent"),
        Ok(Err(e)) => warn!(to = %notification.to, error = %e, "Notification failed"),
        Err(_) => warn!(to = %notification.to, ?limit, "Notification timed out"),
    }
}

pub fn approval_notice(submission: &SubmissionModel, code_link: &str, portal_name: &str) -> Notification {
    let name = encode_text(&submission.name);
    let title = encode_text(&submission.title);
    let link = encode_double_quoted_attribute(code_link);
    let portal = encode_text(portal_name);

    Notification {
        to: submission.email.clone(),
        subject: format!("Your submission \"{}\" was approved", submission.title),
        html_body: format!(
            r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6;">
    <p>Hi {name},</p>
    <p>Your submission <strong>{title}</strong> has been approved and published.</p>
    <p>You can view it here: <a href="{link}">{link}</a></p>
    <p>Thank you for contributing!</p>
    <p>{portal}</p>
  </body>
</html>"#
        ),
        text_body: format!(
            "Hi {},\n\nYour submission \"{}\" has been approved and published.\n\nView it at: {}\n\nThank you for contributing!\n{}",
            submission.name, submission.title, code_link, portal_name
        ),
    }
}

pub fn rejection_notice(submission: &SubmissionModel, reason: &str, portal_name: &str) -> Notification {
    let name = encode_text(&submission.name);
    let title = encode_text(&submission.title);
    let reason_html = encode_text(reason);
    let portal = encode_text(portal_name);

    Notification {
        to: submission.email.clone(),
        subject: format!("Your submission \"{}\" was not accepted", submission.title),
        html_body: format!(
            r#"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; line-height: 1.6;">
    <p>Hi {name},</p>
    <p>Unfortunately your submission <strong>{title}</strong> was not accepted.</p>
    <p><strong>Reason:</strong> {reason_html}</p>
    <p>You are welcome to revise it and submit again.</p>
    <p>{portal}</p>
  </body>
</html>"#
        ),
        text_body: format!(
            "Hi {},\n\nUnfortunately your submission \"{}\" was not accepted.\n\nReason: {}\n\nYou are welcome to revise it and submit again.\n{}",
            submission.name, submission.title, reason, portal_name
        ),
    }
}
