//! SMTP delivery of submission decision notices.
//!
//! Sends through Gmail with `lettre`, multipart plain text and HTML. Configured from
//! `GMAIL_USERNAME`, `GMAIL_APP_PASSWORD` and `EMAIL_FROM_NAME`; when the credentials
//! are absent the server falls back to `LogOnlyNotifier`.

use async_trait::async_trait;
use lettre::message::{Mailbox, Message, MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use services::notification::{LogOnlyNotifier, Notification, NotificationError, Notifier};
use std::sync::Arc;
use tracing::{info, warn};
use util::config::AppConfig;

const SMTP_HOST: &str = "smtp.gmail.com";
const SMTP_PORT: u16 = 587;

/// [`Notifier`] that sends e-mail over SMTP.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailNotifier {
    pub fn new(username: &str, password: &str, from_name: &str) -> Result<Self, NotificationError> {
        let from = format!("{from_name} <{username}>")
            .parse::<Mailbox>()
            .map_err(|_| NotificationError::InvalidAddress(username.to_owned()))?;

        let tls_parameters = TlsParameters::new(SMTP_HOST.to_string())
            .map_err(|e| NotificationError::Build(format!("TLS parameters: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(SMTP_HOST)
            .map_err(|e| NotificationError::Build(format!("SMTP relay: {e}")))?
            .port(SMTP_PORT)
            .tls(Tls::Required(tls_parameters))
            .credentials(Credentials::new(username.to_owned(), password.to_owned()))
            .build();

        Ok(Self { transport, from })
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, NotificationError> {
        let to = notification
            .to
            .parse::<Mailbox>()
            .map_err(|_| NotificationError::InvalidAddress(notification.to.clone()))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(notification.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(notification.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(notification.html_body.clone()),
                    ),
            )
            .map_err(|e| NotificationError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotificationError> {
        let message = self.build_message(notification)?;
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| NotificationError::Delivery(e.to_string()))
    }
}

/// Picks the SMTP notifier when credentials are configured, the logging one otherwise.
pub fn notifier_from_config(config: &AppConfig) -> Arc<dyn Notifier> {
    if !config.email_enabled() {
        info!("GMAIL_USERNAME/GMAIL_APP_PASSWORD not set, notifications will only be logged");
        return Arc::new(LogOnlyNotifier);
    }

    match EmailNotifier::new(
        &config.gmail_username,
        &config.gmail_app_password,
        &config.email_from_name,
    ) {
        Ok(notifier) => Arc::new(notifier),
        Err(e) => {
            warn!(error = %e, "SMTP notifier could not be built, notifications will only be logged");
            Arc::new(LogOnlyNotifier)
        }
    }
}
