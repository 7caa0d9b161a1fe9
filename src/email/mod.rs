//! Mail sender for meal summaries
//!
//! Delivers the already-formatted ledger block over SMTP via lettre. The send
//! is synchronous; the meal is persisted before any send is attempted, so a
//! delivery failure never affects stored state.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::Error as SmtpError;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// Errors that can occur when sending email
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// No recipients given
    #[error("No recipients given")]
    NoRecipients,
}

/// SMTP mail sender for meal summaries
#[derive(Clone)]
pub struct MailSender {
    mailer: SmtpTransport,
    from_address: String,
}

impl MailSender {
    /// Create a mail sender from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be set up.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = SmtpTransport::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send a plain-text meal summary to the given recipients.
    ///
    /// # Errors
    ///
    /// Returns error when an address is invalid or SMTP delivery fails.
    pub fn send_summary(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
    ) -> Result<(), EmailError> {
        if recipients.is_empty() {
            return Err(EmailError::NoRecipients);
        }

        let mut builder = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .subject(subject);

        for recipient in recipients {
            builder = builder.to(recipient
                .parse()
                .map_err(|_| EmailError::InvalidAddress(recipient.clone()))?);
        }

        let email = builder
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.mailer.send(&email)?;

        tracing::info!(recipients = recipients.len(), subject = %subject, "Meal summary email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn sender() -> MailSender {
        let config = EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "user".to_string(),
            smtp_password: SecretString::from("secret"),
            from_address: "bju@example.com".to_string(),
        };
        MailSender::new(&config).expect("relay setup")
    }

    #[test]
    fn test_empty_recipient_list_rejected() {
        let err = sender().send_summary(&[], "subject", "body").unwrap_err();
        assert!(matches!(err, EmailError::NoRecipients));
    }

    #[test]
    fn test_invalid_recipient_rejected_before_send() {
        let err = sender()
            .send_summary(&["not-an-address".to_string()], "subject", "body")
            .unwrap_err();
        match err {
            EmailError::InvalidAddress(addr) => assert_eq!(addr, "not-an-address"),
            other => panic!("expected InvalidAddress, got {:?}", other),
        }
    }
}
