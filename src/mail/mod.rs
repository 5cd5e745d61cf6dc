pub mod templates;

use async_trait::async_trait;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use tracing::info;

use crate::utils::config::Configuration;
use crate::utils::errors::ExcavatorError;

///
/// A plain-text mail ready to hand to the transport.
///
#[derive(Clone, Debug, PartialEq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

///
/// The mail collaborator consumed by the auth flows.
///
/// The send outcome is reported synchronously within the request, so a client sees mail
/// failure as an infrastructure error rather than a silent no-op.
///
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: &MailMessage) -> Result<(), ExcavatorError>;
}

///
/// Sends mail through an SMTP relay.
///
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &Configuration) -> Result<Self, ExcavatorError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(SmtpMailer {
            transport: builder.build(),
            from: config.mail_from.parse()?,
        })
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, mail: &MailMessage) -> Result<(), ExcavatorError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(mail.to.parse()?)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.text.clone())?;

        self.transport.send(message).await?;

        info!("Sent '{}' mail to {}", mail.subject, mail.to);
        Ok(())
    }
}
