use axum::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;

pub const RESET_EMAIL_SUBJECT: &str = "Password Reset Code";

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// SMTP delivery over a STARTTLS relay, credentials from config.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(cfg: &SmtpConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)?
            .credentials(Credentials::new(cfg.username.clone(), cfg.password.clone()))
            .port(cfg.port)
            .timeout(Some(std::time::Duration::from_secs(10)))
            .build();
        let from = cfg.from.parse::<Mailbox>()?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;
        self.transport.send(email).await?;
        Ok(())
    }
}

pub fn reset_code_email(code: &str) -> String {
    format!(
        "Your password reset code is: {}. It will expire in 15 minutes.",
        code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_email_contains_code_and_expiry_notice() {
        let body = reset_code_email("1a2b3c4d");
        assert!(body.contains("1a2b3c4d"));
        assert!(body.contains("expire in 15 minutes"));
    }
}
