use anyhow::{Context, Result};
use lettre::{
    message::Mailbox, transport::smtp::authentication::Credentials, AsyncSmtpTransport,
    AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;
use crate::metrics::OTPS_ISSUED_TOTAL;

/// SMTP delivery for one-time passwords. Without SMTP configuration the OTP
/// is written to the log instead, which is the dev workflow.
pub struct EmailService {
    smtp: Option<SmtpConfig>,
}

impl EmailService {
    pub fn new(smtp: Option<SmtpConfig>) -> Self {
        Self { smtp }
    }

    pub fn sending_disabled() -> bool {
        std::env::var("EMAIL_SEND_DISABLED")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub async fn send_otp_email(&self, recipient_email: &str, otp: &str) -> Result<()> {
        let settings = match &self.smtp {
            Some(settings) if !Self::sending_disabled() => settings,
            _ => {
                tracing::info!("OTP for {}: {}", recipient_email, otp);
                OTPS_ISSUED_TOTAL.with_label_values(&["log"]).inc();
                return Ok(());
            }
        };

        let from_address: Mailbox = settings
            .from
            .parse()
            .context("Invalid from email address")?;
        let to_address: Mailbox = recipient_email
            .parse()
            .context("Invalid recipient email address")?;

        let email = Message::builder()
            .from(from_address)
            .to(to_address)
            .subject("Your OTP")
            .body(format!("Your OTP: {}", otp))
            .context("Failed to build email message")?;

        let mailer = self.build_mailer(settings)?;
        mailer
            .send(email)
            .await
            .context("Failed to send OTP email")?;

        OTPS_ISSUED_TOTAL.with_label_values(&["smtp"]).inc();

        Ok(())
    }

    fn build_mailer(&self, settings: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let creds = Credentials::new(settings.user.clone(), settings.password.clone());

        let builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .context("Invalid SMTP server")?
            .port(settings.port)
            .credentials(creds);

        Ok(builder.build())
    }
}
