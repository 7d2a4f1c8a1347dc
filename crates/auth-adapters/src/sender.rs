use async_trait::async_trait;
use dashmap::DashMap;
use domains::{OtpSender, Result};
use secrecy::{ExposeSecret, SecretString};

/// Stands in for an SMS gateway by writing to the log. The code itself is
/// only logged when `echo_codes` is on (local development).
pub struct LogOtpSender {
    echo_codes: bool,
}

impl LogOtpSender {
    pub fn new(echo_codes: bool) -> Self {
        Self { echo_codes }
    }
}

#[async_trait]
impl OtpSender for LogOtpSender {
    async fn send(&self, phone: &str, code: &SecretString) -> Result<()> {
        if self.echo_codes {
            tracing::info!(phone = %mask_phone(phone), code = %code.expose_secret(), "otp dispatched");
        } else {
            tracing::info!(phone = %mask_phone(phone), "otp dispatched");
        }
        Ok(())
    }
}

/// Keeps the last code sent to each phone so a caller (the CLI, a test) can
/// complete the login without a real handset.
#[derive(Default)]
pub struct OutboxOtpSender {
    outbox: DashMap<String, SecretString>,
}

impl OutboxOtpSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_code(&self, phone: &str) -> Option<String> {
        self.outbox
            .get(phone)
            .map(|code| code.expose_secret().to_string())
    }
}

#[async_trait]
impl OtpSender for OutboxOtpSender {
    async fn send(&self, phone: &str, code: &SecretString) -> Result<()> {
        self.outbox.insert(
            phone.to_string(),
            SecretString::from(code.expose_secret().to_string()),
        );
        tracing::debug!(phone = %mask_phone(phone), "otp queued in outbox");
        Ok(())
    }
}

/// "9845012345" -> "******2345"
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let keep = chars.len().min(4);
    let hidden = chars.len() - keep;
    "*".repeat(hidden) + &chars[hidden..].iter().collect::<String>()
}
