//! # configs
//!
//! Layered application settings: built-in defaults, then `config/default.*`,
//! then `config/{ADMARKET_ENV}.*`, then `ADMARKET__SECTION__KEY` environment
//! variables. A `.env` file is read first if present.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub log: LogSettings,
    pub otp: OtpSettings,
    pub rewards: RewardSettings,
    #[serde(default)]
    pub seed: SeedSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpSettings {
    pub ttl_secs: i64,
    pub code_digits: u32,
    /// Write issued codes to the log. Never enable outside local runs.
    pub echo_codes: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardSettings {
    pub min_withdrawal: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedSettings {
    /// JSON dataset to boot from instead of the built-in demo data
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    /// Phone the CLI logs in with for owner-only commands
    pub owner_phone: SecretString,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        let environment = std::env::var("ADMARKET_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from(Path::new("config"), &environment)
    }

    pub fn load_from(config_dir: &Path, environment: &str) -> Result<Self, SettingsError> {
        let settings: Settings = config::Config::builder()
            .set_default("app.name", "admarket")?
            .set_default("app.environment", environment)?
            .set_default("log.level", "info")?
            .set_default("log.json", false)?
            .set_default("otp.ttl_secs", 300)?
            .set_default("otp.code_digits", 6)?
            .set_default("otp.echo_codes", false)?
            .set_default("rewards.min_withdrawal", 100.0)?
            .set_default("rewards.currency", "INR")?
            .set_default("auth.owner_phone", "9000000001")?
            .add_source(config::File::from(config_dir.join("default")).required(false))
            .add_source(config::File::from(config_dir.join(environment)).required(false))
            .add_source(
                config::Environment::with_prefix("ADMARKET")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.otp.ttl_secs <= 0 {
            return Err(SettingsError::Invalid("otp.ttl_secs must be positive".into()));
        }
        if !(4..=9).contains(&self.otp.code_digits) {
            return Err(SettingsError::Invalid(
                "otp.code_digits must be between 4 and 9".into(),
            ));
        }
        if !(self.rewards.min_withdrawal.is_finite() && self.rewards.min_withdrawal >= 0.0) {
            return Err(SettingsError::Invalid(
                "rewards.min_withdrawal must be zero or more".into(),
            ));
        }
        Ok(())
    }
}
