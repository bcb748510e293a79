use std::fmt::Display;

use anyhow::{Context, Result, bail};

const SANDBOX_BASE_URL: &str = "https://sandbox.safaricom.co.ke";
const SANDBOX_SHORTCODE: &str = "174379";
/// Publicly documented passkey for the Daraja sandbox shortcode.
const SANDBOX_PASSKEY: &str =
    "bfb279f9aa9bdbcf158e97dd71a467cd2e0c893059b10f78e6b72ada1ed2c919";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => bail!("ENVIRONMENT must be development or production, got {other}"),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// Immutable process configuration, loaded once at startup and shared
/// through [`crate::state::AppState`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub shortcode: String,
    pub passkey: String,
    pub callback_url: String,
    pub base_url: String,
    pub port: u16,
    pub environment: Environment,
    pub chama_name: String,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// Consumer key, consumer secret and the callback URL are required in
    /// every environment. The remaining Daraja settings fall back to the
    /// public sandbox in development and are required in production, so a
    /// production deployment can never start against sandbox defaults.
    pub fn from_env() -> Result<Self> {
        let environment = match std::env::var("ENVIRONMENT") {
            Ok(value) => Environment::parse(&value)?,
            Err(_) => Environment::Development,
        };

        let consumer_key =
            std::env::var("DARAJA_CONSUMER_KEY").context("DARAJA_CONSUMER_KEY must be set")?;
        let consumer_secret = std::env::var("DARAJA_CONSUMER_SECRET")
            .context("DARAJA_CONSUMER_SECRET must be set")?;
        let callback_url =
            std::env::var("DARAJA_CALLBACK_URL").context("DARAJA_CALLBACK_URL must be set")?;

        let shortcode = Self::gateway_setting("DARAJA_SHORTCODE", SANDBOX_SHORTCODE, environment)?;
        let passkey = Self::gateway_setting("DARAJA_PASSKEY", SANDBOX_PASSKEY, environment)?;
        let base_url = Self::gateway_setting("DARAJA_BASE_URL", SANDBOX_BASE_URL, environment)?;

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse().context("PORT must be a valid port number")?,
            Err(_) => 5000,
        };
        let chama_name =
            std::env::var("CHAMA_NAME").unwrap_or_else(|_| "Undu Ti Umwe".to_string());

        let config = Self {
            consumer_key,
            consumer_secret,
            shortcode,
            passkey,
            callback_url,
            base_url: base_url.trim_end_matches('/').to_string(),
            port,
            environment,
            chama_name,
        };
        config.validate()?;
        Ok(config)
    }

    fn gateway_setting(name: &str, sandbox_default: &str, environment: Environment) -> Result<String> {
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => match environment {
                Environment::Development => Ok(sandbox_default.to_string()),
                Environment::Production => bail!("{name} must be set in production"),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.consumer_key.trim().is_empty() || self.consumer_secret.trim().is_empty() {
            bail!("Daraja consumer credentials must not be blank");
        }
        if self.callback_url.trim().is_empty() {
            bail!("DARAJA_CALLBACK_URL must not be blank");
        }
        if self.environment == Environment::Production && self.base_url == SANDBOX_BASE_URL {
            bail!("production must not point at the Daraja sandbox");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: Environment) -> AppConfig {
        AppConfig {
            consumer_key: "key".into(),
            consumer_secret: "secret".into(),
            shortcode: SANDBOX_SHORTCODE.into(),
            passkey: SANDBOX_PASSKEY.into(),
            callback_url: "https://chama.example/api/callback".into(),
            base_url: SANDBOX_BASE_URL.into(),
            port: 5000,
            environment,
            chama_name: "Undu Ti Umwe".into(),
        }
    }

    #[test]
    fn environment_parsing() {
        assert_eq!(
            Environment::parse("development").unwrap(),
            Environment::Development
        );
        assert_eq!(
            Environment::parse("production").unwrap(),
            Environment::Production
        );
        assert!(Environment::parse("staging").is_err());
    }

    #[test]
    fn sandbox_defaults_are_valid_in_development() {
        assert!(config(Environment::Development).validate().is_ok());
    }

    #[test]
    fn production_rejects_sandbox_base_url() {
        assert!(config(Environment::Production).validate().is_err());
    }

    #[test]
    fn production_with_live_endpoint_is_valid() {
        let mut config = config(Environment::Production);
        config.base_url = "https://api.safaricom.co.ke".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let mut config = config(Environment::Development);
        config.consumer_secret = "  ".into();
        assert!(config.validate().is_err());
    }
}
