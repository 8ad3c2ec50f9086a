mod admin;
mod basic;
mod mail;

pub use admin::{ADMIN_USERNAME, AdminConfig};
pub use basic::BasicConfig;
pub use mail::MailConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Outgoing notification mail (see `mail` table in config.toml).
    #[serde(default)]
    pub mail: MailConfig,

    /// Message inbox credentials (see `admin` table in config.toml).
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("admin.password must be set and non-empty (LOONGES_ADMIN__PASSWORD)")]
    MissingAdminPassword,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "LOONGES_";

/// Credential keys whose env text is taken verbatim. figment's `Env` parses
/// values, so `123456` would become an integer and `1.50` a float `1.5`.
const VERBATIM_ENV_KEYS: &[&str] = &["mail.username", "mail.password", "admin.password"];

impl Config {
    /// Builds a Figment that merges defaults, `config.toml` (if present) and
    /// `LOONGES_<TABLE>__<KEY>` environment variables, in that order.
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        for key in VERBATIM_ENV_KEYS {
            let var = format!("{ENV_PREFIX}{}", key.replace('.', "__").to_uppercase());
            if let Ok(raw) = std::env::var(&var) {
                figment = figment.merge(Serialized::default(key, raw));
            }
        }
        figment
    }

    /// Loads configuration and validates required fields.
    ///
    /// There is no fallback admin password: startup must fail when it is unset.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let cfg: Self = figment.extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.password.trim().is_empty() {
            return Err(ConfigError::MissingAdminPassword);
        }
        Ok(())
    }
}

/// Accepts credentials written without quotes (numbers, booleans) in TOML.
pub(crate) fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lax {
        Str(String),
        Bool(bool),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match Lax::deserialize(deserializer)? {
        Lax::Str(s) => s,
        Lax::Bool(b) => b.to_string(),
        Lax::Unsigned(n) => n.to_string(),
        Lax::Signed(n) => n.to_string(),
        Lax::Float(n) => n.to_string(),
    })
}
