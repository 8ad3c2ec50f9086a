use super::deserialize_string_lax;
use serde::{Deserialize, Serialize};

/// SMTP settings for contact notifications.
///
/// The configured `username` is also the mailbox address: notifications are
/// sent from it and to it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Turn notification delivery on or off.
    /// TOML: `mail.enabled`. Default: `true`.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// SMTP relay host.
    /// TOML: `mail.server`. Default: `smtp.gmail.com`.
    #[serde(default = "default_server")]
    pub server: String,

    /// TOML: `mail.port`. Default: `587`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upgrade the connection with STARTTLS.
    /// TOML: `mail.use_tls`. Default: `true`.
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,

    /// TOML: `mail.username`. Default: empty (no mailbox configured).
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub username: String,

    /// TOML: `mail.password`. Default: empty.
    #[serde(default, deserialize_with = "deserialize_string_lax")]
    pub password: String,

    /// Upper bound for a single SMTP exchange.
    /// TOML: `mail.timeout_secs`. Default: `30`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl MailConfig {
    /// Mailbox used as both sender and recipient, if one is configured.
    pub fn mailbox(&self) -> Option<&str> {
        let username = self.username.trim();
        (!username.is_empty()).then_some(username)
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            server: default_server(),
            port: default_port(),
            use_tls: default_use_tls(),
            username: String::new(),
            password: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_port() -> u16 {
    587
}

fn default_use_tls() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}
