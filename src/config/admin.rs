use super::deserialize_string_lax;
use serde::{Deserialize, Serialize};

/// Fixed login name for the message inbox.
pub const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AdminConfig {
    /// Password for HTTP Basic access to `/admin/*` (required, non-empty).
    /// TOML: `admin.password`. Env: `LOONGES_ADMIN__PASSWORD`.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub password: String,
}
