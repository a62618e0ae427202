//! Client configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::PayOSError;
use crate::Result;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-merchant.payos.vn";

/// Environment variable holding the client id.
pub const ENV_CLIENT_ID: &str = "PAYOS_CLIENT_ID";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "PAYOS_API_KEY";
/// Environment variable holding the checksum key.
pub const ENV_CHECKSUM_KEY: &str = "PAYOS_CHECKSUM_KEY";
/// Environment variable holding the optional partner code.
pub const ENV_PARTNER_CODE: &str = "PAYOS_PARTNER_CODE";
/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "PAYOS_BASE_URL";

/// Credentials and transport settings for a [`PayOS`](crate::PayOS) client.
#[derive(Clone, Serialize, Deserialize)]
pub struct PayOSConfig {
    /// Merchant channel client id.
    pub client_id: String,

    /// Merchant channel API key.
    pub api_key: String,

    /// Key used to sign requests and verify responses and webhooks.
    pub checksum_key: String,

    /// Partner code, sent as `x-partner-code` when present.
    #[serde(default)]
    pub partner_code: Option<String>,

    /// API endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    60
}

impl PayOSConfig {
    /// Create a configuration for the production endpoint.
    pub fn new(
        client_id: impl Into<String>,
        api_key: impl Into<String>,
        checksum_key: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            api_key: api_key.into(),
            checksum_key: checksum_key.into(),
            partner_code: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }

    /// Set the partner code.
    pub fn with_partner_code(mut self, partner_code: impl Into<String>) -> Self {
        self.partner_code = Some(partner_code.into());
        self
    }

    /// Point the client at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Read the configuration from `PAYOS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// Empty values count as unset. A missing credential is a
    /// [`PayOSError::Config`] naming the variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &str| {
            get(name).ok_or_else(|| {
                PayOSError::Config(format!("missing {} environment variable", name))
            })
        };

        let mut config = Self::new(
            require(ENV_CLIENT_ID)?,
            require(ENV_API_KEY)?,
            require(ENV_CHECKSUM_KEY)?,
        );
        if let Some(code) = get(ENV_PARTNER_CODE) {
            config = config.with_partner_code(code);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }
        Ok(config)
    }
}

impl fmt::Debug for PayOSConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayOSConfig")
            .field("client_id", &self.client_id)
            .field("api_key", &"<redacted>")
            .field("checksum_key", &"<redacted>")
            .field("partner_code", &self.partner_code)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
