//! RPC endpoint configuration
//!
//! Resolution order, following Ethereum ecosystem conventions:
//! 1. `RPC_URL` - explicit endpoint, highest priority
//! 2. `ALCHEMY_API_KEY` / `INFURA_API_KEY` - builds a Base mainnet URL
//! 3. Public RPC fallback - for testing only
//!
//! ```bash
//! export RPC_URL="https://base-mainnet.g.alchemy.com/v2/YOUR_KEY"
//! ```

use serde::{Deserialize, Serialize, Serializer};

/// Environment variable names
mod env_vars {
    pub const RPC_URL: &str = "RPC_URL";
    pub const ALCHEMY_API_KEY: &str = "ALCHEMY_API_KEY";
    pub const INFURA_API_KEY: &str = "INFURA_API_KEY";
}

/// Public endpoint (rate limited, for testing only)
const PUBLIC_RPC: &str = "https://mainnet.base.org";

/// Shown in place of the endpoint path, which may carry a provider API key
const REDACTED: &str = "<redacted>";

/// RPC configuration for the game chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    /// JSON-RPC endpoint. Serialized with its path redacted.
    #[serde(serialize_with = "serialize_redacted")]
    pub url: String,
}

fn serialize_redacted<S: Serializer>(url: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&redact_url(url))
}

/// Keep only scheme and host; credentials, path and query are dropped
fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(parsed) => {
            let origin = parsed.origin().ascii_serialization();
            let has_secret_parts = parsed.path() != "/"
                || parsed.query().is_some()
                || !parsed.username().is_empty()
                || parsed.password().is_some();
            if has_secret_parts {
                format!("{}/{}", origin, REDACTED)
            } else {
                origin
            }
        }
        Err(_) => REDACTED.to_string(),
    }
}

impl RpcConfig {
    /// Resolve the RPC endpoint from environment variables
    pub fn from_env() -> Self {
        if let Ok(url) = std::env::var(env_vars::RPC_URL) {
            tracing::debug!("Using RPC_URL");
            return Self { url };
        }

        if let Ok(key) = std::env::var(env_vars::ALCHEMY_API_KEY) {
            tracing::info!("Building RPC URL from ALCHEMY_API_KEY");
            return Self {
                url: format!("https://base-mainnet.g.alchemy.com/v2/{}", key),
            };
        }

        if let Ok(key) = std::env::var(env_vars::INFURA_API_KEY) {
            tracing::info!("Building RPC URL from INFURA_API_KEY");
            return Self {
                url: format!("https://base-mainnet.infura.io/v3/{}", key),
            };
        }

        tracing::warn!("No RPC configured, using public RPC (rate limited)");
        Self {
            url: PUBLIC_RPC.to_string(),
        }
    }

    /// Create with an explicit endpoint
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Parsed endpoint
    pub fn parsed_url(&self) -> crate::Result<url::Url> {
        self.url
            .parse()
            .map_err(|e| crate::Error::Config(format!("Invalid RPC URL: {}", e)))
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
