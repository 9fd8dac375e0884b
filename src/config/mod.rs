//! Configuration for the competitive intelligence service

pub mod rpc;

use crate::contracts::{Market, Resource};
use crate::numeric::decimal;
use crate::{Error, Result};
use alloy::primitives::{Address, U256};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

// Re-export RPC config
pub use rpc::RpcConfig;

/// Indexer endpoint environment variable name
pub const INDEXER_URL_ENV: &str = "INDEXER_URL";

const DEFAULT_INDEXER_URL: &str = "http://localhost:8080/v1/graphql";

/// Agents are identified by the key they are configured under
pub type AgentId = String;

/// Static contract deployment: every address the game knows about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsConfig {
    /// Core contracts by name (faucet, router, factory, ...)
    #[serde(default)]
    pub core: BTreeMap<String, Address>,
    /// Resource token addresses
    #[serde(default)]
    pub resources: BTreeMap<Resource, Address>,
    /// Liquidity pair addresses
    #[serde(default)]
    pub trading_pairs: BTreeMap<Market, Address>,
    /// Reactor (staking) addresses
    #[serde(default)]
    pub reactors: BTreeMap<Market, Address>,
}

/// Per-agent wallet configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct AgentConfig {
    /// Public wallet address
    pub address: Address,
    /// Hex-encoded private key. Never serialized.
    #[serde(default, skip_serializing)]
    pub private_key: Option<SecretString>,
}

/// Game-stage thresholds on the target resource balance (raw on-chain units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameThresholds {
    /// Above this balance an agent is in the late game
    #[serde(with = "decimal")]
    pub late_game: U256,
    /// Above this balance an agent is in the end game
    #[serde(with = "decimal")]
    pub end_game: U256,
}

impl GameThresholds {
    pub fn new(late_game: U256, end_game: U256) -> Self {
        Self {
            late_game,
            end_game,
        }
    }
}

impl Default for GameThresholds {
    fn default() -> Self {
        let one_token = U256::from(10u64).pow(U256::from(18u64));
        Self {
            late_game: U256::from(100u64) * one_token,
            end_game: U256::from(1_000u64) * one_token,
        }
    }
}

fn default_indexer_url() -> String {
    std::env::var(INDEXER_URL_ENV).unwrap_or_else(|_| DEFAULT_INDEXER_URL.to_string())
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Main configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Contract deployment
    #[serde(default)]
    pub contracts: ContractsConfig,
    /// Competing agents keyed by agent id
    #[serde(default)]
    pub agents: BTreeMap<AgentId, AgentConfig>,
    /// Game-stage thresholds
    #[serde(default)]
    pub thresholds: GameThresholds,
    /// GraphQL endpoint of the position indexer
    #[serde(default = "default_indexer_url")]
    pub indexer_url: String,
    /// Blockchain RPC settings
    #[serde(default)]
    pub rpc: RpcConfig,
    /// Timeout applied to every indexer request (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            contracts: ContractsConfig::default(),
            agents: BTreeMap::new(),
            thresholds: GameThresholds::default(),
            indexer_url: default_indexer_url(),
            rpc: RpcConfig::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the classifier cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.thresholds.late_game >= self.thresholds.end_game {
            return Err(Error::Config(format!(
                "late_game threshold ({}) must be below end_game threshold ({})",
                self.thresholds.late_game, self.thresholds.end_game
            )));
        }
        if self.indexer_url.trim().is_empty() {
            return Err(Error::Config("indexer_url must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "contracts": {
                "core": { "faucet": "0x0000000000000000000000000000000000000a01" },
                "resources": {
                    "carbon": "0x0000000000000000000000000000000000000c02",
                    "helium3": "0x0000000000000000000000000000000000000c08"
                },
                "tradingPairs": {
                    "wattDollarCarbon": "0x0000000000000000000000000000000000000d01"
                },
                "reactors": {
                    "helium3Stake": "0x0000000000000000000000000000000000000e08"
                }
            },
            "agents": {
                "agent-1": { "address": "0x00000000000000000000000000000000000000aa" }
            },
            "thresholds": {
                "late_game": "1000",
                "end_game": "340282366920938463463374607431768211456"
            },
            "indexer_url": "http://indexer.local/graphql"
        })
    }

    #[test]
    fn test_config_deserialize() {
        let parsed: Config = serde_json::from_value(sample_json()).expect("parse config");

        assert_eq!(parsed.contracts.resources.len(), 2);
        assert!(parsed.contracts.resources.contains_key(&Resource::Helium3));
        assert!(parsed
            .contracts
            .trading_pairs
            .contains_key(&Market::WattDollarCarbon));
        assert!(parsed.contracts.reactors.contains_key(&Market::Helium3Stake));
        assert_eq!(parsed.thresholds.late_game, U256::from(1000u64));
        // 2^128 survives the round trip through a decimal string
        assert_eq!(parsed.thresholds.end_game, U256::from(1u64) << 128);
        assert!(parsed.agents["agent-1"].private_key.is_none());
        assert_eq!(parsed.request_timeout_secs, 30);
        parsed.validate().expect("valid config");
    }

    #[test]
    fn test_private_key_is_never_serialized() {
        let mut value = sample_json();
        value["agents"]["agent-1"]["private_key"] = serde_json::json!(
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
        );
        let parsed: Config = serde_json::from_value(value).expect("parse config");
        assert!(parsed.agents["agent-1"].private_key.is_some());

        let out = serde_json::to_string(&parsed).unwrap();
        assert!(!out.contains("private_key"));
        assert!(!out.contains("ac0974bec39a17e3"));
    }

    #[test]
    fn test_rpc_api_key_is_never_serialized() {
        let config = Config {
            rpc: RpcConfig::with_url("https://base-mainnet.infura.io/v3/SECRET_API_KEY"),
            ..Config::default()
        };

        let out = serde_json::to_string_pretty(&config).unwrap();
        assert!(!out.contains("SECRET_API_KEY"));
        assert!(out.contains("base-mainnet.infura.io"));
    }

    #[test]
    fn test_thresholds_serialize_as_decimal() {
        let thresholds = GameThresholds::default();
        let value = serde_json::to_value(thresholds).unwrap();
        assert_eq!(value["late_game"], "100000000000000000000");
        assert_eq!(value["end_game"], "1000000000000000000000");
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut config = Config::default();
        config.thresholds = GameThresholds::new(U256::from(10u64), U256::from(10u64));
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", sample_json()).unwrap();

        let config = Config::load(file.path()).expect("load config");
        assert_eq!(config.indexer_url, "http://indexer.local/graphql");
    }

    #[test]
    fn test_load_reports_bad_json_as_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(Config::load(file.path()), Err(Error::Config(_))));
    }
}
