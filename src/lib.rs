//! He3 Competitive Intelligence
//!
//! Reads on-chain balances and indexed positions for competing He3 game agents
//! and turns them into strategy labels:
//! - Resource focus and production path preference
//! - Liquidity and staking strategy by resource tier
//! - Game stage and counter-strategy suggestions
//! - He3 leaderboard
//!
//! # Security Model
//!
//! - Balance reads are plain `eth_call`s; nothing is ever signed
//! - Agent private keys are only used to validate the configured addresses
//! - Keys are never serialized or logged

pub mod agents;
pub mod config;
pub mod contracts;
pub mod intel;
pub mod numeric;
pub mod sources;

mod error;

// Re-export commonly used types
pub use agents::{AgentRoster, AgentWallet};
pub use config::{AgentId, Config, GameThresholds, RpcConfig};
pub use contracts::{ContractRegistry, Resource};
pub use error::{ClassificationError, Error, Result};
pub use intel::{AgentIntelligence, CompetitiveIntel, RankedAgent, StrategicAnalysis};
pub use sources::{BalanceSource, IndexerPositionSource, PositionSource, RpcBalanceSource};
