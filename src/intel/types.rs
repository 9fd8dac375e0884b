//! Intelligence snapshot types

use crate::config::AgentId;
use crate::contracts::Resource;
use crate::numeric::{lenient, safe_u256, ERROR_SENTINEL};
use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// A fetched token balance, or the marker that the fetch failed.
///
/// A failed fetch is not the same as a zero balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Balance {
    Amount(U256),
    Error,
}

impl Balance {
    /// Parse an upstream value, where `"Error"` marks a failed fetch
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim() == ERROR_SENTINEL {
            Balance::Error
        } else {
            Balance::Amount(safe_u256(Some(raw), U256::ZERO))
        }
    }

    pub fn amount(&self) -> Option<U256> {
        match self {
            Balance::Amount(value) => Some(*value),
            Balance::Error => None,
        }
    }

    /// Non-zero, successfully fetched balance
    pub fn is_positive(&self) -> bool {
        self.amount().is_some_and(|v| !v.is_zero())
    }
}

impl From<U256> for Balance {
    fn from(value: U256) -> Self {
        Balance::Amount(value)
    }
}

impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Balance::Amount(value) => serializer.collect_str(value),
            Balance::Error => serializer.serialize_str(ERROR_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Balance::from_raw(&raw))
    }
}

/// Per-resource balances of one agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceBalances(BTreeMap<Resource, Balance>);

impl ResourceBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, resource: Resource, balance: Balance) {
        self.0.insert(resource, balance);
    }

    pub fn get(&self, resource: Resource) -> Option<Balance> {
        self.0.get(&resource).copied()
    }

    /// Whether the agent holds a non-zero amount of `resource`
    pub fn holds(&self, resource: Resource) -> bool {
        self.get(resource).is_some_and(|b| b.is_positive())
    }

    /// Successfully fetched balances only
    pub fn amounts(&self) -> impl Iterator<Item = (Resource, U256)> + '_ {
        self.0
            .iter()
            .filter_map(|(resource, balance)| balance.amount().map(|v| (*resource, v)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, Balance)> + '_ {
        self.0.iter().map(|(r, b)| (*r, *b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when there are entries and every one of them failed to fetch
    pub fn all_failed(&self) -> bool {
        !self.0.is_empty() && self.0.values().all(|b| *b == Balance::Error)
    }
}

impl FromIterator<(Resource, Balance)> for ResourceBalances {
    fn from_iter<I: IntoIterator<Item = (Resource, Balance)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Liquidity an agent provides to one trading pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityPosition {
    pub id: String,
    pub agent: Address,
    pub pair: Address,
    #[serde(with = "lenient")]
    pub liquidity: U256,
    #[serde(default)]
    pub deposits_token0: Option<String>,
    #[serde(default)]
    pub deposits_token1: Option<String>,
    #[serde(default)]
    pub withdrawals_token0: Option<String>,
    #[serde(default)]
    pub withdrawals_token1: Option<String>,
    #[serde(default)]
    pub usd_value: Option<String>,
    #[serde(default)]
    pub apy_earned: Option<String>,
}

/// Tokens an agent has staked in one reactor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakePosition {
    pub id: String,
    pub agent: Address,
    pub reactor: Address,
    #[serde(with = "lenient")]
    pub staked_amount: U256,
    #[serde(with = "lenient", default)]
    pub rewards: U256,
    #[serde(with = "lenient", default)]
    pub penalty_end_time: U256,
    #[serde(with = "lenient", default)]
    pub reward_per_token_paid: U256,
}

/// Snapshot of everything known about one competing agent.
///
/// Built fresh on every gathering pass and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentIntelligence {
    pub agent_id: AgentId,
    pub address: Address,
    pub target_balance: Balance,
    pub balances: ResourceBalances,
    #[serde(default)]
    pub liquidity_positions: Vec<LiquidityPosition>,
    #[serde(default)]
    pub stake_positions: Vec<StakePosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}
