//! Agent roster
//!
//! Holds every competing agent's wallet address and, when configured, its
//! signing key. The roster is built once from [`Config`] and passed to whatever
//! needs to know who the agents are; there is no process-wide "current agent".
//!
//! SECURITY: private keys are only held inside alloy's `PrivateKeySigner`.
//! They are never serialized and never logged.

use crate::config::{AgentConfig, AgentId, Config};
use crate::{Error, Result};
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use secrecy::ExposeSecret;
use std::collections::BTreeMap;

/// Signing credentials for one agent
pub struct AgentWallet {
    signer: PrivateKeySigner,
}

impl AgentWallet {
    /// Parse a hex-encoded private key (with or without 0x prefix)
    pub fn from_hex(key_hex: &str) -> Result<Self> {
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| Error::Wallet(format!("Invalid private key: {}", e)))?;

        Ok(Self { signer })
    }

    /// Address derived from the key
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

// Implement Debug manually to avoid exposing the signer
impl std::fmt::Debug for AgentWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentWallet")
            .field("address", &self.address())
            .field("signer", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug)]
struct RosterEntry {
    address: Address,
    wallet: Option<AgentWallet>,
}

/// All configured agents, keyed by id
#[derive(Debug, Default)]
pub struct AgentRoster {
    agents: BTreeMap<AgentId, RosterEntry>,
}

impl AgentRoster {
    /// Build the roster, checking every configured key against its address
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_agents(&config.agents)
    }

    pub fn from_agents(agents: &BTreeMap<AgentId, AgentConfig>) -> Result<Self> {
        let mut roster = Self::default();

        for (agent_id, agent) in agents {
            let wallet = match &agent.private_key {
                Some(key) => {
                    let wallet = AgentWallet::from_hex(key.expose_secret()).map_err(|e| {
                        Error::Config(format!("agent '{}': {}", agent_id, e))
                    })?;
                    if wallet.address() != agent.address {
                        return Err(Error::Config(format!(
                            "agent '{}': private key belongs to {}, not the configured address {}",
                            agent_id,
                            wallet.address(),
                            agent.address
                        )));
                    }
                    Some(wallet)
                }
                None => None,
            };

            roster.agents.insert(
                agent_id.clone(),
                RosterEntry {
                    address: agent.address,
                    wallet,
                },
            );
        }

        tracing::debug!(agents = roster.agents.len(), "Loaded agent roster");
        Ok(roster)
    }

    /// Roster from bare addresses (no credentials)
    pub fn from_addresses(addresses: impl IntoIterator<Item = (AgentId, Address)>) -> Self {
        let agents = addresses
            .into_iter()
            .map(|(id, address)| {
                (
                    id,
                    RosterEntry {
                        address,
                        wallet: None,
                    },
                )
            })
            .collect();
        Self { agents }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn contains(&self, agent_id: &str) -> bool {
        self.agents.contains_key(agent_id)
    }

    pub fn address_of(&self, agent_id: &str) -> Option<Address> {
        self.agents.get(agent_id).map(|entry| entry.address)
    }

    pub fn wallet(&self, agent_id: &str) -> Option<&AgentWallet> {
        self.agents
            .get(agent_id)
            .and_then(|entry| entry.wallet.as_ref())
    }

    /// Every agent as (id, address), ordered by id
    pub fn all(&self) -> Vec<(AgentId, Address)> {
        self.agents
            .iter()
            .map(|(id, entry)| (id.clone(), entry.address))
            .collect()
    }

    /// Every agent except `viewer`
    pub fn competitors_of(&self, viewer: &str) -> Vec<(AgentId, Address)> {
        self.agents
            .iter()
            .filter(|(id, _)| id.as_str() != viewer)
            .map(|(id, entry)| (id.clone(), entry.address))
            .collect()
    }
}
