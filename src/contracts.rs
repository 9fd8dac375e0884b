//! Contract registry
//!
//! Single source of truth for what every configured address *is*: a core
//! contract, a game resource token, a trading pair, a reactor, or an agent
//! wallet. The registry is built once from configuration as a reverse index so
//! classifiers can answer membership questions without scanning the config.

use crate::config::{AgentConfig, ContractsConfig};
use crate::{Error, Result};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Game resource tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    WattDollar,
    Carbon,
    Neodymium,
    Graphite,
    Graphene,
    Dysprosium,
    Yttrium,
    Helium3,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::WattDollar,
        Resource::Carbon,
        Resource::Neodymium,
        Resource::Graphite,
        Resource::Graphene,
        Resource::Dysprosium,
        Resource::Yttrium,
        Resource::Helium3,
    ];

    /// The resource whose accumulation decides the game
    pub const TARGET: Resource = Resource::Helium3;

    /// Configuration key (camelCase, as used in contract config files)
    pub fn key(&self) -> &'static str {
        match self {
            Resource::WattDollar => "wattDollar",
            Resource::Carbon => "carbon",
            Resource::Neodymium => "neodymium",
            Resource::Graphite => "graphite",
            Resource::Graphene => "graphene",
            Resource::Dysprosium => "dysprosium",
            Resource::Yttrium => "yttrium",
            Resource::Helium3 => "helium3",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Resource::WattDollar => "WattDollar",
            Resource::Carbon => "Carbon",
            Resource::Neodymium => "Neodymium",
            Resource::Graphite => "Graphite",
            Resource::Graphene => "Graphene",
            Resource::Dysprosium => "Dysprosium",
            Resource::Yttrium => "Yttrium",
            Resource::Helium3 => "He3",
        }
    }

    /// Production path this resource belongs to, if any
    pub fn path(&self) -> Option<ProductionPath> {
        match self {
            Resource::Carbon | Resource::Graphite | Resource::Graphene => {
                Some(ProductionPath::Graphene)
            }
            Resource::Neodymium | Resource::Dysprosium | Resource::Yttrium => {
                Some(ProductionPath::Yttrium)
            }
            Resource::WattDollar | Resource::Helium3 => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One of the two mutually exclusive resource-conversion chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionPath {
    Graphene,
    Yttrium,
}

impl ProductionPath {
    pub fn name(&self) -> &'static str {
        match self {
            ProductionPath::Graphene => "Graphene",
            ProductionPath::Yttrium => "Yttrium",
        }
    }

    /// Resources of this path ordered base, intermediate, advanced
    pub fn resources(&self) -> [Resource; 3] {
        match self {
            ProductionPath::Graphene => [Resource::Carbon, Resource::Graphite, Resource::Graphene],
            ProductionPath::Yttrium => [
                Resource::Neodymium,
                Resource::Dysprosium,
                Resource::Yttrium,
            ],
        }
    }

    pub fn advanced_resource(&self) -> Resource {
        self.resources()[2]
    }

    pub fn other(&self) -> ProductionPath {
        match self {
            ProductionPath::Graphene => ProductionPath::Yttrium,
            ProductionPath::Yttrium => ProductionPath::Graphene,
        }
    }
}

/// Resource tier within a production path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Base,
    Intermediate,
    Advanced,
}

/// Trading pairs and the reactors that stake their LP tokens.
///
/// `Helium3Stake` only exists as a reactor: it stakes He3 directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Market {
    WattDollarCarbon,
    WattDollarNeodymium,
    CarbonGraphite,
    NeodymiumDysprosium,
    GraphiteGraphene,
    DysprosiumYttrium,
    Helium3WattDollar,
    Helium3Stake,
}

impl Market {
    pub const ALL: [Market; 8] = [
        Market::WattDollarCarbon,
        Market::WattDollarNeodymium,
        Market::CarbonGraphite,
        Market::NeodymiumDysprosium,
        Market::GraphiteGraphene,
        Market::DysprosiumYttrium,
        Market::Helium3WattDollar,
        Market::Helium3Stake,
    ];

    /// Inverse of [`Market::key`]
    pub fn from_key(key: &str) -> Option<Market> {
        Market::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Market::WattDollarCarbon => "wattDollarCarbon",
            Market::WattDollarNeodymium => "wattDollarNeodymium",
            Market::CarbonGraphite => "carbonGraphite",
            Market::NeodymiumDysprosium => "neodymiumDysprosium",
            Market::GraphiteGraphene => "graphiteGraphene",
            Market::DysprosiumYttrium => "dysprosiumYttrium",
            Market::Helium3WattDollar => "helium3WattDollar",
            Market::Helium3Stake => "helium3Stake",
        }
    }

    pub fn path(&self) -> Option<ProductionPath> {
        match self {
            Market::WattDollarCarbon | Market::CarbonGraphite | Market::GraphiteGraphene => {
                Some(ProductionPath::Graphene)
            }
            Market::WattDollarNeodymium
            | Market::NeodymiumDysprosium
            | Market::DysprosiumYttrium => Some(ProductionPath::Yttrium),
            Market::Helium3WattDollar | Market::Helium3Stake => None,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Market::WattDollarCarbon | Market::WattDollarNeodymium => Some(Tier::Base),
            Market::CarbonGraphite | Market::NeodymiumDysprosium => Some(Tier::Intermediate),
            Market::GraphiteGraphene | Market::DysprosiumYttrium => Some(Tier::Advanced),
            Market::Helium3WattDollar | Market::Helium3Stake => None,
        }
    }

    pub fn is_single_stake(&self) -> bool {
        matches!(self, Market::Helium3Stake)
    }
}

/// Contract categories an address can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Core,
    Resources,
    TradingPairs,
    Reactors,
    Agents,
}

/// Reverse index from address to (category, subtype)
#[derive(Debug, Default)]
pub struct ContractRegistry {
    entries: HashMap<Address, Vec<(Category, String)>>,
    resources: HashMap<Resource, Address>,
}

impl ContractRegistry {
    /// Build the registry from contract and agent configuration
    pub fn new(contracts: &ContractsConfig, agents: &BTreeMap<String, AgentConfig>) -> Self {
        let mut registry = Self::default();

        for (name, address) in &contracts.core {
            registry.index(*address, Category::Core, name.clone());
        }
        for (resource, address) in &contracts.resources {
            registry.index(*address, Category::Resources, resource.key().to_string());
            registry.resources.insert(*resource, *address);
        }
        for (market, address) in &contracts.trading_pairs {
            registry.index(*address, Category::TradingPairs, market.key().to_string());
        }
        for (market, address) in &contracts.reactors {
            registry.index(*address, Category::Reactors, market.key().to_string());
        }
        for (agent_id, agent) in agents {
            registry.index(agent.address, Category::Agents, agent_id.clone());
        }

        tracing::debug!(
            addresses = registry.entries.len(),
            resources = registry.resources.len(),
            pairs = contracts.trading_pairs.len(),
            reactors = contracts.reactors.len(),
            "Built contract registry"
        );

        registry
    }

    fn index(&mut self, address: Address, category: Category, subtype: String) {
        self.entries
            .entry(address)
            .or_default()
            .push((category, subtype));
    }

    /// Whether `address` is registered under `category` (and `subtype`, when given)
    pub fn belongs_to_category(
        &self,
        address: &Address,
        category: Category,
        subtype: Option<&str>,
    ) -> bool {
        self.entries.get(address).is_some_and(|entries| {
            entries
                .iter()
                .any(|(c, s)| *c == category && subtype.is_none_or(|want| want == s.as_str()))
        })
    }

    /// Subtype of `address` within `category`, if registered there
    pub fn category_of(&self, address: &Address, category: Category) -> Option<&str> {
        self.entries.get(address).and_then(|entries| {
            entries
                .iter()
                .find(|(c, _)| *c == category)
                .map(|(_, s)| s.as_str())
        })
    }

    pub fn resource_address(&self, resource: Resource) -> Option<Address> {
        self.resources.get(&resource).copied()
    }

    /// Resource token addresses in a stable order
    pub fn resource_addresses(&self) -> Vec<(Resource, Address)> {
        Resource::ALL
            .iter()
            .filter_map(|r| self.resource_address(*r).map(|a| (*r, a)))
            .collect()
    }

    /// Address of the target resource token.
    ///
    /// A missing entry is a deployment misconfiguration and is reported to the caller.
    pub fn target_resource_address(&self) -> Result<Address> {
        self.resource_address(Resource::TARGET).ok_or_else(|| {
            Error::Config(format!(
                "target resource '{}' has no configured address",
                Resource::TARGET.key()
            ))
        })
    }

    /// Market of a trading pair address, resolved through the category index
    pub fn market_of_pair(&self, pair: &Address) -> Option<Market> {
        self.category_of(pair, Category::TradingPairs)
            .and_then(Market::from_key)
    }

    /// Market staked by a reactor address, resolved through the category index
    pub fn market_of_reactor(&self, reactor: &Address) -> Option<Market> {
        self.category_of(reactor, Category::Reactors)
            .and_then(Market::from_key)
    }
}
