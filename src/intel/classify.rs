//! Heuristic classifiers over one agent's balances and positions
//!
//! All functions here are pure. Addresses are resolved through the
//! [`ContractRegistry`]; positions on unknown contracts simply do not count.

use super::labels::{LiquidityStrategy, PathPreference, ResourceFocus, StakingStrategy};
use super::types::{LiquidityPosition, ResourceBalances, StakePosition};
use crate::contracts::{ContractRegistry, ProductionPath, Resource, Tier};
use crate::error::ClassificationError;

/// Score weights: committed capital says more about intent than idle balances
const HELD_RESOURCE_WEIGHT: u32 = 1;
const LIQUIDITY_WEIGHT: u32 = 2;
const STAKE_WEIGHT: u32 = 3;

/// Label the resource an agent holds the most of.
///
/// Equal balances are broken by resource key in lexical order.
pub fn classify_resource_focus(
    balances: &ResourceBalances,
) -> Result<ResourceFocus, ClassificationError> {
    if balances.all_failed() {
        return Err(ClassificationError::BalanceUnavailable("every resource"));
    }

    let top = balances
        .amounts()
        .filter(|(_, amount)| !amount.is_zero())
        .max_by(|(ra, va), (rb, vb)| va.cmp(vb).then_with(|| rb.key().cmp(ra.key())));

    let Some((top, _)) = top else {
        return Ok(ResourceFocus::Unknown);
    };

    Ok(match top {
        Resource::Helium3 => ResourceFocus::He3Accumulation,
        Resource::Graphene | Resource::Yttrium => ResourceFocus::PathFocus(top),
        Resource::Carbon | Resource::Neodymium => ResourceFocus::Stockpiling(top),
        Resource::WattDollar | Resource::Graphite | Resource::Dysprosium => {
            ResourceFocus::Balanced
        }
    })
}

/// Commitment score per production path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathScores {
    pub graphene: u32,
    pub yttrium: u32,
}

impl PathScores {
    fn add(&mut self, path: ProductionPath, weight: u32) {
        match path {
            ProductionPath::Graphene => self.graphene += weight,
            ProductionPath::Yttrium => self.yttrium += weight,
        }
    }
}

/// Score both paths from held resources, liquidity and stakes
pub fn score_paths(
    registry: &ContractRegistry,
    balances: &ResourceBalances,
    liquidity: &[LiquidityPosition],
    stakes: &[StakePosition],
) -> PathScores {
    let mut scores = PathScores::default();

    for path in [ProductionPath::Graphene, ProductionPath::Yttrium] {
        for resource in path.resources() {
            if balances.holds(resource) {
                scores.add(path, HELD_RESOURCE_WEIGHT);
            }
        }
    }

    for position in liquidity {
        if let Some(path) = registry
            .market_of_pair(&position.pair)
            .and_then(|m| m.path())
        {
            scores.add(path, LIQUIDITY_WEIGHT);
        }
    }

    for position in stakes {
        if let Some(path) = registry
            .market_of_reactor(&position.reactor)
            .and_then(|m| m.path())
        {
            scores.add(path, STAKE_WEIGHT);
        }
    }

    scores
}

/// Turn path scores into a preference label
pub fn preference_from_scores(scores: PathScores) -> PathPreference {
    let PathScores { graphene, yttrium } = scores;

    if graphene > yttrium * 2 {
        PathPreference::Strong(ProductionPath::Graphene)
    } else if graphene > yttrium {
        PathPreference::Moderate(ProductionPath::Graphene)
    } else if yttrium > graphene * 2 {
        PathPreference::Strong(ProductionPath::Yttrium)
    } else if yttrium > graphene {
        PathPreference::Moderate(ProductionPath::Yttrium)
    } else {
        PathPreference::Balanced
    }
}

pub fn classify_path_preference(
    registry: &ContractRegistry,
    balances: &ResourceBalances,
    liquidity: &[LiquidityPosition],
    stakes: &[StakePosition],
) -> PathPreference {
    preference_from_scores(score_paths(registry, balances, liquidity, stakes))
}

/// Position counts per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub base: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl TierCounts {
    fn add(&mut self, tier: Tier) {
        match tier {
            Tier::Base => self.base += 1,
            Tier::Intermediate => self.intermediate += 1,
            Tier::Advanced => self.advanced += 1,
        }
    }

    /// Focus tier, checked in order: advanced only when strictly ahead of both
    /// others, then intermediate ahead of base, then any base position.
    ///
    /// `None` only when no position has a tier.
    pub fn dominant(&self) -> Option<Tier> {
        let TierCounts {
            base,
            intermediate,
            advanced,
        } = *self;

        if advanced > intermediate && advanced > base {
            Some(Tier::Advanced)
        } else if intermediate > base {
            Some(Tier::Intermediate)
        } else if base > 0 {
            Some(Tier::Base)
        } else {
            None
        }
    }
}

pub fn classify_liquidity_strategy(
    registry: &ContractRegistry,
    liquidity: &[LiquidityPosition],
) -> LiquidityStrategy {
    if liquidity.is_empty() {
        return LiquidityStrategy::NoPositions;
    }

    let mut counts = TierCounts::default();
    for position in liquidity {
        if let Some(tier) = registry
            .market_of_pair(&position.pair)
            .and_then(|m| m.tier())
        {
            counts.add(tier);
        }
    }

    match counts.dominant() {
        Some(tier) => LiquidityStrategy::TierFocus(tier),
        None => LiquidityStrategy::Diversified,
    }
}

pub fn classify_staking_strategy(
    registry: &ContractRegistry,
    stakes: &[StakePosition],
) -> StakingStrategy {
    if stakes.is_empty() {
        return StakingStrategy::NoPositions;
    }

    let mut counts = TierCounts::default();
    for position in stakes {
        match registry.market_of_reactor(&position.reactor) {
            Some(market) if market.is_single_stake() => return StakingStrategy::He3SingleStake,
            Some(market) => {
                if let Some(tier) = market.tier() {
                    counts.add(tier);
                }
            }
            None => {}
        }
    }

    match counts.dominant() {
        Some(tier) => StakingStrategy::TierFocus(tier),
        None => StakingStrategy::Diversified,
    }
}
