//! Competitive intelligence
//!
//! Gathers balance and position snapshots for competing agents, derives
//! strategy labels from them and ranks agents by He3 holdings.
//!
//! Gathering is concurrent and fault-isolated per agent. Classification is
//! pure; a sub-analysis that cannot be computed is reported as
//! "Analysis Error" without affecting the others.

mod classify;
mod labels;
mod ranking;
mod report;
mod strategy;
mod types;

pub use classify::{
    classify_liquidity_strategy, classify_path_preference, classify_resource_focus,
    classify_staking_strategy, preference_from_scores, score_paths, PathScores, TierCounts,
};
pub use labels::{GameStage, LiquidityStrategy, PathPreference, ResourceFocus, StakingStrategy};
pub use ranking::{rank_by_balance, RankedAgent};
pub use report::render_briefing;
pub use strategy::{classify_game_stage, suggest_counter_strategies};
pub use types::{AgentIntelligence, Balance, LiquidityPosition, ResourceBalances, StakePosition};

use crate::agents::AgentRoster;
use crate::config::{AgentId, GameThresholds};
use crate::contracts::{ContractRegistry, Resource};
use crate::error::ClassificationError;
use crate::sources::{BalanceSource, PositionSource};
use crate::{Error, Result};
use alloy::primitives::Address;
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Strategy labels derived from one [`AgentIntelligence`] snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicAnalysis {
    pub resource_focus: ResourceFocus,
    pub path_preference: PathPreference,
    pub liquidity_strategy: LiquidityStrategy,
    pub staking_strategy: StakingStrategy,
    pub overall_strategy: GameStage,
    pub counter_strategies: Vec<String>,
}

impl StrategicAnalysis {
    /// Record for an agent whose data could not be gathered
    pub fn failed() -> Self {
        Self {
            resource_focus: ResourceFocus::AnalysisError,
            path_preference: PathPreference::AnalysisError,
            liquidity_strategy: LiquidityStrategy::AnalysisError,
            staking_strategy: StakingStrategy::AnalysisError,
            overall_strategy: GameStage::AnalysisError,
            counter_strategies: Vec::new(),
        }
    }
}

fn isolate<T>(
    agent_id: &str,
    analysis: &str,
    result: std::result::Result<T, ClassificationError>,
    fallback: T,
) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(agent = %agent_id, analysis, error = %e, "Sub-analysis failed");
        fallback
    })
}

/// Run every classifier over one snapshot
pub fn analyze_agent(
    registry: &ContractRegistry,
    thresholds: &GameThresholds,
    intel: &AgentIntelligence,
) -> StrategicAnalysis {
    let id = intel.agent_id.as_str();

    if let Some(error) = &intel.error {
        tracing::warn!(agent = %id, error = %error, "Skipping analysis of incomplete snapshot");
        return StrategicAnalysis::failed();
    }

    let resource_focus = isolate(
        id,
        "resource focus",
        classify_resource_focus(&intel.balances),
        ResourceFocus::AnalysisError,
    );
    let path_preference = classify_path_preference(
        registry,
        &intel.balances,
        &intel.liquidity_positions,
        &intel.stake_positions,
    );
    let liquidity_strategy = classify_liquidity_strategy(registry, &intel.liquidity_positions);
    let staking_strategy = classify_staking_strategy(registry, &intel.stake_positions);
    let overall_strategy = isolate(
        id,
        "game stage",
        classify_game_stage(
            &intel.target_balance,
            &intel.balances,
            &intel.liquidity_positions,
            thresholds,
        ),
        GameStage::AnalysisError,
    );
    let counter_strategies = isolate(
        id,
        "counter strategies",
        suggest_counter_strategies(
            &intel.target_balance,
            path_preference,
            liquidity_strategy,
            thresholds,
        ),
        Vec::new(),
    );

    StrategicAnalysis {
        resource_focus,
        path_preference,
        liquidity_strategy,
        staking_strategy,
        overall_strategy,
        counter_strategies,
    }
}

/// Intelligence service over injected data sources
pub struct CompetitiveIntel {
    registry: Arc<ContractRegistry>,
    roster: Arc<AgentRoster>,
    balances: Arc<dyn BalanceSource>,
    positions: Arc<dyn PositionSource>,
    thresholds: GameThresholds,
}

impl CompetitiveIntel {
    pub fn new(
        registry: Arc<ContractRegistry>,
        roster: Arc<AgentRoster>,
        balances: Arc<dyn BalanceSource>,
        positions: Arc<dyn PositionSource>,
        thresholds: GameThresholds,
    ) -> Self {
        Self {
            registry,
            roster,
            balances,
            positions,
            thresholds,
        }
    }

    pub fn roster(&self) -> &AgentRoster {
        &self.roster
    }

    /// Snapshot every agent, or every agent except `viewer`.
    ///
    /// Fetch failures are recorded in the snapshot. Only a missing He3 address
    /// or an unknown viewer fails the call.
    pub async fn competitive_intelligence(
        &self,
        viewer: Option<&str>,
    ) -> Result<BTreeMap<AgentId, AgentIntelligence>> {
        self.registry.target_resource_address()?;

        let agents = match viewer {
            Some(viewer) if !self.roster.contains(viewer) => {
                return Err(Error::InvalidArgument(format!("Unknown agent: {}", viewer)));
            }
            Some(viewer) => self.roster.competitors_of(viewer),
            None => self.roster.all(),
        };

        tracing::info!(agents = agents.len(), "Gathering competitive intelligence");

        let resources = self.registry.resource_addresses();
        let snapshots = join_all(
            agents
                .into_iter()
                .map(|(agent_id, address)| self.gather_agent(agent_id, address, &resources)),
        )
        .await;

        Ok(snapshots
            .into_iter()
            .map(|snapshot| (snapshot.agent_id.clone(), snapshot))
            .collect())
    }

    async fn gather_agent(
        &self,
        agent_id: AgentId,
        address: Address,
        resources: &[(Resource, Address)],
    ) -> AgentIntelligence {
        let id = agent_id.as_str();

        let balance_fetches = join_all(resources.iter().map(|(resource, token)| async move {
            let balance = match self.balances.balance_of(*token, address).await {
                Ok(value) => Balance::Amount(value),
                Err(e) => {
                    tracing::warn!(agent = %id, resource = %resource.key(), error = %e, "Balance fetch failed");
                    Balance::Error
                }
            };
            (*resource, balance)
        }));

        let (balances, liquidity, stakes) = tokio::join!(
            balance_fetches,
            self.positions.liquidity_positions(address),
            self.positions.stake_positions(address),
        );

        let balances: ResourceBalances = balances.into_iter().collect();
        let target_balance = balances.get(Resource::TARGET).unwrap_or(Balance::Error);

        let mut errors = Vec::new();
        let liquidity_positions = liquidity.unwrap_or_else(|e| {
            errors.push(format!("liquidity positions: {}", e));
            Vec::new()
        });
        let stake_positions = stakes.unwrap_or_else(|e| {
            errors.push(format!("stake positions: {}", e));
            Vec::new()
        });

        let error = if errors.is_empty() {
            tracing::debug!(
                agent = %id,
                liquidity = liquidity_positions.len(),
                stakes = stake_positions.len(),
                "Gathered agent snapshot"
            );
            None
        } else {
            let error = errors.join("; ");
            tracing::warn!(agent = %id, error = %error, "Agent snapshot incomplete");
            Some(error)
        };

        AgentIntelligence {
            agent_id,
            address,
            target_balance,
            balances,
            liquidity_positions,
            stake_positions,
            error,
            fetched_at: Utc::now(),
        }
    }

    /// Derive strategy labels for every snapshot
    pub fn analyze_competitor_strategies(
        &self,
        intel: &BTreeMap<AgentId, AgentIntelligence>,
    ) -> BTreeMap<AgentId, StrategicAnalysis> {
        intel
            .iter()
            .map(|(agent_id, snapshot)| {
                (
                    agent_id.clone(),
                    analyze_agent(&self.registry, &self.thresholds, snapshot),
                )
            })
            .collect()
    }

    /// He3 leaderboard across the whole roster.
    ///
    /// Agents whose balance could not be fetched are missing from the result.
    pub async fn rank_agents_by_target(&self) -> Result<Vec<RankedAgent>> {
        let target = self.registry.target_resource_address()?;

        let fetched = join_all(self.roster.all().into_iter().map(|(agent_id, address)| async move {
            let balance = self.balances.balance_of(target, address).await;
            (agent_id, address, balance)
        }))
        .await;

        Ok(rank_by_balance(fetched))
    }
}
