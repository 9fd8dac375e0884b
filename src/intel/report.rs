//! Plain-text competitor briefing for agent prompts

use super::types::{AgentIntelligence, Balance};
use super::StrategicAnalysis;
use crate::config::AgentId;
use crate::numeric::format_units;
use std::collections::BTreeMap;

/// Every game resource uses 18 decimals
const RESOURCE_DECIMALS: u32 = 18;

fn format_balance(balance: Balance) -> String {
    match balance {
        Balance::Amount(value) => format_units(value, RESOURCE_DECIMALS),
        Balance::Error => "unavailable".to_string(),
    }
}

/// Render one section per competitor, ordered by agent id.
///
/// Agents without an analysis entry are reported with "Analysis Error" labels.
pub fn render_briefing(
    intel: &BTreeMap<AgentId, AgentIntelligence>,
    analyses: &BTreeMap<AgentId, StrategicAnalysis>,
) -> String {
    let mut lines = vec![format!("=== Competitor Briefing ({} agents) ===", intel.len())];

    if intel.is_empty() {
        lines.push("No competitors found.".to_string());
    }

    for (agent_id, snapshot) in intel {
        lines.push(String::new());
        lines.push(format!("## {} ({})", agent_id, snapshot.address));

        if let Some(error) = &snapshot.error {
            lines.push(format!("Data unavailable: {}", error));
            continue;
        }

        lines.push(format!("He3: {}", format_balance(snapshot.target_balance)));

        let held: Vec<String> = snapshot
            .balances
            .iter()
            .filter(|(_, balance)| *balance == Balance::Error || balance.is_positive())
            .map(|(resource, balance)| {
                format!("{} {}", resource.display_name(), format_balance(balance))
            })
            .collect();
        lines.push(format!(
            "Resources: {}",
            if held.is_empty() {
                "none".to_string()
            } else {
                held.join(", ")
            }
        ));
        lines.push(format!(
            "Positions: {} liquidity, {} staked",
            snapshot.liquidity_positions.len(),
            snapshot.stake_positions.len()
        ));

        let failed;
        let analysis = match analyses.get(agent_id) {
            Some(analysis) => analysis,
            None => {
                failed = StrategicAnalysis::failed();
                &failed
            }
        };

        lines.push(format!("Resource focus: {}", analysis.resource_focus));
        lines.push(format!("Path preference: {}", analysis.path_preference));
        lines.push(format!("Liquidity strategy: {}", analysis.liquidity_strategy));
        lines.push(format!("Staking strategy: {}", analysis.staking_strategy));
        lines.push(format!("Overall strategy: {}", analysis.overall_strategy));

        if !analysis.counter_strategies.is_empty() {
            lines.push("Counter-strategies:".to_string());
            for (i, suggestion) in analysis.counter_strategies.iter().enumerate() {
                lines.push(format!("  {}. {}", i + 1, suggestion));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{ProductionPath, Resource};
    use crate::intel::{
        GameStage, LiquidityStrategy, PathPreference, ResourceBalances, ResourceFocus,
        StakingStrategy,
    };
    use alloy::primitives::{Address, U256};
    use chrono::Utc;

    const ONE_TOKEN: u64 = 1_000_000_000_000_000_000;

    fn snapshot(agent_id: &str, balances: ResourceBalances, error: Option<&str>) -> AgentIntelligence {
        AgentIntelligence {
            agent_id: agent_id.to_string(),
            address: Address::ZERO,
            target_balance: balances.get(Resource::Helium3).unwrap_or(Balance::Error),
            balances,
            liquidity_positions: Vec::new(),
            stake_positions: Vec::new(),
            error: error.map(str::to_string),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_briefing_sections() {
        let balances: ResourceBalances = [
            (Resource::Helium3, Balance::Amount(U256::from(ONE_TOKEN * 3 / 2))),
            (Resource::Graphene, Balance::Amount(U256::from(ONE_TOKEN * 5))),
            (Resource::Carbon, Balance::Amount(U256::ZERO)),
            (Resource::WattDollar, Balance::Error),
        ]
        .into_iter()
        .collect();

        let mut intel = BTreeMap::new();
        intel.insert("zeta".to_string(), snapshot("zeta", balances, None));
        intel.insert(
            "alpha".to_string(),
            snapshot("alpha", ResourceBalances::new(), Some("stake positions: timeout")),
        );

        let mut analyses = BTreeMap::new();
        analyses.insert(
            "zeta".to_string(),
            StrategicAnalysis {
                resource_focus: ResourceFocus::PathFocus(Resource::Graphene),
                path_preference: PathPreference::Strong(ProductionPath::Graphene),
                liquidity_strategy: LiquidityStrategy::NoPositions,
                staking_strategy: StakingStrategy::NoPositions,
                overall_strategy: GameStage::MidGamePathFocus(ProductionPath::Graphene),
                counter_strategies: vec!["Pivot".to_string(), "Advance".to_string()],
            },
        );
        analyses.insert("alpha".to_string(), StrategicAnalysis::failed());

        let briefing = render_briefing(&intel, &analyses);

        assert!(briefing.starts_with("=== Competitor Briefing (2 agents) ==="));
        // Sorted by agent id
        assert!(briefing.find("## alpha").unwrap() < briefing.find("## zeta").unwrap());
        assert!(briefing.contains("Data unavailable: stake positions: timeout"));
        assert!(briefing.contains("He3: 1.5"));
        assert!(briefing.contains("Resources: WattDollar unavailable, Graphene 5, He3 1.5"));
        assert!(briefing.contains("Overall strategy: Mid Game - Graphene Path Focus"));
        assert!(briefing.contains("  2. Advance"));
    }

    #[test]
    fn test_briefing_without_analysis_or_agents() {
        assert!(render_briefing(&BTreeMap::new(), &BTreeMap::new()).contains("No competitors found."));

        let mut intel = BTreeMap::new();
        intel.insert("solo".to_string(), snapshot("solo", ResourceBalances::new(), None));
        let briefing = render_briefing(&intel, &BTreeMap::new());

        assert!(briefing.contains("He3: unavailable"));
        assert!(briefing.contains("Resources: none"));
        assert!(briefing.contains("Resource focus: Analysis Error"));
        assert!(!briefing.contains("Counter-strategies"));
    }
}
