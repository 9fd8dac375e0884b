//! Game-stage classification and counter-strategy suggestions

use super::labels::{GameStage, LiquidityStrategy, PathPreference};
use super::types::{Balance, LiquidityPosition, ResourceBalances};
use crate::config::GameThresholds;
use crate::contracts::{ProductionPath, Resource, Tier};
use crate::error::ClassificationError;
use alloy::primitives::U256;

fn target_amount(target_balance: &Balance) -> Result<U256, ClassificationError> {
    target_balance
        .amount()
        .ok_or(ClassificationError::BalanceUnavailable(Resource::TARGET.key()))
}

/// Place an agent in the game by its He3 balance and what it produces.
///
/// The first matching rule wins, so the stage never moves backward as the He3
/// balance grows.
pub fn classify_game_stage(
    target_balance: &Balance,
    balances: &ResourceBalances,
    liquidity: &[LiquidityPosition],
    thresholds: &GameThresholds,
) -> Result<GameStage, ClassificationError> {
    let target = target_amount(target_balance)?;

    if target > thresholds.end_game {
        return Ok(GameStage::EndGame);
    }
    if target > thresholds.late_game {
        return Ok(GameStage::LateGame);
    }

    let graphene = balances.holds(ProductionPath::Graphene.advanced_resource());
    let yttrium = balances.holds(ProductionPath::Yttrium.advanced_resource());

    Ok(match (graphene, yttrium) {
        (true, true) => GameStage::MidGameDualPath,
        (true, false) => GameStage::MidGamePathFocus(ProductionPath::Graphene),
        (false, true) => GameStage::MidGamePathFocus(ProductionPath::Yttrium),
        (false, false) if !liquidity.is_empty() => GameStage::EarlyGameConversionSetup,
        (false, false) => GameStage::EarlyGameAccumulation,
    })
}

/// Suggest how to play against an agent, highest priority first.
///
/// End and late game only get stage advice. Earlier stages get path advice
/// followed by liquidity advice. Sub-results that failed contribute nothing.
pub fn suggest_counter_strategies(
    target_balance: &Balance,
    path_preference: PathPreference,
    liquidity_strategy: LiquidityStrategy,
    thresholds: &GameThresholds,
) -> Result<Vec<String>, ClassificationError> {
    let target = target_amount(target_balance)?;
    let mut suggestions = Vec::new();

    if target > thresholds.end_game {
        suggestions.push(
            "Competitor is close to victory: accelerate He3 production immediately".to_string(),
        );
        suggestions.push(
            "Focus exclusively on single-sided He3 staking to maximize He3 output".to_string(),
        );
    } else if target > thresholds.late_game {
        suggestions.push(
            "Optimize your production path to convert resources into He3 faster".to_string(),
        );
        suggestions.push(
            "Balance He3 between single-sided staking and the He3/wattDollar liquidity pair"
                .to_string(),
        );
    } else {
        if let Some(path) = path_preference.leaning() {
            suggestions.push(format!(
                "Competitor favors the {} path: pivot to {} path resources to avoid congestion",
                path.name(),
                path.other().name()
            ));
        } else if path_preference == PathPreference::Balanced {
            suggestions.push(
                "Competitor splits effort across both paths: specialize in one path to out-produce them"
                    .to_string(),
            );
        }

        match liquidity_strategy {
            LiquidityStrategy::TierFocus(Tier::Base) => suggestions.push(
                "Competitor provides base-tier liquidity: advance to intermediate and advanced liquidity pairs"
                    .to_string(),
            ),
            LiquidityStrategy::TierFocus(Tier::Advanced) => suggestions.push(
                "Competitor holds advanced-tier liquidity: secure your base resource supply chain"
                    .to_string(),
            ),
            _ => {}
        }
    }

    Ok(suggestions)
}
