//! Strategy labels
//!
//! Every classifier result is one variant of a closed enum. `Display` yields the
//! label text shown to agents and serialization uses the same text.

use crate::contracts::{ProductionPath, Resource, Tier};
use serde::{Serialize, Serializer};
use std::fmt;

const ANALYSIS_ERROR: &str = "Analysis Error";

/// What an agent is accumulating most of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFocus {
    He3Accumulation,
    PathFocus(Resource),
    Stockpiling(Resource),
    Balanced,
    Unknown,
    AnalysisError,
}

impl fmt::Display for ResourceFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceFocus::He3Accumulation => f.write_str("He3 Accumulation"),
            ResourceFocus::PathFocus(resource) => write!(f, "{} Path Focus", resource),
            ResourceFocus::Stockpiling(resource) => write!(f, "{} Stockpiling", resource),
            ResourceFocus::Balanced => f.write_str("Balanced Resource Approach"),
            ResourceFocus::Unknown => f.write_str("Unknown"),
            ResourceFocus::AnalysisError => f.write_str(ANALYSIS_ERROR),
        }
    }
}

/// Which production path an agent is committing to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPreference {
    Strong(ProductionPath),
    Moderate(ProductionPath),
    Balanced,
    AnalysisError,
}

impl PathPreference {
    /// The path this agent leans toward, if any
    pub fn leaning(&self) -> Option<ProductionPath> {
        match self {
            PathPreference::Strong(path) | PathPreference::Moderate(path) => Some(*path),
            PathPreference::Balanced | PathPreference::AnalysisError => None,
        }
    }
}

impl fmt::Display for PathPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPreference::Strong(path) => write!(f, "Strong {} Path Preference", path.name()),
            PathPreference::Moderate(path) => {
                write!(f, "Moderate {} Path Preference", path.name())
            }
            PathPreference::Balanced => f.write_str("Balanced Path Approach"),
            PathPreference::AnalysisError => f.write_str(ANALYSIS_ERROR),
        }
    }
}

fn tier_name(tier: Tier) -> &'static str {
    match tier {
        Tier::Base => "Base",
        Tier::Intermediate => "Intermediate",
        Tier::Advanced => "Advanced",
    }
}

/// Where an agent's liquidity sits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityStrategy {
    TierFocus(Tier),
    Diversified,
    NoPositions,
    AnalysisError,
}

impl fmt::Display for LiquidityStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiquidityStrategy::TierFocus(tier) => {
                write!(f, "{} Resource Liquidity Focus", tier_name(*tier))
            }
            LiquidityStrategy::Diversified => f.write_str("Diversified Liquidity Strategy"),
            LiquidityStrategy::NoPositions => f.write_str("No Liquidity Positions"),
            LiquidityStrategy::AnalysisError => f.write_str(ANALYSIS_ERROR),
        }
    }
}

/// Where an agent's stakes sit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakingStrategy {
    He3SingleStake,
    TierFocus(Tier),
    Diversified,
    NoPositions,
    AnalysisError,
}

impl fmt::Display for StakingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StakingStrategy::He3SingleStake => f.write_str("He3 Single Stake Focus"),
            StakingStrategy::TierFocus(tier) => {
                write!(f, "{} Resource Staking Focus", tier_name(*tier))
            }
            StakingStrategy::Diversified => f.write_str("Diversified Staking Strategy"),
            StakingStrategy::NoPositions => f.write_str("No Staking Positions"),
            StakingStrategy::AnalysisError => f.write_str(ANALYSIS_ERROR),
        }
    }
}

/// Overall game stage of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStage {
    EndGame,
    LateGame,
    MidGameDualPath,
    MidGamePathFocus(ProductionPath),
    EarlyGameConversionSetup,
    EarlyGameAccumulation,
    AnalysisError,
}

impl fmt::Display for GameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStage::EndGame => f.write_str("End Game - Final He3 Accumulation"),
            GameStage::LateGame => f.write_str("Late Game - He3 Acceleration"),
            GameStage::MidGameDualPath => f.write_str("Mid Game - Dual Path Production"),
            GameStage::MidGamePathFocus(path) => {
                write!(f, "Mid Game - {} Path Focus", path.name())
            }
            GameStage::EarlyGameConversionSetup => {
                f.write_str("Early Game - Resource Conversion Setup")
            }
            GameStage::EarlyGameAccumulation => f.write_str("Early Game - Resource Accumulation"),
            GameStage::AnalysisError => f.write_str(ANALYSIS_ERROR),
        }
    }
}

macro_rules! serialize_as_label {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )*
    };
}

serialize_as_label!(
    ResourceFocus,
    PathPreference,
    LiquidityStrategy,
    StakingStrategy,
    GameStage
);
