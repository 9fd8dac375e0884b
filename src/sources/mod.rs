//! Data sources the intelligence service reads from
//!
//! The service only depends on these traits. Production implementations talk
//! to the chain over JSON-RPC and to the position indexer over GraphQL; tests
//! plug in in-memory fakes.

mod indexer;
mod rpc;

use crate::intel::{LiquidityPosition, StakePosition};
use crate::Result;
use alloy::primitives::{Address, U256};
use async_trait::async_trait;

pub use indexer::IndexerPositionSource;
pub use rpc::RpcBalanceSource;

/// Reads token balances
#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Raw balance of `token` held by `owner`
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256>;
}

/// Reads liquidity and stake positions
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn liquidity_positions(&self, owner: Address) -> Result<Vec<LiquidityPosition>>;

    async fn stake_positions(&self, owner: Address) -> Result<Vec<StakePosition>>;
}
