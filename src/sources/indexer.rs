//! Position indexer client
//!
//! Queries liquidity and stake positions from the game's GraphQL indexer.
//! Field aliases in the queries map indexer columns straight onto
//! [`LiquidityPosition`] and [`StakePosition`].

use super::PositionSource;
use crate::intel::{LiquidityPosition, StakePosition};
use crate::{Error, Result};
use alloy::primitives::Address;
use async_trait::async_trait;
use graphql_client::{QueryBody, Response};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const LIQUIDITY_POSITIONS_QUERY: &str = r#"
    query LiquidityPositions($agent: String!) {
        liquidityPositions(where: { agentAddress: { _eq: $agent } }) {
            id
            agent: agentAddress
            pair: pairAddress
            liquidity
            depositsToken0
            depositsToken1
            withdrawalsToken0
            withdrawalsToken1
            usdValue
            apyEarned
        }
    }
"#;

const STAKE_POSITIONS_QUERY: &str = r#"
    query StakePositions($agent: String!) {
        userRewards(where: { agentAddress: { _eq: $agent } }) {
            id
            agent: agentAddress
            reactor: reactorAddress
            stakedAmount
            rewards
            penaltyEndTime
            rewardPerTokenPaid
        }
    }
"#;

#[derive(Debug, Serialize)]
struct AgentVariables {
    agent: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiquidityPositionsData {
    liquidity_positions: Vec<LiquidityPosition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StakePositionsData {
    user_rewards: Vec<StakePosition>,
}

/// Position source backed by the GraphQL indexer
pub struct IndexerPositionSource {
    client: Client,
    endpoint: String,
}

impl IndexerPositionSource {
    /// Create a client with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn variables(owner: Address) -> AgentVariables {
        AgentVariables {
            agent: owner.to_string().to_lowercase(),
        }
    }

    /// Execute a query and decode its `data`
    async fn query<D: DeserializeOwned>(
        &self,
        operation_name: &'static str,
        query: &'static str,
        owner: Address,
    ) -> Result<D> {
        let body = QueryBody {
            variables: Self::variables(owner),
            query,
            operation_name,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        parse_response(operation_name, &text)
    }
}

/// Decode a GraphQL response body, surfacing `errors` and missing `data`
fn parse_response<D: DeserializeOwned>(operation_name: &str, body: &str) -> Result<D> {
    let response: Response<D> = serde_json::from_str(body).map_err(|e| {
        Error::Indexer(format!("{}: malformed response: {}", operation_name, e))
    })?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        return Err(Error::Indexer(format!(
            "{}: {}",
            operation_name,
            messages.join(", ")
        )));
    }

    response
        .data
        .ok_or_else(|| Error::Indexer(format!("{}: no data in response", operation_name)))
}

#[async_trait]
impl PositionSource for IndexerPositionSource {
    async fn liquidity_positions(&self, owner: Address) -> Result<Vec<LiquidityPosition>> {
        let data: LiquidityPositionsData = self
            .query("LiquidityPositions", LIQUIDITY_POSITIONS_QUERY, owner)
            .await?;
        tracing::debug!(
            agent = %owner,
            count = data.liquidity_positions.len(),
            "Fetched liquidity positions"
        );
        Ok(data.liquidity_positions)
    }

    async fn stake_positions(&self, owner: Address) -> Result<Vec<StakePosition>> {
        let data: StakePositionsData = self
            .query("StakePositions", STAKE_POSITIONS_QUERY, owner)
            .await?;
        tracing::debug!(
            agent = %owner,
            count = data.user_rewards.len(),
            "Fetched stake positions"
        );
        Ok(data.user_rewards)
    }
}
