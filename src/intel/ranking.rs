//! He3 leaderboard

use crate::config::AgentId;
use crate::numeric::decimal;
use crate::Result;
use alloy::primitives::{Address, U256};
use serde::Serialize;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedAgent {
    pub agent_id: AgentId,
    pub address: Address,
    #[serde(with = "decimal")]
    pub balance: U256,
}

/// Sort fetched balances descending; failed fetches are left out.
///
/// Ties are ordered by agent id. Callers detect missing agents by comparing the
/// result length against the roster size.
pub fn rank_by_balance(
    fetched: impl IntoIterator<Item = (AgentId, Address, Result<U256>)>,
) -> Vec<RankedAgent> {
    let mut ranked: Vec<RankedAgent> = fetched
        .into_iter()
        .filter_map(|(agent_id, address, balance)| match balance {
            Ok(balance) => Some(RankedAgent {
                agent_id,
                address,
                balance,
            }),
            Err(e) => {
                tracing::warn!(agent = %agent_id, error = %e, "Excluding agent from ranking");
                None
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.balance
            .cmp(&a.balance)
            .then_with(|| a.agent_id.cmp(&b.agent_id))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_rank_excludes_failures_and_sorts_descending() {
        let two_pow_60 = U256::from(1u64) << 60;
        let fetched = vec![
            ("A".to_string(), Address::ZERO, Ok(two_pow_60 * U256::from(100u64))),
            (
                "B".to_string(),
                Address::ZERO,
                Err(Error::Rpc("connection refused".to_string())),
            ),
            ("C".to_string(), Address::ZERO, Ok(two_pow_60 * U256::from(50u64))),
        ];

        let ranked = rank_by_balance(fetched);
        let ids: Vec<_> = ranked.iter().map(|r| r.agent_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert!(ranked[0].balance > ranked[1].balance);
    }

    #[test]
    fn test_rank_compares_numerically_not_lexically() {
        let fetched = vec![
            ("low".to_string(), Address::ZERO, Ok(U256::from(9u64))),
            ("high".to_string(), Address::ZERO, Ok(U256::from(10u64))),
            (
                "huge".to_string(),
                Address::ZERO,
                Ok((U256::from(1u64) << 53) + U256::from(1u64)),
            ),
            (
                "huge-minus".to_string(),
                Address::ZERO,
                Ok(U256::from(1u64) << 53),
            ),
        ];

        let ids: Vec<_> = rank_by_balance(fetched)
            .into_iter()
            .map(|r| r.agent_id)
            .collect();
        assert_eq!(ids, vec!["huge", "huge-minus", "high", "low"]);
    }

    #[test]
    fn test_rank_ties_by_agent_id() {
        let fetched = vec![
            ("b".to_string(), Address::ZERO, Ok(U256::from(5u64))),
            ("a".to_string(), Address::ZERO, Ok(U256::from(5u64))),
        ];
        let ids: Vec<_> = rank_by_balance(fetched)
            .into_iter()
            .map(|r| r.agent_id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_ranked_agent_serializes_decimal_balance() {
        let row = RankedAgent {
            agent_id: "A".to_string(),
            address: Address::ZERO,
            balance: U256::from(1u64) << 70,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["balance"], "1180591620717411303424");
        assert_eq!(value["agentId"], "A");
    }
}
