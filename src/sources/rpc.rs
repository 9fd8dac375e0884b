//! On-chain balance reads
//!
//! Read-only: issues `eth_call` against ERC20 `balanceOf` and never touches keys.

use super::BalanceSource;
use crate::config::RpcConfig;
use crate::{Error, Result};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

/// ERC20 balanceOf(address) selector
const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// Balance source backed by a JSON-RPC endpoint
#[derive(Debug, Clone)]
pub struct RpcBalanceSource {
    url: url::Url,
}

impl RpcBalanceSource {
    pub fn new(config: &RpcConfig) -> Result<Self> {
        Ok(Self {
            url: config.parsed_url()?,
        })
    }
}

/// Encode: selector + address padded to 32 bytes
fn balance_of_calldata(owner: Address) -> Bytes {
    let mut calldata = Vec::with_capacity(36);
    calldata.extend_from_slice(&BALANCE_OF_SELECTOR);
    calldata.extend_from_slice(&[0u8; 12]);
    calldata.extend_from_slice(owner.as_slice());
    Bytes::from(calldata)
}

/// Decode the uint256 return value
fn decode_balance(result: &[u8]) -> Result<U256> {
    if result.len() < 32 {
        return Err(Error::Rpc(format!(
            "balanceOf returned {} bytes, expected 32",
            result.len()
        )));
    }
    Ok(U256::from_be_slice(&result[..32]))
}

#[async_trait]
impl BalanceSource for RpcBalanceSource {
    async fn balance_of(&self, token: Address, owner: Address) -> Result<U256> {
        let provider = ProviderBuilder::new().connect_http(self.url.clone());

        let tx = TransactionRequest::default()
            .to(token)
            .input(balance_of_calldata(owner).into());

        let result = provider
            .call(tx)
            .await
            .map_err(|e| Error::Rpc(format!("balanceOf({}) on {} failed: {}", owner, token, e)))?;

        decode_balance(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_balance_of_calldata() {
        let owner = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        let calldata = balance_of_calldata(owner);

        assert_eq!(calldata.len(), 36);
        assert_eq!(&calldata[..4], &BALANCE_OF_SELECTOR);
        assert!(calldata[4..16].iter().all(|b| *b == 0));
        assert_eq!(&calldata[16..], owner.as_slice());
    }

    #[test]
    fn test_decode_balance() {
        let mut word = [0u8; 32];
        word[31] = 0x2a;
        assert_eq!(decode_balance(&word).unwrap(), U256::from(42u64));

        // Full-width values survive
        let max = [0xffu8; 32];
        assert_eq!(decode_balance(&max).unwrap(), U256::MAX);
    }

    #[test]
    fn test_short_response_is_rpc_error() {
        assert!(matches!(decode_balance(&[0u8; 4]), Err(Error::Rpc(_))));
        assert!(matches!(decode_balance(&[]), Err(Error::Rpc(_))));
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let config = RpcConfig::with_url("::not a url::");
        assert!(matches!(RpcBalanceSource::new(&config), Err(Error::Config(_))));
    }
}
