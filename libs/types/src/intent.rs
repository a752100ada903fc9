//! Per-chain call batches and their commitment hashes
//!
//! A `ChainBatchInput` describes an ordered set of on-chain calls on one
//! chain, anchored to a recent block. Hashing it yields a `ChainBatch`
//! carrying the 32-byte commitment an off-chain authorizer attests to.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::IntentError;
use crate::numeric::IntoU256;

/// A single on-chain invocation. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    /// Target contract address
    pub to: Address,
    /// Native value forwarded with the call
    pub value: U256,
    /// Opaque call data
    pub data: Bytes,
}

impl Call {
    pub fn new(to: Address, value: U256, data: Bytes) -> Self {
        Self { to, value, data }
    }

    /// Parse a call from hex-string inputs.
    ///
    /// Malformed address or data hex fails fast — silently coercing here
    /// would corrupt a security-relevant commitment downstream.
    pub fn parse(to: &str, value: U256, data: &str) -> Result<Self, IntentError> {
        let to = Address::from_str(to).map_err(|_| IntentError::InvalidAddress {
            input: to.to_owned(),
        })?;
        let data = Bytes::from_str(data).map_err(|_| IntentError::InvalidCallData {
            input: data.to_owned(),
        })?;
        Ok(Self {
            to,
            value,
            data,
        })
    }
}

/// A chain identifier, an ordered sequence of calls (order-significant), and
/// a recent-block freshness anchor.
///
/// `chain_id` and `recent_block` accept native-width integers and are
/// normalized to 256 bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainBatchInput {
    pub chain_id: U256,
    pub calls: Vec<Call>,
    pub recent_block: U256,
}

impl ChainBatchInput {
    pub fn new(
        chain_id: impl IntoU256,
        calls: Vec<Call>,
        recent_block: impl IntoU256,
    ) -> Self {
        Self {
            chain_id: chain_id.into_u256(),
            calls,
            recent_block: recent_block.into_u256(),
        }
    }
}

/// A `ChainBatchInput` plus its computed 32-byte commitment hash.
///
/// The hash is a pure function of `(chain_id, calls, recent_block)`:
/// identical inputs always produce an identical hash, and changing any
/// field — or the order of calls — changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainBatch {
    pub chain_id: U256,
    pub calls: Vec<Call>,
    pub recent_block: U256,
    pub hash: B256,
}

impl ChainBatch {
    /// Commitment hash as a 0x-prefixed 64-hex-character string.
    pub fn hash_hex(&self) -> String {
        self.hash.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_ADDRESS: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn test_call_parse_valid() {
        let call = Call::parse(TEST_ADDRESS, U256::ZERO, "0xdeadbeef").unwrap();
        assert_eq!(call.to, Address::from_str(TEST_ADDRESS).unwrap());
        assert_eq!(call.data.len(), 4);
    }

    #[test]
    fn test_call_parse_empty_data() {
        let call = Call::parse(TEST_ADDRESS, U256::ZERO, "0x").unwrap();
        assert!(call.data.is_empty());
    }

    #[test]
    fn test_call_parse_invalid_address() {
        let result = Call::parse("0x123", U256::ZERO, "0x");
        assert_eq!(
            result,
            Err(IntentError::InvalidAddress {
                input: "0x123".to_string()
            })
        );
    }

    #[test]
    fn test_call_parse_invalid_data() {
        let result = Call::parse(TEST_ADDRESS, U256::ZERO, "0xzz");
        assert_eq!(
            result,
            Err(IntentError::InvalidCallData {
                input: "0xzz".to_string()
            })
        );
    }

    #[test]
    fn test_call_parse_mixed_case_address() {
        // Hex parsing is case-insensitive
        let call = Call::parse(
            "0xAbCdEf0123456789abcdef0123456789ABCDEF01",
            U256::from(1u8),
            "0x",
        )
        .unwrap();
        assert_eq!(
            call.to,
            Address::from_str("0xabcdef0123456789abcdef0123456789abcdef01").unwrap()
        );
    }

    #[test]
    fn test_batch_input_normalizes_native_integers() {
        let input = ChainBatchInput::new(5115u64, vec![], 1u64);
        assert_eq!(input.chain_id, U256::from(5115u64));
        assert_eq!(input.recent_block, U256::from(1u64));

        let mixed = ChainBatchInput::new(1u32, vec![], u128::MAX);
        assert_eq!(mixed.chain_id, U256::from(1u8));
        assert_eq!(mixed.recent_block, U256::from(u128::MAX));

        let wide = ChainBatchInput::new(U256::MAX, vec![], U256::ZERO);
        assert_eq!(wide.chain_id, U256::MAX);
    }

    #[test]
    fn test_batch_serde_round_trip() {
        let call = Call::parse(TEST_ADDRESS, U256::from(7u8), "0x01ff").unwrap();
        let batch = ChainBatch {
            chain_id: U256::from(1u8),
            calls: vec![call],
            recent_block: U256::from(99u8),
            hash: B256::repeat_byte(0xab),
        };
        let json = serde_json::to_string(&batch).unwrap();
        let restored: ChainBatch = serde_json::from_str(&json).unwrap();
        assert_eq!(batch, restored);
    }

    #[test]
    fn test_hash_hex_format() {
        let batch = ChainBatch {
            chain_id: U256::from(1u8),
            calls: vec![],
            recent_block: U256::ZERO,
            hash: B256::repeat_byte(0x11),
        };
        let hex = batch.hash_hex();
        assert_eq!(hex.len(), 66);
        assert!(hex.starts_with("0x"));
    }
}
