//! Intent Hashing Engine — canonical commitments over per-chain call batches
//!
//! Canonicalizes a set of per-chain call batches into deterministic
//! Keccak-256 commitments, then aggregates the ordered batch hashes into a
//! single intent hash authorizing a multi-chain transaction bundle.
//!
//! The encoding is the canonical ABI tuple layout (32-byte words,
//! length-prefixed dynamic bytes, tail-pointer dynamic arrays). It anchors an
//! external verification scheme, so it must be reproduced bit for bit:
//! `batch_hash` equals `keccak256(abi.encode(chainId, calls, recentBlock))`
//! and `intent_hash` equals `keccak256(abi.encode(batchHashes))`.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;

use types::intent::{Call, ChainBatch, ChainBatchInput};

/// Commitment hash for a single batch.
///
/// Pure function of `(chain_id, calls, recent_block)`; the call order is
/// significant. An empty call list is valid and still hashes.
pub fn batch_hash(chain_id: U256, calls: &[Call], recent_block: U256) -> B256 {
    let call_tuples: Vec<(Address, U256, Bytes)> = calls
        .iter()
        .map(|call| (call.to, call.value, call.data.clone()))
        .collect();

    // abi.encode(uint256, (address,uint256,bytes)[], uint256)
    let encoded = (chain_id, call_tuples, recent_block).abi_encode_params();
    keccak256(encoded)
}

/// Hash each batch input, preserving input order.
pub fn hash_chain_batches(inputs: Vec<ChainBatchInput>) -> Vec<ChainBatch> {
    inputs
        .into_iter()
        .map(|input| {
            let hash = batch_hash(input.chain_id, &input.calls, input.recent_block);
            ChainBatch {
                chain_id: input.chain_id,
                calls: input.calls,
                recent_block: input.recent_block,
                hash,
            }
        })
        .collect()
}

/// Aggregate commitment over an ordered sequence of batch hashes.
///
/// Order-sensitive: permuting the batches changes the result.
pub fn intent_hash(batches: &[ChainBatch]) -> B256 {
    let hashes: Vec<B256> = batches.iter().map(|batch| batch.hash).collect();

    // abi.encode(bytes32[])
    keccak256(hashes.abi_encode())
}

/// Intent hash as a 0x-prefixed 64-hex-character string.
pub fn intent_hash_hex(batches: &[ChainBatch]) -> String {
    intent_hash(batches).to_string()
}
