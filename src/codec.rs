//! CBOR encoding and the store key layout.
//!
//! Every record is CBOR-encoded via `ciborium` (NOT JSON or bincode):
//! deterministic bytes for identical values, which replay safety depends
//! on, and cheap schema evolution with `#[serde(default)]`.
//!
//! Keys are byte strings with fixed-width big-endian integer segments so
//! that plain ascending byte order equals logical order. The queue prefix
//! relies on this: `q/<end BE8><id BE8>` sorts by voting-end time first,
//! proposal id second.

use crate::types::ProposalId;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Record prefix for proposals: `p/<id BE8>`.
pub const PROPOSAL_PREFIX: &[u8] = b"p/";
/// Record prefix for votes: `v/<proposal id BE8>/<voter utf8>`.
pub const VOTE_PREFIX: &[u8] = b"v/";
/// Record prefix for queue entries: `q/<end BE8><id BE8>`, empty value.
pub const QUEUE_PREFIX: &[u8] = b"q/";
/// Key holding the next proposal identifier.
pub const NEXT_ID_KEY: &[u8] = b"m/next_proposal_id";

/// Encoding/decoding errors.
#[derive(Debug, Error)]
pub enum CodecError {
    /// CBOR encoding failed.
    #[error("CBOR encoding failed: {0}")]
    Encode(String),

    /// CBOR decoding failed.
    #[error("CBOR decoding failed: {0}")]
    Decode(String),

    /// A store key did not match the expected layout.
    #[error("malformed store key: {0}")]
    Key(String),
}

/// Serialize a record to CBOR bytes.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(value, &mut bytes).map_err(|e| CodecError::Encode(format!("{e:?}")))?;
    Ok(bytes)
}

/// Deserialize a record from CBOR bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    ciborium::from_reader(bytes).map_err(|e| CodecError::Decode(format!("{e:?}")))
}

/// Key for a proposal record.
pub fn proposal_key(id: ProposalId) -> Vec<u8> {
    let mut key = Vec::with_capacity(PROPOSAL_PREFIX.len() + 8);
    key.extend_from_slice(PROPOSAL_PREFIX);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Key for a vote record.
pub fn vote_key(id: ProposalId, voter: &str) -> Vec<u8> {
    let mut key = vote_prefix(id);
    key.extend_from_slice(voter.as_bytes());
    key
}

/// Prefix under which all votes for one proposal live, in ascending voter
/// order.
pub fn vote_prefix(id: ProposalId) -> Vec<u8> {
    let mut key = Vec::with_capacity(VOTE_PREFIX.len() + 9);
    key.extend_from_slice(VOTE_PREFIX);
    key.extend_from_slice(&id.to_be_bytes());
    key.push(b'/');
    key
}

/// Key for a queue entry. Sorts by (voting-end time, proposal id).
pub fn queue_key(end_time: u64, id: ProposalId) -> Vec<u8> {
    let mut key = Vec::with_capacity(QUEUE_PREFIX.len() + 16);
    key.extend_from_slice(QUEUE_PREFIX);
    key.extend_from_slice(&end_time.to_be_bytes());
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Recover (voting-end time, proposal id) from a queue key.
pub fn parse_queue_key(key: &[u8]) -> Result<(u64, ProposalId), CodecError> {
    let rest = key
        .strip_prefix(QUEUE_PREFIX)
        .ok_or_else(|| CodecError::Key(format!("not a queue key: {}", hex::encode(key))))?;
    if rest.len() != 16 {
        return Err(CodecError::Key(format!(
            "queue key has {} payload bytes, expected 16",
            rest.len()
        )));
    }
    let mut end = [0u8; 8];
    let mut id = [0u8; 8];
    end.copy_from_slice(&rest[..8]);
    id.copy_from_slice(&rest[8..]);
    Ok((u64::from_be_bytes(end), ProposalId::from_be_bytes(id)))
}
