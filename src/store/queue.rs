//! Time-ordered queue of active proposals.
//!
//! Entries are keyed `(voting-end time, proposal id)` big-endian, so the
//! store's ascending byte order is the pop order: earliest expiry first,
//! ties broken by ascending proposal id. Values are empty; the key is the
//! entry.

use crate::codec;
use crate::error::{GovError, GovResult};
use crate::storage::KvStore;
use crate::types::ProposalId;

/// Add a queue entry for an active proposal.
pub fn insert(kv: &mut impl KvStore, end_time: u64, id: ProposalId) -> GovResult<()> {
    kv.put(&codec::queue_key(end_time, id), b"")?;
    Ok(())
}

/// Remove a queue entry. Removing an absent entry is not an error.
pub fn remove(kv: &mut impl KvStore, end_time: u64, id: ProposalId) -> GovResult<()> {
    kv.delete(&codec::queue_key(end_time, id))?;
    Ok(())
}

/// Earliest-expiring entry without removing it.
pub fn peek(kv: &impl KvStore) -> GovResult<Option<(u64, ProposalId)>> {
    match kv.first_in_prefix(codec::QUEUE_PREFIX)? {
        Some((key, _)) => Ok(Some(codec::parse_queue_key(&key)?)),
        None => Ok(None),
    }
}

/// Remove and return the earliest-expiring entry.
///
/// Only for call sites that already observed a non-empty queue; an empty
/// queue here is a logic bug, surfaced as `EmptyProposalQueue` rather
/// than swallowed.
pub fn pop_front(kv: &mut impl KvStore) -> GovResult<(u64, ProposalId)> {
    let (end_time, id) = peek(kv)?.ok_or(GovError::EmptyProposalQueue)?;
    remove(kv, end_time, id)?;
    Ok((end_time, id))
}

/// All entries in pop order.
pub fn entries(kv: &impl KvStore) -> GovResult<Vec<(u64, ProposalId)>> {
    kv.scan_prefix(codec::QUEUE_PREFIX)?
        .into_iter()
        .map(|(key, _)| codec::parse_queue_key(&key).map_err(GovError::from))
        .collect()
}
