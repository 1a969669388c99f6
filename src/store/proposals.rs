//! Proposal records and the monotonic id counter.

use crate::codec;
use crate::error::{GovError, GovResult};
use crate::storage::KvStore;
use crate::types::{Proposal, ProposalId};

/// First identifier ever assigned.
const FIRST_ID: ProposalId = 1;

/// Identifier the next successful submission will receive.
pub fn next_id(kv: &impl KvStore) -> GovResult<ProposalId> {
    match kv.get(codec::NEXT_ID_KEY)? {
        Some(bytes) => Ok(codec::decode(&bytes)?),
        None => Ok(FIRST_ID),
    }
}

/// Take the next identifier and advance the counter.
///
/// Callers must only invoke this after every validation has passed:
/// the counter advances exclusively on successful submissions, so the
/// assigned sequence is gapless and strictly increasing.
pub fn allocate_id(kv: &mut impl KvStore) -> GovResult<ProposalId> {
    let id = next_id(kv)?;
    kv.put(codec::NEXT_ID_KEY, &codec::encode(&(id + 1))?)?;
    Ok(id)
}

/// Persist a proposal record under its id.
pub fn put(kv: &mut impl KvStore, proposal: &Proposal) -> GovResult<()> {
    kv.put(&codec::proposal_key(proposal.id), &codec::encode(proposal)?)?;
    Ok(())
}

/// Load the proposal under `id`.
pub fn get(kv: &impl KvStore, id: ProposalId) -> GovResult<Proposal> {
    match kv.get(&codec::proposal_key(id))? {
        Some(bytes) => Ok(codec::decode(&bytes)?),
        None => Err(GovError::ProposalNotFound(id)),
    }
}

/// Whether a proposal record exists under `id`.
pub fn exists(kv: &impl KvStore, id: ProposalId) -> GovResult<bool> {
    Ok(kv.get(&codec::proposal_key(id))?.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::ProposalStatus;

    fn sample(id: ProposalId) -> Proposal {
        Proposal {
            id,
            title: "sample".into(),
            description: "sample description".into(),
            proposer: "alice".into(),
            deposit: 10,
            submit_time: 0,
            voting_end_time: 100,
            status: ProposalStatus::Active,
            tally: None,
        }
    }

    #[test]
    fn counter_starts_at_one_and_advances() {
        let mut kv = MemoryStore::new();
        assert_eq!(next_id(&kv).unwrap(), 1);
        assert_eq!(allocate_id(&mut kv).unwrap(), 1);
        assert_eq!(allocate_id(&mut kv).unwrap(), 2);
        assert_eq!(next_id(&kv).unwrap(), 3);
    }

    #[test]
    fn put_then_get_roundtrips() {
        let mut kv = MemoryStore::new();
        let proposal = sample(4);
        put(&mut kv, &proposal).unwrap();
        assert_eq!(get(&kv, 4).unwrap(), proposal);
        assert!(exists(&kv, 4).unwrap());
    }

    #[test]
    fn missing_proposal_is_not_found() {
        let kv = MemoryStore::new();
        assert_eq!(get(&kv, 9).unwrap_err(), GovError::ProposalNotFound(9));
        assert!(!exists(&kv, 9).unwrap());
    }
}
