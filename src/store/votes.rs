//! Vote records, one per (proposal, voter).

use crate::codec;
use crate::error::{GovError, GovResult};
use crate::storage::KvStore;
use crate::types::{AccountId, ProposalId, Vote};

/// Write a vote, replacing any earlier vote by the same voter on the
/// same proposal.
pub fn upsert(kv: &mut impl KvStore, vote: &Vote) -> GovResult<()> {
    let key = codec::vote_key(vote.proposal_id, vote.voter.as_str());
    kv.put(&key, &codec::encode(vote)?)?;
    Ok(())
}

/// Load the vote cast by `voter` on `proposal_id`.
pub fn get(kv: &impl KvStore, proposal_id: ProposalId, voter: &AccountId) -> GovResult<Vote> {
    match kv.get(&codec::vote_key(proposal_id, voter.as_str()))? {
        Some(bytes) => Ok(codec::decode(&bytes)?),
        None => Err(GovError::VoteNotFound),
    }
}

/// All votes for one proposal, in ascending voter order (deterministic).
pub fn all_for(kv: &impl KvStore, proposal_id: ProposalId) -> GovResult<Vec<Vote>> {
    let mut votes = Vec::new();
    for (_, bytes) in kv.scan_prefix(&codec::vote_prefix(proposal_id))? {
        votes.push(codec::decode(&bytes)?);
    }
    Ok(votes)
}
