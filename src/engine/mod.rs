//! Governance engine.
//!
//! The only component with business logic: submission, voting, expiry
//! processing, parameter updates, and the read-only queries. The engine
//! is the sole writer of the proposal store, vote store, and queue, and
//! it is invoked deterministically — logical time always arrives as an
//! argument, never from a clock.

pub mod escrow;
pub mod tally;

use crate::error::{GovError, GovResult};
use crate::params::GovParams;
use crate::storage::KvStore;
use crate::store::{proposals, queue, votes};
use crate::types::{
    AccountId, Proposal, ProposalId, ProposalStatus, TallyResult, Vote, VoteOption,
};
use escrow::Escrow;
use tally::TallyPolicy;
use tracing::{debug, info, warn};

/// Deterministic proposal voting engine over a key-value store and an
/// escrow collaborator.
pub struct GovEngine<S: KvStore, E: Escrow> {
    kv: S,
    escrow: E,
    params: GovParams,
    policy: TallyPolicy,
}

impl<S: KvStore, E: Escrow> GovEngine<S, E> {
    /// Build an engine over `kv` and `escrow` with the given parameters.
    pub fn new(kv: S, escrow: E, params: GovParams) -> GovResult<Self> {
        params.validate()?;
        Ok(Self {
            kv,
            escrow,
            params,
            policy: TallyPolicy::default(),
        })
    }

    /// Replace the default tally policy.
    pub fn with_tally_policy(mut self, policy: TallyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parameters currently in force.
    pub fn params(&self) -> &GovParams {
        &self.params
    }

    /// Read access to the backing store (state comparison, host commits).
    pub fn store(&self) -> &S {
        &self.kv
    }

    /// The escrow collaborator.
    pub fn escrow(&self) -> &E {
        &self.escrow
    }

    /// Submit a proposal. Returns the assigned identifier.
    ///
    /// Validation order: title, description, deposit minimum, escrow
    /// reserve. The id counter advances only when all of these pass, so
    /// failed attempts never consume identifiers.
    pub fn submit_proposal(
        &mut self,
        title: &str,
        description: &str,
        proposer: AccountId,
        deposit: u64,
        now: u64,
    ) -> GovResult<ProposalId> {
        if title.is_empty() {
            return Err(GovError::InvalidTitle);
        }
        if description.is_empty() {
            return Err(GovError::InvalidDescription);
        }
        if deposit < self.params.min_deposit {
            return Err(GovError::InsufficientDeposit(None));
        }
        self.escrow.reserve(&proposer, deposit)?;

        let id = proposals::allocate_id(&mut self.kv)?;
        let voting_end_time = now.saturating_add(self.params.voting_window_secs);
        let proposal = Proposal {
            id,
            title: title.to_string(),
            description: description.to_string(),
            proposer,
            deposit,
            submit_time: now,
            voting_end_time,
            status: ProposalStatus::Active,
            tally: None,
        };
        proposals::put(&mut self.kv, &proposal)?;
        queue::insert(&mut self.kv, voting_end_time, id)?;

        info!(id, voting_end_time, "proposal submitted");
        Ok(id)
    }

    /// Cast a vote. `option` is the caller-supplied option string;
    /// anything outside the enumerated set is `InvalidOption`.
    ///
    /// Closing is by time comparison, not queue presence: a vote at
    /// `now >= voting_end_time` is `VotingPeriodClosed` even if the
    /// proposal has not been tallied yet.
    pub fn cast_vote(
        &mut self,
        proposal_id: ProposalId,
        voter: AccountId,
        option: &str,
        now: u64,
    ) -> GovResult<()> {
        let option = VoteOption::parse(option)?;
        let proposal = proposals::get(&self.kv, proposal_id)?;
        if !proposal.voting_open(now) {
            return Err(GovError::VotingPeriodClosed);
        }

        let vote = Vote {
            proposal_id,
            voter,
            option,
        };
        votes::upsert(&mut self.kv, &vote)?;
        debug!(proposal_id, option = %option, "vote recorded");
        Ok(())
    }

    /// Tally every proposal whose voting window has ended.
    ///
    /// The host invokes this once per execution step, before that step's
    /// submissions and votes, so a proposal is never tallied and voted on
    /// within the same step. An empty queue is "nothing to do". Returns
    /// the `(id, status)` pairs tallied, in pop order, for host events.
    ///
    /// A queue entry whose proposal record is missing signals storage
    /// corruption: processing halts with `ProposalQueueNotFound` and the
    /// host must discard the step's writes.
    pub fn process_expired(&mut self, now: u64) -> GovResult<Vec<(ProposalId, ProposalStatus)>> {
        let mut tallied = Vec::new();

        while let Some((end_time, _)) = queue::peek(&self.kv)? {
            if end_time > now {
                break;
            }
            let (_, id) = queue::pop_front(&mut self.kv)?;

            let mut proposal = match proposals::get(&self.kv, id) {
                Ok(proposal) => proposal,
                Err(GovError::ProposalNotFound(_)) => {
                    return Err(GovError::ProposalQueueNotFound(id));
                }
                Err(err) => return Err(err),
            };

            // Terminal proposals are never re-tallied; a stale entry is
            // dropped and reported, not silently recounted.
            if proposal.status.is_terminal() {
                warn!(id, "stale queue entry for tallied proposal dropped");
                continue;
            }

            let mut tally = TallyResult::default();
            for vote in votes::all_for(&self.kv, id)? {
                tally.record(vote.option);
            }
            let status = self.policy.decide(&tally);

            proposal.status = status;
            proposal.tally = Some(tally);
            proposals::put(&mut self.kv, &proposal)?;
            self.escrow.release(&proposal.proposer, proposal.deposit)?;

            info!(id, ?status, total_votes = tally.total(), "proposal tallied");
            tallied.push((id, status));
        }

        Ok(tallied)
    }

    /// Replace the parameter set. Applies to proposals submitted after
    /// the update; in-flight proposals keep their voting-end times.
    pub fn update_params(&mut self, params: GovParams) -> GovResult<()> {
        params.validate()?;
        info!(
            min_deposit = params.min_deposit,
            voting_window_secs = params.voting_window_secs,
            "governance parameters updated"
        );
        self.params = params;
        Ok(())
    }

    /// Look up a proposal by id.
    pub fn get_proposal(&self, id: ProposalId) -> GovResult<Proposal> {
        proposals::get(&self.kv, id)
    }

    /// Look up the vote cast by `voter` on proposal `id`.
    pub fn get_vote(&self, id: ProposalId, voter: &AccountId) -> GovResult<Vote> {
        if !proposals::exists(&self.kv, id)? {
            return Err(GovError::ProposalNotFound(id));
        }
        votes::get(&self.kv, id, voter)
    }

    /// All votes for proposal `id`, in ascending voter order.
    pub fn list_votes(&self, id: ProposalId) -> GovResult<Vec<Vote>> {
        if !proposals::exists(&self.kv, id)? {
            return Err(GovError::ProposalNotFound(id));
        }
        votes::all_for(&self.kv, id)
    }

    /// All active proposals, earliest voting-end first.
    pub fn list_active_proposals(&self) -> GovResult<Vec<Proposal>> {
        let mut active = Vec::new();
        for (_, id) in queue::entries(&self.kv)? {
            match proposals::get(&self.kv, id) {
                Ok(proposal) => active.push(proposal),
                Err(GovError::ProposalNotFound(_)) => {
                    return Err(GovError::ProposalQueueNotFound(id));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(active)
    }
}
