//! Core governance records.
//!
//! Every record stored by the engine lives here: proposals, votes, vote
//! options, and tally results. All types are serde-derived so they can be
//! CBOR-encoded into the key-value store, and all timestamps are logical
//! seconds supplied by the execution context — never a wall clock.

use crate::error::{GovError, GovResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonically increasing proposal identifier. Assigned at submission,
/// starting from 1, never reused.
pub type ProposalId = u64;

/// Opaque account reference used for proposers and voters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        AccountId(s.to_string())
    }
}

/// Closed set of vote options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteOption {
    Yes,
    No,
    Abstain,
    NoWithVeto,
}

impl VoteOption {
    /// Parse a vote option from its canonical string form.
    ///
    /// Accepted (case-insensitive): "yes", "no", "abstain",
    /// "no_with_veto". Anything else is `InvalidOption`.
    pub fn parse(input: &str) -> GovResult<Self> {
        match input.to_ascii_lowercase().as_str() {
            "yes" => Ok(VoteOption::Yes),
            "no" => Ok(VoteOption::No),
            "abstain" => Ok(VoteOption::Abstain),
            "no_with_veto" => Ok(VoteOption::NoWithVeto),
            other => Err(GovError::InvalidOption(Some(format!(
                "\"{other}\" is not a vote option"
            )))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteOption::Yes => "yes",
            VoteOption::No => "no",
            VoteOption::Abstain => "abstain",
            VoteOption::NoWithVeto => "no_with_veto",
        }
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proposal lifecycle status.
///
/// `Active` transitions exactly once to `Passed` or `Rejected` at tally
/// time; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    Active,
    Passed,
    Rejected,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProposalStatus::Active)
    }
}

/// Per-option vote counts, populated at tally time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub yes: u64,
    pub no: u64,
    pub abstain: u64,
    pub no_with_veto: u64,
}

impl TallyResult {
    /// Count one vote for `option`.
    pub fn record(&mut self, option: VoteOption) {
        match option {
            VoteOption::Yes => self.yes += 1,
            VoteOption::No => self.no += 1,
            VoteOption::Abstain => self.abstain += 1,
            VoteOption::NoWithVeto => self.no_with_veto += 1,
        }
    }

    /// All cast votes, abstentions included.
    pub fn total(&self) -> u64 {
        self.yes + self.no + self.abstain + self.no_with_veto
    }

    /// Cast votes excluding abstentions.
    pub fn non_abstain(&self) -> u64 {
        self.yes + self.no + self.no_with_veto
    }
}

/// A governance proposal.
///
/// Owned by the proposal store; mutated only by the engine at submission
/// and tally; never deleted (retained for audit and queries).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub proposer: AccountId,
    /// Amount escrowed at submission.
    pub deposit: u64,
    /// Logical time the proposal was submitted.
    pub submit_time: u64,
    /// submit_time + the voting window in force at submission.
    pub voting_end_time: u64,
    pub status: ProposalStatus,
    /// Present iff status is terminal.
    pub tally: Option<TallyResult>,
}

impl Proposal {
    /// Whether a vote arriving at `now` is still acceptable.
    ///
    /// Closing is by time comparison, not queue presence: a vote in the
    /// same step as expiry is accepted only if `now` is strictly before
    /// the voting-end time.
    pub fn voting_open(&self, now: u64) -> bool {
        self.status == ProposalStatus::Active && now < self.voting_end_time
    }
}

/// A cast vote. Unique per (proposal, voter); a later vote by the same
/// voter overwrites the earlier one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub proposal_id: ProposalId,
    pub voter: AccountId,
    pub option: VoteOption,
}

/// Parse a proposal identifier arriving through a query or transaction
/// surface. Identifiers start at 1; zero and non-numeric input are
/// rejected.
pub fn parse_proposal_id(input: &str) -> GovResult<ProposalId> {
    let id: ProposalId = input
        .trim()
        .parse()
        .map_err(|_| GovError::InvalidProposalId(Some(format!("\"{input}\" is not a proposal id"))))?;
    if id == 0 {
        return Err(GovError::InvalidProposalId(Some(
            "proposal ids start at 1".into(),
        )));
    }
    Ok(id)
}
