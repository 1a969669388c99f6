//! Governance error taxonomy.
//!
//! Every failure carries a stable numeric code and the module codespace so
//! callers can match on machine-checkable identity instead of message
//! text. Variants that accept a caller-supplied message fall back to a
//! default when none is given.

use thiserror::Error;

/// Codespace identifying this module in error reports.
pub const CODESPACE: &str = "gov";

/// Result type for governance operations.
pub type GovResult<T> = Result<T, GovError>;

/// Governance engine errors.
///
/// Input-validation, lookup, and timing errors are recoverable and leave
/// no state mutated. `EmptyProposalQueue` and `ProposalQueueNotFound`
/// signal storage corruption or a logic bug and must halt the affected
/// step rather than be retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovError {
    /// The chosen vote option is not one of the enumerated set.
    #[error("{}", .0.as_deref().unwrap_or("the chosen option is invalid"))]
    InvalidOption(Option<String>),

    /// A proposal identifier could not be parsed or is out of range.
    #[error("{}", .0.as_deref().unwrap_or("proposal id is not valid"))]
    InvalidProposalId(Option<String>),

    /// The vote arrived at or after the proposal's voting-end time.
    #[error("voting period is closed for this proposal")]
    VotingPeriodClosed,

    /// A pop was issued against a queue known to be empty.
    #[error("cannot take an element from an empty proposal queue")]
    EmptyProposalQueue,

    /// Proposal title is empty.
    #[error("cannot submit a proposal with an empty title")]
    InvalidTitle,

    /// Proposal description is empty.
    #[error("cannot submit a proposal with an empty description")]
    InvalidDescription,

    /// Voting window parameter is not positive.
    #[error("{}", .0.as_deref().unwrap_or("voting window is not positive"))]
    InvalidVotingWindow(Option<String>),

    /// No proposal exists under the given identifier.
    #[error("proposal {0} not found")]
    ProposalNotFound(u64),

    /// No vote exists for the given proposal and voter.
    #[error("vote not found")]
    VoteNotFound,

    /// A queue entry references a proposal absent from the proposal store.
    #[error("proposal queue entry references missing proposal {0}")]
    ProposalQueueNotFound(u64),

    /// Deposit below the configured minimum, or an invalid deposit amount.
    #[error("{}", .0.as_deref().unwrap_or("deposit is lower than the minimum"))]
    InsufficientDeposit(Option<String>),

    /// Underlying key-value store failure.
    #[error("store error: {0}")]
    Store(String),

    /// Stored record could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),
}

impl GovError {
    /// Stable machine-checkable code for this error kind.
    pub fn code(&self) -> u16 {
        match self {
            GovError::InvalidOption(_) => 1,
            GovError::InvalidProposalId(_) => 2,
            GovError::VotingPeriodClosed => 3,
            GovError::EmptyProposalQueue => 4,
            GovError::InvalidTitle => 5,
            GovError::InvalidDescription => 6,
            GovError::InvalidVotingWindow(_) => 7,
            GovError::ProposalNotFound(_) => 8,
            GovError::VoteNotFound => 9,
            GovError::ProposalQueueNotFound(_) => 10,
            GovError::InsufficientDeposit(_) => 11,
            GovError::Store(_) => 12,
            GovError::Codec(_) => 13,
        }
    }

    /// Codespace identifying this module.
    pub fn codespace(&self) -> &'static str {
        CODESPACE
    }

    /// True for errors that indicate storage corruption or a logic bug
    /// rather than bad caller input.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            GovError::EmptyProposalQueue
                | GovError::ProposalQueueNotFound(_)
                | GovError::Store(_)
                | GovError::Codec(_)
        )
    }
}

impl From<crate::storage::StoreError> for GovError {
    fn from(err: crate::storage::StoreError) -> Self {
        GovError::Store(err.to_string())
    }
}

impl From<crate::codec::CodecError> for GovError {
    fn from(err: crate::codec::CodecError) -> Self {
        GovError::Codec(err.to_string())
    }
}
