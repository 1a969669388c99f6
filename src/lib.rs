//! Caucus - deterministic proposal voting engine for replicated ledgers.
//!
//! Proposals with minimum deposits and bounded voting windows, per-option
//! votes with last-vote-wins overwrite, and a time-ordered queue that
//! drives tallies at window expiry.
//!
//! Key principles:
//! - Deterministic: logical time is a caller argument, tallies use
//!   integer ratio comparisons, stores iterate in byte order
//! - Single writer: the engine is the only component that mutates the
//!   proposal store, vote store, and queue
//! - No partial writes: every operation either completes or leaves state
//!   untouched; corruption surfaces as a fatal error, never a retry
//!
//! The surrounding ledger runtime, transaction surface, balance
//! bookkeeping, and CLI are external collaborators behind the `KvStore`
//! and `Escrow` seams.

pub mod codec;
pub mod engine;
pub mod error;
pub mod params;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
mod proptests;

pub use engine::escrow::{Escrow, MemoryEscrow, NoopEscrow};
pub use engine::tally::TallyPolicy;
pub use engine::GovEngine;
pub use error::{GovError, GovResult, CODESPACE};
pub use params::{parse_voting_window, GovParams};
pub use storage::{KvStore, MemoryStore, StoreError};
pub use types::{
    parse_proposal_id, AccountId, Proposal, ProposalId, ProposalStatus, TallyResult, Vote,
    VoteOption,
};
