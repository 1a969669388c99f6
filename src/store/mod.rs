//! Record stores over the key-value seam.
//!
//! Thin, namespaced persistence helpers: proposal records plus the
//! monotonic id counter, vote records with per-proposal iteration, and
//! the time-ordered expiry queue. All business logic stays in the engine;
//! these modules only encode, decode, and place records.

pub mod proposals;
pub mod queue;
pub mod votes;
