//! Tally policy.
//!
//! Thresholds are integer ratios compared by cross-multiplication, never
//! floats: every replica must reach the same verdict from the same
//! counts, and float rounding is not a contract.

use crate::types::{ProposalStatus, TallyResult};
use serde::{Deserialize, Serialize};

/// Pass/veto thresholds for deciding a tally.
///
/// A proposal passes when `yes` votes are strictly more than
/// `pass_num/pass_den` of the non-abstain votes AND veto votes are
/// strictly fewer than `veto_num/veto_den` of all cast votes. A proposal
/// with zero votes is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyPolicy {
    pub pass_num: u64,
    pub pass_den: u64,
    pub veto_num: u64,
    pub veto_den: u64,
}

impl Default for TallyPolicy {
    /// Simple majority of non-abstain votes, one-third veto bar.
    fn default() -> Self {
        Self {
            pass_num: 1,
            pass_den: 2,
            veto_num: 1,
            veto_den: 3,
        }
    }
}

impl TallyPolicy {
    /// Decide a terminal status from final vote counts.
    pub fn decide(&self, tally: &TallyResult) -> ProposalStatus {
        let total = tally.total();
        if total == 0 {
            return ProposalStatus::Rejected;
        }

        // veto blocks when no_with_veto / total >= veto_num / veto_den
        let vetoed = tally.no_with_veto * self.veto_den >= total * self.veto_num;
        // passes when yes / non_abstain > pass_num / pass_den
        let majority = tally.yes * self.pass_den > tally.non_abstain() * self.pass_num;

        if majority && !vetoed {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Rejected
        }
    }
}
