//! Property-based tests for the governance engine.
//!
//! Tests for:
//! - Identifier allocation: strictly increasing, gapless, unaffected by
//!   failed submissions
//! - Voting: last vote wins, one record per voter
//! - Queue: pop order equals (end time, id) order for any insertion order
//! - Codec: round-trip stability and byte determinism
//! - Replay: identical operation sequences produce identical stores

use crate::engine::escrow::NoopEscrow;
use crate::params::GovParams;
use crate::storage::{KvStore, MemoryStore};
use crate::store::queue;
use crate::types::{Proposal, ProposalStatus, TallyResult};
use crate::{codec, GovEngine, TallyPolicy, VoteOption};
use proptest::prelude::*;
use std::collections::HashMap;

fn test_engine() -> GovEngine<MemoryStore, NoopEscrow> {
    GovEngine::new(
        MemoryStore::new(),
        NoopEscrow,
        GovParams {
            min_deposit: 10,
            voting_window_secs: 100,
        },
    )
    .unwrap()
}

fn option_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("yes"),
        Just("no"),
        Just("abstain"),
        Just("no_with_veto"),
    ]
}

proptest! {
    /// Property: successful submissions receive consecutive ids starting
    /// at 1, no matter how many invalid attempts are interleaved.
    #[test]
    fn ids_are_gapless_across_failed_attempts(
        attempts in prop::collection::vec(any::<bool>(), 1..50),
    ) {
        let mut engine = test_engine();
        let mut expected = 1u64;

        for valid in attempts {
            if valid {
                let id = engine
                    .submit_proposal("title", "description", "alice".into(), 10, 0)
                    .unwrap();
                prop_assert_eq!(id, expected);
                expected += 1;
            } else {
                // deposit below minimum: rejected, id not consumed
                prop_assert!(engine
                    .submit_proposal("title", "description", "alice".into(), 9, 0)
                    .is_err());
            }
        }
    }

    /// Property: after any vote sequence, each voter has exactly one
    /// recorded vote, and it is their last one.
    #[test]
    fn last_vote_wins(
        casts in prop::collection::vec((0u8..5, option_strategy()), 1..60),
    ) {
        let mut engine = test_engine();
        let id = engine
            .submit_proposal("title", "description", "alice".into(), 10, 0)
            .unwrap();

        let mut expected: HashMap<String, &str> = HashMap::new();
        for (voter_idx, option) in casts {
            let voter = format!("voter-{voter_idx}");
            engine.cast_vote(id, voter.as_str().into(), option, 1).unwrap();
            expected.insert(voter, option);
        }

        let votes = engine.list_votes(id).unwrap();
        prop_assert_eq!(votes.len(), expected.len());
        for vote in votes {
            let want = VoteOption::parse(expected[vote.voter.as_str()]).unwrap();
            prop_assert_eq!(vote.option, want);
        }
    }

    /// Property: queue pop order is (end time, id) ascending regardless
    /// of insertion order.
    #[test]
    fn queue_pops_in_expiry_order(
        mut entries in prop::collection::btree_set((0u64..1000, 1u64..1000), 1..40),
    ) {
        let mut kv = MemoryStore::new();
        for &(end, id) in &entries {
            queue::insert(&mut kv, end, id).unwrap();
        }

        let mut popped = Vec::new();
        while queue::peek(&kv).unwrap().is_some() {
            popped.push(queue::pop_front(&mut kv).unwrap());
        }

        let sorted: Vec<_> = std::mem::take(&mut entries).into_iter().collect();
        prop_assert_eq!(popped, sorted);
    }

    /// Property: CBOR encoding round-trips and identical values encode
    /// to identical bytes.
    #[test]
    fn codec_roundtrip_is_stable(
        title in ".{1,40}",
        description in ".{1,80}",
        deposit in 1u64..1_000_000,
        submit_time in 0u64..u32::MAX as u64,
        window in 1u64..u32::MAX as u64,
    ) {
        let proposal = Proposal {
            id: 1,
            title,
            description,
            proposer: "alice".into(),
            deposit,
            submit_time,
            voting_end_time: submit_time + window,
            status: ProposalStatus::Active,
            tally: None,
        };
        let bytes = codec::encode(&proposal).unwrap();
        let recovered: Proposal = codec::decode(&bytes).unwrap();
        prop_assert_eq!(&recovered, &proposal);
        prop_assert_eq!(codec::encode(&recovered).unwrap(), bytes);
    }

    /// Property: the default tally never passes without a strict yes
    /// majority of non-abstain votes, and never passes under a one-third
    /// veto share.
    #[test]
    fn tally_thresholds_hold(
        yes in 0u64..200,
        no in 0u64..200,
        abstain in 0u64..200,
        no_with_veto in 0u64..200,
    ) {
        let tally = TallyResult { yes, no, abstain, no_with_veto };
        let status = TallyPolicy::default().decide(&tally);

        if status == ProposalStatus::Passed {
            prop_assert!(yes * 2 > tally.non_abstain());
            prop_assert!(no_with_veto * 3 < tally.total());
        } else if tally.total() > 0 {
            prop_assert!(yes * 2 <= tally.non_abstain() || no_with_veto * 3 >= tally.total());
        }
    }

    /// Property: two engines fed the same ordered operations reach
    /// byte-identical stores.
    #[test]
    fn replay_reaches_identical_state(
        casts in prop::collection::vec((0u8..6, option_strategy()), 0..40),
        step in 1u64..300,
    ) {
        let mut a = test_engine();
        let mut b = test_engine();

        for engine in [&mut a, &mut b] {
            engine.process_expired(0).unwrap();
            let id = engine
                .submit_proposal("title", "description", "alice".into(), 10, 0)
                .unwrap();
            for (voter_idx, option) in &casts {
                let voter = format!("voter-{voter_idx}");
                engine
                    .cast_vote(id, voter.as_str().into(), option, 1)
                    .unwrap();
            }
            engine.process_expired(step).unwrap();
        }

        prop_assert_eq!(a.store(), b.store());
        prop_assert_eq!(
            a.store().scan_prefix(b"").unwrap(),
            b.store().scan_prefix(b"").unwrap()
        );
    }
}
