//! # Membership Flows
//!
//! Exercises the codec and the membership state together:
//!
//! ```text
//! signed bytes ──→ kind()/get_tokens() ──→ overlay.validate() ──→ MutationSet
//!                                                                    │
//!                     CommittedState ◄── incorporate(merge(...)) ◄───┘
//! ```
//!
//! ## Test Categories
//!
//! 1. **Block lifecycle**: validate a batch, commit, validate the next
//! 2. **Sibling candidates**: parallel overlays merged before commit
//! 3. **Delegation**: grant/revoke across pending and committed layers
//! 4. **Failure**: store outages abort instead of rejecting

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ax_01_action_codec::{get_tokens, is_attorney_non_void, kind, ActionKind, DecodeError};
    use ax_02_membership_state::{
        CommittedState, HashVault, MembershipView, MemoryHashVault, MutationSet, Rejection,
        StateError, Verdict,
    };

    use crate::fixtures::{grant, join, key, revoke, update, void};

    const DETAILS: &str = r#"{"name":"Alice","site":"https://alice.example"}"#;

    // =========================================================================
    // BLOCK LIFECYCLE
    // =========================================================================

    #[test]
    fn test_block_commit_then_next_block() {
        let state = CommittedState::in_memory();
        let alice = key(1);
        let bob = key(2);

        let block1 = [join(&alice, "alice", DETAILS), join(&bob, "bob", "{}")];
        let mut overlay = state.validator(1);
        for bytes in &block1 {
            assert!(overlay.validate(bytes).unwrap().is_accepted());
        }
        let delta = overlay.into_mutations();
        assert_eq!(delta.new_members.len(), 2);
        assert_eq!(delta.new_captions.len(), 2);

        let summary = state.incorporate(&delta).unwrap();
        assert_eq!(summary.members_added, 2);
        assert_eq!(summary.captions_added, 2);

        let mut next = state.validator(2);
        assert_eq!(
            next.validate(&join(&key(3), "alice", "{}")).unwrap(),
            Verdict::Rejected(Rejection::HandleTaken)
        );
        assert!(next
            .validate(&update(&alice.token(), &alice, r#"{"name":"A."}"#))
            .unwrap()
            .is_accepted());
        assert!(next.mutations().is_empty());
    }

    #[test]
    fn test_header_prechecks_agree_with_decode() {
        let alice = key(1);
        let bytes = join(&alice, "alice", DETAILS);

        assert_eq!(kind(&bytes), Some(ActionKind::JoinNetwork));
        assert!(is_attorney_non_void(&bytes));
        assert_eq!(get_tokens(&bytes), vec![alice.token()]);

        let outer = void(1, &alice.token(), &alice, b"outer");
        assert_eq!(kind(&outer), Some(ActionKind::Void));
        assert!(!is_attorney_non_void(&outer));
    }

    #[test]
    fn test_duplicate_handle_in_one_block() {
        let state = CommittedState::in_memory();
        let mut overlay = state.validator(1);

        let verdicts = overlay
            .validate_all(
                [join(&key(1), "alice", "{}"), join(&key(2), "alice", "{}")]
                    .iter()
                    .map(Vec::as_slice),
            )
            .unwrap();
        assert!(verdicts[0].is_accepted());
        assert_eq!(verdicts[1], Verdict::Rejected(Rejection::HandleTaken));
    }

    #[test]
    fn test_empty_details_never_admitted() {
        let state = CommittedState::in_memory();
        let mut overlay = state.validator(1);

        let verdict = overlay.validate(&join(&key(1), "alice", "")).unwrap();
        assert_eq!(
            verdict,
            Verdict::Rejected(Rejection::Decode(DecodeError::InvalidDetails))
        );
        assert!(!overlay.has_handle("alice").unwrap());
    }

    // =========================================================================
    // SIBLING CANDIDATES
    // =========================================================================

    #[test]
    fn test_sibling_candidates_merge_revoke_wins() {
        let state = CommittedState::in_memory();
        let alice = key(1);
        let bob = key(2).token();

        // Committed: alice is a member and bob holds her power.
        let mut genesis = state.validator(1);
        genesis.validate(&join(&alice, "alice", "{}")).unwrap();
        genesis.validate(&grant(&alice, &bob)).unwrap();
        state.incorporate(genesis.mutations()).unwrap();

        // Candidate A revokes; candidate B keeps using the delegation.
        let mut a = state.validator(2);
        assert!(a.validate(&revoke(&alice, &bob)).unwrap().is_accepted());
        let mut b = state.validator(2);
        assert!(b
            .validate(&void(2, &alice.token(), &key(2), b"payload"))
            .unwrap()
            .is_accepted());

        let merged = MutationSet::merge([a.mutations(), b.mutations()]);
        state.incorporate(&merged).unwrap();
        assert!(!state.power_of_attorney(&alice.token(), &bob).unwrap());

        let mut after = state.validator(3);
        assert_eq!(
            after
                .validate(&void(3, &alice.token(), &key(2), b"payload"))
                .unwrap(),
            Verdict::Rejected(Rejection::NoPowerOfAttorney)
        );
    }

    #[test]
    fn test_overlay_seeded_with_uncommitted_ancestors() {
        let state = CommittedState::in_memory();
        let alice = key(1);

        let mut parent = state.validator(1);
        parent.validate(&join(&alice, "alice", "{}")).unwrap();
        let parent_delta = parent.into_mutations();

        // The child builds on the parent before the parent is committed.
        let mut child = state.validator_with(2, [&parent_delta]);
        assert!(child.validate(&grant(&alice, &key(2).token())).unwrap().is_accepted());
        assert_eq!(
            child.validate(&join(&alice, "alice-again", "{}")).unwrap(),
            Verdict::Rejected(Rejection::AlreadyMember)
        );
        assert!(!state.has_member(&alice.token()).unwrap());
    }

    #[test]
    fn test_parallel_overlays_share_committed_state() {
        let state = CommittedState::in_memory();
        let mut genesis = state.validator(1);
        for seed in 1..=4u8 {
            genesis
                .validate(&join(&key(seed), &format!("member-{seed}"), "{}"))
                .unwrap();
        }
        state.incorporate(genesis.mutations()).unwrap();

        let deltas: Vec<MutationSet> = std::thread::scope(|scope| {
            let handles: Vec<_> = (1..=4u8)
                .map(|seed| {
                    let state = &state;
                    scope.spawn(move || {
                        let mut overlay = state.validator(2);
                        let verdict = overlay
                            .validate(&grant(&key(seed), &key(seed + 10).token()))
                            .unwrap();
                        assert!(verdict.is_accepted());
                        overlay.into_mutations()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let merged = MutationSet::merge(&deltas);
        assert_eq!(merged.grant_power.len(), 4);
        state.incorporate(&merged).unwrap();
        for seed in 1..=4u8 {
            assert!(state
                .power_of_attorney(&key(seed).token(), &key(seed + 10).token())
                .unwrap());
        }
    }

    // =========================================================================
    // DELEGATION
    // =========================================================================

    #[test]
    fn test_delegation_lifecycle_nets_to_granted() {
        let state = CommittedState::in_memory();
        let alice = key(1);
        let bob = key(2).token();

        let mut overlay = state.validator(1);
        overlay.validate(&join(&alice, "alice", "{}")).unwrap();
        assert!(overlay.validate(&grant(&alice, &bob)).unwrap().is_accepted());
        assert!(overlay.validate(&revoke(&alice, &bob)).unwrap().is_accepted());
        assert!(overlay.validate(&grant(&alice, &bob)).unwrap().is_accepted());
        assert_eq!(
            overlay.validate(&grant(&alice, &bob)).unwrap(),
            Verdict::Rejected(Rejection::GrantExists)
        );

        state.incorporate(overlay.mutations()).unwrap();
        assert!(state.power_of_attorney(&alice.token(), &bob).unwrap());
    }

    #[test]
    fn test_revoke_of_committed_grant_applies_at_commit() {
        let state = CommittedState::in_memory();
        let alice = key(1);
        let bob = key(2);

        let mut genesis = state.validator(1);
        genesis.validate(&join(&alice, "alice", "{}")).unwrap();
        genesis.validate(&grant(&alice, &bob.token())).unwrap();
        state.incorporate(genesis.mutations()).unwrap();

        let mut overlay = state.validator(2);
        assert!(overlay.validate(&revoke(&alice, &bob.token())).unwrap().is_accepted());
        // Committed grant stays visible until the revoke is incorporated.
        assert!(overlay
            .validate(&update(&alice.token(), &bob, "{}"))
            .unwrap()
            .is_accepted());

        state.incorporate(overlay.mutations()).unwrap();
        let mut next = state.validator(3);
        assert_eq!(
            next.validate(&update(&alice.token(), &bob, "{}")).unwrap(),
            Verdict::Rejected(Rejection::NoPowerOfAttorney)
        );
        assert!(next.validate(&grant(&alice, &bob.token())).unwrap().is_accepted());
    }

    #[test]
    fn test_void_epoch_guard_end_to_end() {
        let state = CommittedState::in_memory();
        let alice = key(1);
        let mut overlay = state.validator(7);
        overlay.validate(&join(&alice, "alice", "{}")).unwrap();

        assert!(overlay
            .validate(&void(7, &alice.token(), &alice, b"ok"))
            .unwrap()
            .is_accepted());
        assert_eq!(
            overlay
                .validate(&void(8, &alice.token(), &alice, b"early"))
                .unwrap(),
            Verdict::Rejected(Rejection::FutureEpoch {
                action: 8,
                current: 7
            })
        );
    }

    // =========================================================================
    // FAILURE
    // =========================================================================

    #[test]
    fn test_store_outage_aborts_pass() {
        let attorneys = Arc::new(MemoryHashVault::new());
        let state = CommittedState::from_vaults(
            Arc::new(MemoryHashVault::new()),
            Arc::new(MemoryHashVault::new()),
            Arc::clone(&attorneys),
        );
        let alice = key(1);
        let mut overlay = state.validator(1);
        overlay.validate(&join(&alice, "alice", "{}")).unwrap();

        attorneys.close().unwrap();
        let err = overlay
            .validate(&grant(&alice, &key(2).token()))
            .unwrap_err();
        assert!(matches!(err, StateError::StoreUnavailable { vault: "poa", .. }));
        assert!(overlay.mutations().grant_power.is_empty());
    }

    mod fuzz {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_arbitrary_bytes_never_mutate(data in prop::collection::vec(any::<u8>(), 0..256)) {
                let state = CommittedState::in_memory();
                let mut overlay = state.validator(u64::MAX);
                let verdict = overlay.validate(&data).unwrap();
                prop_assert!(!verdict.is_accepted());
                prop_assert!(overlay.mutations().is_empty());
            }
        }
    }
}
