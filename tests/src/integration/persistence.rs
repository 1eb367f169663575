//! # Persistence Flows
//!
//! Committed state opened from [`StateConfig`], surviving a restart. The
//! RocksDB cases need `--features rocksdb`.

#[cfg(test)]
mod tests {
    use ax_02_membership_state::{CommittedState, MembershipView, MutationSet, StateConfig};

    use crate::fixtures::{grant, join, key};

    #[test]
    fn test_in_memory_config_starts_empty() {
        let state = CommittedState::open(&StateConfig::for_testing(None)).unwrap();
        assert!(!state.has_handle("alice").unwrap());
        state.shutdown().unwrap();
    }

    #[test]
    fn test_mutation_set_ships_as_json() {
        let state = CommittedState::in_memory();
        let alice = key(1);
        let mut overlay = state.validator(1);
        overlay.validate(&join(&alice, "alice", "{}")).unwrap();
        overlay.validate(&grant(&alice, &key(2).token())).unwrap();

        let wire = serde_json::to_string(overlay.mutations()).unwrap();
        let shipped: MutationSet = serde_json::from_str(&wire).unwrap();
        assert_eq!(&shipped, overlay.mutations());

        let replica = CommittedState::in_memory();
        replica.incorporate(&shipped).unwrap();
        assert!(replica.has_member(&alice.token()).unwrap());
        assert!(replica.power_of_attorney(&alice.token(), &key(2).token()).unwrap());
    }

    #[cfg(feature = "rocksdb")]
    #[test]
    fn test_rocksdb_state_survives_restart() {
        use ax_02_membership_state::{Rejection, Verdict};

        let dir = tempfile::TempDir::new().unwrap();
        let config = StateConfig::for_testing(Some(dir.path().to_path_buf()));
        let alice = key(1);

        {
            let state = CommittedState::open(&config).unwrap();
            let mut overlay = state.validator(1);
            overlay.validate(&join(&alice, "alice", "{}")).unwrap();
            overlay.validate(&grant(&alice, &key(2).token())).unwrap();
            let delta = overlay.into_mutations();
            state.incorporate(&delta).unwrap();
            state.shutdown().unwrap();
        }

        let state = CommittedState::open(&config).unwrap();
        assert!(state.has_member(&alice.token()).unwrap());
        assert!(state.power_of_attorney(&alice.token(), &key(2).token()).unwrap());

        let mut overlay = state.validator(2);
        assert_eq!(
            overlay.validate(&join(&key(3), "alice", "{}")).unwrap(),
            Verdict::Rejected(Rejection::HandleTaken)
        );
    }

    #[cfg(not(feature = "rocksdb"))]
    #[test]
    fn test_data_dir_requires_rocksdb_feature() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StateConfig::for_testing(Some(dir.path().to_path_buf()));
        assert!(CommittedState::open(&config).is_err());
    }
}
