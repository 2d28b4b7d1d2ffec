//! Property-based tests for SessionManager.
//!
//! Arbitrary sequences of sign-ins and sign-outs must never leave the
//! session in both tiers, and a fresh manager must hydrate the last session
//! written.

use finops_shared::{Role, Session};
use proptest::prelude::*;

use crate::keys;
use crate::session::SessionManager;
use crate::tiered::{StorageTier, TieredStore};

#[derive(Debug, Clone)]
enum Op {
    Set { user: u8, persist: bool },
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<u8>(), any::<bool>()).prop_map(|(user, persist)| Op::Set { user, persist }),
        1 => Just(Op::Clear),
    ]
}

fn session_for(user: u8) -> Session {
    Session::new(
        format!("user-{user}"),
        format!("user-{user}@finops.dev"),
        Role::Preparer,
        "entity-001",
    )
}

fn stored(store: &TieredStore, tier: StorageTier) -> bool {
    store
        .backend(tier)
        .get(&store.key(keys::SESSION))
        .map(|v| v.is_some())
        .unwrap_or(false)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// At most one tier holds the session, and it is the tier last written.
    #[test]
    fn prop_session_in_at_most_one_tier(ops in prop::collection::vec(arb_op(), 1..20)) {
        let store = TieredStore::in_memory();
        let mut manager = SessionManager::new(store.clone());
        let mut expected: Option<(Session, StorageTier)> = None;

        for op in ops {
            match op {
                Op::Set { user, persist } => {
                    manager.set_session(session_for(user), persist).unwrap();
                    expected = Some((session_for(user), StorageTier::for_persist(persist)));
                }
                Op::Clear => {
                    manager.clear_session().unwrap();
                    expected = None;
                }
            }

            let durable = stored(&store, StorageTier::Durable);
            let ephemeral = stored(&store, StorageTier::Ephemeral);
            prop_assert!(!(durable && ephemeral));
            prop_assert_eq!(manager.stored_tier(), expected.as_ref().map(|(_, t)| *t));
        }

        let mut fresh = SessionManager::new(store);
        prop_assert_eq!(fresh.hydrate(), expected.map(|(s, _)| s));
    }
}
