//! Property-based tests for the route guard.

use finops_core::guard::{GuardDecision, GuardState};
use finops_shared::{Role, Session};
use proptest::prelude::*;

use crate::context::AppContext;
use crate::guard::RouteGuard;

fn arb_entity_id() -> impl Strategy<Value = String> {
    "[a-z0-9][a-z0-9-]{0,19}"
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Owner),
        Just(Role::Approver),
        Just(Role::Preparer),
        Just(Role::Auditor),
        "[A-Z][a-z]{2,10}".prop_map(|s| Role::parse(&s)),
    ]
}

/// Protected paths outside the onboarding subtree.
fn arb_protected_path() -> impl Strategy<Value = String> {
    let segment = "[a-z0-9-]{1,12}".prop_filter("onboarding", |s| s != "onboarding");
    (segment, prop::collection::vec("[a-z0-9-]{1,12}", 0..3), any::<bool>()).prop_map(
        |(first, rest, trailing)| {
            let mut path = format!("/app/{first}");
            for seg in rest {
                path.push('/');
                path.push_str(&seg);
            }
            if trailing {
                path.push('/');
            }
            path
        },
    )
}

fn arb_path() -> impl Strategy<Value = String> {
    prop_oneof![Just("/app".to_string()), Just("/app/".to_string()), arb_protected_path()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A signed-in entity with no compliance record is sent to onboarding
    /// from every protected path.
    #[test]
    fn prop_missing_record_redirects_onboarding(
        entity in arb_entity_id(),
        role in arb_role(),
        path in arb_path(),
    ) {
        let mut ctx = AppContext::in_memory();
        ctx.sessions()
            .login(Session::new("u1", "u1@finops.dev", role, entity.as_str()), false)
            .unwrap();

        let mut guard = RouteGuard::new();
        let decision = guard.navigate(&mut ctx, &path);
        prop_assert_eq!(decision, GuardDecision::RedirectOnboarding);
        prop_assert_eq!(guard.state(), GuardState::Decided(GuardDecision::RedirectOnboarding));
        prop_assert_eq!(guard.path(), Some(path.as_str()));
    }

    /// Without a session every protected path redirects home and nothing is
    /// provisioned.
    #[test]
    fn prop_no_session_redirects_home(path in arb_path()) {
        let mut ctx = AppContext::in_memory();
        let decision = RouteGuard::new().navigate(&mut ctx, &path);
        prop_assert_eq!(decision, GuardDecision::RedirectHome);
        prop_assert!(ctx.session().is_none());
    }
}
