//! Property-based tests for WorkflowService.
//!
//! Random sequences of actions are applied to orders to check the lifecycle
//! guarantees: terminal orders never change, the audit trail only grows and
//! maker-checker cannot be satisfied by the maker's own role.

use chrono::Utc;
use finops_shared::types::EntityId;
use finops_shared::{Role, Session};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::workflow::error::WorkflowError;
use crate::workflow::order::{Order, OrderDraft};
use crate::workflow::policy::{CreditRating, Policy};
use crate::workflow::service::WorkflowService;
use crate::workflow::types::OrderStatus;

#[derive(Debug, Clone)]
enum Action {
    Submit(usize),
    Approve(usize),
    Reject(usize),
    Cancel(usize),
    Settle,
}

fn actors() -> Vec<Session> {
    vec![
        Session::new("owner", "owner@finops.dev", Role::Owner, "entity-001"),
        Session::new("approver", "approver@finops.dev", Role::Approver, "entity-001"),
        Session::new("preparer-1", "p1@finops.dev", Role::Preparer, "entity-001"),
        Session::new("preparer-2", "p2@finops.dev", Role::Preparer, "entity-001"),
        Session::new("auditor", "auditor@finops.dev", Role::Auditor, "entity-001"),
    ]
}

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Owner),
        Just(Role::Approver),
        Just(Role::Preparer),
        Just(Role::Auditor),
        "[A-Z][a-z]{2,8}".prop_map(Role::Other),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    let actor = 0usize..5;
    prop_oneof![
        actor.clone().prop_map(Action::Submit),
        actor.clone().prop_map(Action::Approve),
        actor.clone().prop_map(Action::Reject),
        actor.prop_map(Action::Cancel),
        Just(Action::Settle),
    ]
}

/// Amounts straddling the threshold of 100 000.00.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..20_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn new_order(amount: Decimal, maker: &Session) -> Order {
    Order::create(
        OrderDraft {
            entity_id: EntityId::new("entity-001"),
            instrument_slug: "cp-acme-90d".to_string(),
            rating: CreditRating::AaPlus,
            amount,
            expected_yield: Decimal::new(785, 2),
            tenor_days: 90,
        },
        maker.user_id.clone(),
        maker.role.clone(),
        Utc::now(),
    )
}

fn policy() -> Policy {
    Policy {
        maker_checker_threshold: Decimal::new(100_000, 0),
        ..Policy::default()
    }
}

fn apply(order: &mut Order, action: &Action, people: &[Session]) -> Result<(), WorkflowError> {
    let now = Utc::now();
    match action {
        Action::Submit(i) => WorkflowService::submit(order, &policy(), &people[*i], now).map(drop),
        Action::Approve(i) => WorkflowService::approve(order, &people[*i], now).map(drop),
        Action::Reject(i) => {
            WorkflowService::reject(order, &people[*i], "outside mandate", now).map(drop)
        }
        Action::Cancel(i) => WorkflowService::cancel(order, &people[*i], now).map(drop),
        Action::Settle => WorkflowService::settle(order, now).map(drop),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every status change follows a valid transition and the audit trail
    /// is append-only: earlier events are never altered.
    #[test]
    fn prop_transitions_valid_and_events_append_only(
        amount in arb_amount(),
        maker in 0usize..5,
        actions in prop::collection::vec(arb_action(), 1..12),
    ) {
        let people = actors();
        let mut order = new_order(amount, &people[maker]);

        for action in &actions {
            let before = order.clone();
            match apply(&mut order, action, &people) {
                Ok(()) => {
                    prop_assert!(order.events.len() > before.events.len());
                    prop_assert_eq!(&order.events[..before.events.len()], &before.events[..]);
                    if order.status != before.status {
                        prop_assert!(WorkflowService::is_valid_transition(before.status, order.status));
                    }
                }
                Err(_) => prop_assert_eq!(&order, &before),
            }
        }
    }

    /// Once terminal, every action fails with TerminalState and nothing changes.
    #[test]
    fn prop_terminal_orders_are_frozen(
        actions in prop::collection::vec(arb_action(), 1..8),
    ) {
        let people = actors();
        let mut order = new_order(Decimal::new(5_000, 0), &people[2]);
        WorkflowService::cancel(&mut order, &people[2], Utc::now()).unwrap();
        let frozen = order.clone();

        for action in &actions {
            let result = apply(&mut order, action, &people);
            prop_assert!(
                matches!(result, Err(WorkflowError::TerminalState { .. })),
                "terminal order accepted {:?}: {:?}",
                action,
                result
            );
            prop_assert_eq!(&order, &frozen);
        }
    }

    /// An order at or above the threshold never reaches Approved through
    /// approvals that all share the maker's role.
    #[test]
    fn prop_same_role_approvals_stay_pending(
        amount in (100_000i64..10_000_000).prop_map(|v| Decimal::new(v, 0)),
        approvers in 1usize..6,
    ) {
        let maker = Session::new("maker", "m@finops.dev", Role::Preparer, "entity-001");
        let mut order = new_order(amount, &maker);
        WorkflowService::submit(&mut order, &policy(), &maker, Utc::now()).unwrap();

        for i in 0..approvers {
            let peer = Session::new(format!("peer-{i}"), "peer@finops.dev", Role::Preparer, "entity-001");
            let status = WorkflowService::approve(&mut order, &peer, Utc::now()).unwrap();
            prop_assert_eq!(status, OrderStatus::PendingApproval);
        }
        prop_assert_eq!(order.approvals.len(), approvers);
    }

    /// Only Owner and Approver may reject; only Owner and Preparer may submit.
    #[test]
    fn prop_role_permissions_enforced(role in arb_role()) {
        let maker = Session::new("maker", "m@finops.dev", Role::Preparer, "entity-001");
        let actor = Session::new("actor", "a@finops.dev", role.clone(), "entity-001");

        let mut fresh = new_order(Decimal::new(10, 0), &maker);
        let submitted = WorkflowService::submit(&mut fresh, &policy(), &actor, Utc::now());
        prop_assert_eq!(submitted.is_ok(), role.can_prepare());

        let mut pending = new_order(Decimal::new(500_000, 0), &maker);
        WorkflowService::submit(&mut pending, &policy(), &maker, Utc::now()).unwrap();
        let rejected = WorkflowService::reject(&mut pending, &actor, "limit", Utc::now());
        prop_assert_eq!(rejected.is_ok(), role.can_check());
    }
}
