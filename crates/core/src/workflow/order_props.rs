//! Property-based tests for order serialization.

use chrono::{DateTime, NaiveDate, Utc};
use finops_shared::Role;
use finops_shared::types::{EntityId, OrderId, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::workflow::order::Order;
use crate::workflow::policy::CreditRating;
use crate::workflow::types::{Approval, OrderEvent, OrderEventKind, OrderStatus};

fn arb_ts() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| DateTime::from_timestamp(secs, nanos).unwrap())
}

/// Roles including strings this build does not know.
fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Owner),
        Just(Role::Approver),
        Just(Role::Preparer),
        Just(Role::Auditor),
        "[A-Za-z][A-Za-z ]{0,15}"
            .prop_filter("known role", |s| matches!(Role::parse(s), Role::Other(_)))
            .prop_map(Role::Other),
    ]
}

fn arb_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::Created),
        Just(OrderStatus::Submitted),
        Just(OrderStatus::PendingApproval),
        Just(OrderStatus::Approved),
        Just(OrderStatus::Settled),
        Just(OrderStatus::Rejected),
        Just(OrderStatus::Cancelled),
    ]
}

fn arb_rating() -> impl Strategy<Value = CreditRating> {
    prop_oneof![
        Just(CreditRating::BbbMinus),
        Just(CreditRating::A),
        Just(CreditRating::AaMinus),
        Just(CreditRating::Aa),
        Just(CreditRating::AaPlus),
        Just(CreditRating::Aaa),
    ]
}

fn arb_decimal() -> impl Strategy<Value = Decimal> {
    (1i64..i64::MAX, 0u32..=4).prop_map(|(n, scale)| Decimal::new(n, scale))
}

fn arb_approval() -> impl Strategy<Value = Approval> {
    ("[a-z0-9-]{1,12}", arb_role(), arb_ts()).prop_map(|(user, role, ts)| Approval {
        user_id: UserId::new(user),
        role,
        ts,
    })
}

fn arb_event() -> impl Strategy<Value = OrderEvent> {
    (
        arb_ts(),
        prop_oneof![
            Just(OrderEventKind::Created),
            Just(OrderEventKind::SentForApproval),
            Just(OrderEventKind::ApprovalRecorded),
            Just(OrderEventKind::Rejected),
            Just(OrderEventKind::Settled),
        ],
        prop::option::of("[a-z0-9-]{1,12}"),
        prop::option::of(".{0,24}"),
    )
        .prop_map(|(ts, kind, by, note)| OrderEvent {
            ts,
            kind,
            by: by.map(UserId::new),
            note,
        })
}

fn arb_order() -> impl Strategy<Value = Order> {
    (
        ("[a-z0-9-]{1,16}", "[a-z0-9-]{1,24}", arb_rating()),
        (arb_decimal(), arb_decimal(), 1u32..=36_500),
        (arb_status(), "[a-z0-9-]{1,12}", arb_role()),
        prop::collection::vec(arb_approval(), 0..4),
        0i32..100_000,
        prop::collection::vec(arb_event(), 0..6),
        arb_ts(),
    )
        .prop_map(
            |(
                (entity, slug, rating),
                (amount, expected_yield, tenor_days),
                (status, maker, created_by_role),
                approvals,
                day_offset,
                events,
                created_at,
            )| Order {
                id: OrderId::new(),
                entity_id: EntityId::new(entity),
                instrument_slug: slug,
                rating,
                amount,
                expected_yield,
                tenor_days,
                status,
                created_by: UserId::new(maker),
                created_by_role,
                approvals,
                settlement_date: NaiveDate::from_num_days_from_ce_opt(700_000 + day_offset)
                    .unwrap(),
                events,
                created_at,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Orders survive a JSON round trip unchanged, unknown roles included.
    #[test]
    fn prop_order_json_round_trip(order in arb_order()) {
        let raw = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&raw).unwrap();
        prop_assert_eq!(back, order);
    }

    /// Unknown roles are written back verbatim.
    #[test]
    fn prop_role_kept_verbatim(role in arb_role()) {
        let json = serde_json::to_value(&role).unwrap();
        prop_assert_eq!(json.as_str(), Some(role.as_str()));
        let back: Role = serde_json::from_value(json).unwrap();
        prop_assert_eq!(back, role);
    }

    /// Tenors within the hard ceiling always have a maturity date.
    #[test]
    fn prop_maturity_defined_for_bounded_tenor(order in arb_order()) {
        let maturity = order.maturity_date();
        prop_assert!(maturity.is_some());
        prop_assert!(maturity.unwrap() > order.settlement_date);
    }
}
