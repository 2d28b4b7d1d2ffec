//! Property-based tests for LedgerEngine.

use chrono::Utc;
use finops_shared::types::{EntityId, LedgerEntryId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::ledger::balance::LedgerEngine;
use crate::ledger::entry::{EntryType, LedgerEntry, LedgerStatus};

/// Strategy for generating random positive Decimal amounts.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_entry_type() -> impl Strategy<Value = EntryType> {
    prop_oneof![Just(EntryType::Credit), Just(EntryType::Debit)]
}

fn arb_status() -> impl Strategy<Value = LedgerStatus> {
    prop_oneof![
        Just(LedgerStatus::Credited),
        Just(LedgerStatus::InSettlement),
        Just(LedgerStatus::Failed),
    ]
}

fn arb_entity() -> impl Strategy<Value = EntityId> {
    prop_oneof![
        Just(EntityId::new("entity-001")),
        Just(EntityId::new("urban-threads")),
    ]
}

fn arb_entry() -> impl Strategy<Value = LedgerEntry> {
    (arb_entity(), arb_entry_type(), arb_amount(), arb_status()).prop_map(
        |(entity_id, entry_type, amount, status)| LedgerEntry {
            id: LedgerEntryId::new(),
            entity_id,
            entry_type,
            method: "NEFT".to_string(),
            amount,
            utr: None,
            ts: Utc::now(),
            status,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Available cash is never negative, whatever the mix of entries.
    #[test]
    fn prop_available_never_negative(entries in prop::collection::vec(arb_entry(), 0..40)) {
        for entity in ["entity-001", "urban-threads"] {
            let balances = LedgerEngine::compute_balances(&EntityId::new(entity), &entries, &[]);
            prop_assert!(balances.available >= Decimal::ZERO);
            prop_assert!(balances.in_settlement >= Decimal::ZERO);
        }
    }

    /// Two computations over the same snapshot agree.
    #[test]
    fn prop_compute_is_idempotent(entries in prop::collection::vec(arb_entry(), 0..40)) {
        let entity = EntityId::new("entity-001");
        let first = LedgerEngine::compute_balances(&entity, &entries, &[]);
        let second = LedgerEngine::compute_balances(&entity, &entries, &[]);
        prop_assert_eq!(first, second);
    }

    /// Available equals cleared credits minus pending debits, floored at zero.
    #[test]
    fn prop_available_matches_formula(entries in prop::collection::vec(arb_entry(), 0..40)) {
        let entity = EntityId::new("urban-threads");
        let credits: Decimal = entries
            .iter()
            .filter(|e| e.entity_id == entity && e.is_cleared_credit())
            .map(|e| e.amount)
            .sum();
        let pending: Decimal = entries
            .iter()
            .filter(|e| e.entity_id == entity && e.is_pending_debit())
            .map(|e| e.amount)
            .sum();

        let balances = LedgerEngine::compute_balances(&entity, &entries, &[]);
        prop_assert_eq!(balances.in_settlement, pending);
        prop_assert_eq!(balances.available, (credits - pending).max(Decimal::ZERO));
    }

    /// Entry order does not affect the result.
    #[test]
    fn prop_order_independent(entries in prop::collection::vec(arb_entry(), 0..40)) {
        let entity = EntityId::new("entity-001");
        let mut reversed = entries.clone();
        reversed.reverse();
        prop_assert_eq!(
            LedgerEngine::compute_balances(&entity, &entries, &[]),
            LedgerEngine::compute_balances(&entity, &reversed, &[])
        );
    }
}
