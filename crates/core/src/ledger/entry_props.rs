//! Property-based tests for ledger entry serialization.

use chrono::{DateTime, Utc};
use finops_shared::types::{EntityId, LedgerEntryId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::ledger::entry::{EntryType, LedgerEntry, LedgerStatus};

fn arb_ts() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| DateTime::from_timestamp(secs, nanos).unwrap())
}

/// Statuses including stored values this build does not know.
fn arb_status() -> impl Strategy<Value = LedgerStatus> {
    prop_oneof![
        Just(LedgerStatus::Credited),
        Just(LedgerStatus::InSettlement),
        Just(LedgerStatus::Failed),
        "[A-Za-z][A-Za-z -]{0,15}"
            .prop_filter("known status", |s| {
                matches!(LedgerStatus::parse(s), LedgerStatus::Other(_))
            })
            .prop_map(LedgerStatus::Other),
    ]
}

fn arb_entry() -> impl Strategy<Value = LedgerEntry> {
    (
        "[a-z0-9-]{1,16}",
        prop_oneof![Just(EntryType::Credit), Just(EntryType::Debit)],
        "[A-Z]{2,6}",
        (1i64..i64::MAX, 0u32..=4),
        prop::option::of("[A-Z0-9]{6,22}"),
        arb_ts(),
        arb_status(),
    )
        .prop_map(|(entity, entry_type, method, (n, scale), utr, ts, status)| LedgerEntry {
            id: LedgerEntryId::new(),
            entity_id: EntityId::new(entity),
            entry_type,
            method,
            amount: Decimal::new(n, scale),
            utr,
            ts,
            status,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Entries survive a JSON round trip unchanged.
    #[test]
    fn prop_entry_json_round_trip(entry in arb_entry()) {
        let raw = serde_json::to_string(&entry).unwrap();
        let back: LedgerEntry = serde_json::from_str(&raw).unwrap();
        prop_assert_eq!(back, entry);
    }

    /// Unknown statuses are written back verbatim.
    #[test]
    fn prop_unknown_status_kept_verbatim(status in arb_status()) {
        let json = serde_json::to_value(&status).unwrap();
        prop_assert_eq!(json.as_str(), Some(status.as_str()));
        let back: LedgerStatus = serde_json::from_value(json).unwrap();
        prop_assert_eq!(back, status);
    }
}
