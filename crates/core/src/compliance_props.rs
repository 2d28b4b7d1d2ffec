//! Property-based tests for compliance record serialization.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use serde_json::json;

use crate::compliance::{ComplianceRecord, ComplianceStatus};

fn arb_ts() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| DateTime::from_timestamp(secs, nanos).unwrap())
}

/// Statuses including stored values this build does not know.
fn arb_status() -> impl Strategy<Value = ComplianceStatus> {
    prop_oneof![
        Just(ComplianceStatus::Draft),
        Just(ComplianceStatus::Submitted),
        Just(ComplianceStatus::UnderReview),
        Just(ComplianceStatus::Approved),
        Just(ComplianceStatus::Rejected),
        ".{0,16}"
            .prop_filter("known status", |s| {
                matches!(ComplianceStatus::parse(s), ComplianceStatus::Unknown(_))
            })
            .prop_map(ComplianceStatus::Unknown),
    ]
}

fn arb_record() -> impl Strategy<Value = ComplianceRecord> {
    (
        arb_status(),
        arb_ts(),
        prop::option::of(("[A-Za-z ]{1,24}", "[A-Z0-9]{10}").prop_map(|(name, pan)| {
            json!({ "legalName": name, "pan": pan })
        })),
        prop::option::of(arb_ts()),
    )
        .prop_map(|(status, ts, entity_data, approved_at)| ComplianceRecord {
            status,
            ts,
            entity_data,
            approved_at,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Records survive a JSON round trip unchanged.
    #[test]
    fn prop_record_json_round_trip(record in arb_record()) {
        let raw = serde_json::to_string(&record).unwrap();
        let back: ComplianceRecord = serde_json::from_str(&raw).unwrap();
        prop_assert_eq!(back, record);
    }

    /// Only the exact `Approved` status grants access.
    #[test]
    fn prop_only_approved_grants_access(status in arb_status()) {
        prop_assert_eq!(status.is_approved(), status == ComplianceStatus::Approved);
    }
}
