//! Ledger entry domain types.

use chrono::{DateTime, Utc};
use finops_shared::types::{EntityId, LedgerEntryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    /// Money in (deposit).
    Credit,
    /// Money out (withdrawal, investment funding).
    Debit,
}

/// Settlement status of a ledger entry.
///
/// Stored as a plain string; unrecognised values are preserved in `Other`
/// and never count towards any balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LedgerStatus {
    /// Funds have cleared.
    Credited,
    /// Funds are moving and not yet cleared.
    InSettlement,
    /// The movement failed.
    Failed,
    /// A stored status value this build does not know.
    Other(String),
}

impl LedgerStatus {
    /// Parses a status. Matching is exact.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Credited" => Self::Credited,
            "In-Settlement" => Self::InSettlement,
            "Failed" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Credited => "Credited",
            Self::InSettlement => "In-Settlement",
            Self::Failed => "Failed",
            Self::Other(raw) => raw,
        }
    }

    /// Returns true once the entry can no longer change.
    #[must_use]
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::InSettlement)
    }
}

impl From<String> for LedgerStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<LedgerStatus> for String {
    fn from(status: LedgerStatus) -> Self {
        match status {
            LedgerStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cash movement of an entity.
///
/// Entries are append-only. The only permitted mutation is the status
/// transition out of `InSettlement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Unique identifier for this entry.
    pub id: LedgerEntryId,
    /// The entity whose cash moved.
    pub entity_id: EntityId,
    /// Credit or debit.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Payment rail or source, e.g. `NEFT`, `RTGS`, `UPI`.
    pub method: String,
    /// Amount moved, always positive.
    pub amount: Decimal,
    /// Bank unique transaction reference, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utr: Option<String>,
    /// When the entry was recorded.
    pub ts: DateTime<Utc>,
    /// Settlement status.
    pub status: LedgerStatus,
}

impl LedgerEntry {
    /// Returns true for a cleared credit.
    #[must_use]
    pub fn is_cleared_credit(&self) -> bool {
        self.entry_type == EntryType::Credit && self.status == LedgerStatus::Credited
    }

    /// Returns true for a debit still in settlement.
    #[must_use]
    pub fn is_pending_debit(&self) -> bool {
        self.entry_type == EntryType::Debit && self.status == LedgerStatus::InSettlement
    }
}

/// Input for recording a new ledger entry.
#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
    /// The entity whose cash moves.
    pub entity_id: EntityId,
    /// Credit or debit.
    pub entry_type: EntryType,
    /// Payment rail or source.
    pub method: String,
    /// Amount, must be positive.
    pub amount: Decimal,
    /// Bank reference, blank values are dropped.
    pub utr: Option<String>,
    /// Initial status; `InSettlement` or `Credited`.
    pub status: LedgerStatus,
}
