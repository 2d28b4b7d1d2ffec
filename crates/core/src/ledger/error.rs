//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;

use finops_shared::types::LedgerEntryId;

use crate::ledger::entry::LedgerStatus;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Entry amount must be strictly positive.
    #[error("Entry amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Entry amount is above the per-entry ceiling.
    #[error("Entry amount {amount} exceeds the maximum of {max}")]
    AmountTooLarge {
        /// The requested amount.
        amount: Decimal,
        /// The ceiling.
        max: Decimal,
    },

    /// Payment method is blank.
    #[error("Payment method is required")]
    MethodRequired,

    /// New entries start either in settlement or already credited.
    #[error("Entries cannot be recorded with status {0}")]
    InvalidInitialStatus(LedgerStatus),

    /// Only entries in settlement may change status.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status.
        from: LedgerStatus,
        /// The attempted target status.
        to: LedgerStatus,
    },

    /// Entry not found.
    #[error("Ledger entry {0} not found")]
    EntryNotFound(LedgerEntryId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::AmountTooLarge { .. } => "AMOUNT_TOO_LARGE",
            Self::MethodRequired => "METHOD_REQUIRED",
            Self::InvalidInitialStatus(_) => "INVALID_INITIAL_STATUS",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
        }
    }
}
