//! Ledger entry construction and status transitions.

use chrono::{DateTime, Utc};
use finops_shared::types::LedgerEntryId;
use rust_decimal::Decimal;

use crate::ledger::entry::{LedgerEntry, LedgerStatus, NewLedgerEntry};
use crate::ledger::error::LedgerError;

/// Largest amount a single entry may carry: 10^15.
///
/// Keeps every balance fold far below `Decimal::MAX`.
pub const MAX_ENTRY_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Stateless service validating ledger mutations.
pub struct LedgerService;

impl LedgerService {
    /// Validates `input` and builds the entry to append.
    ///
    /// # Returns
    /// * `Err(LedgerError::NonPositiveAmount)` if the amount is zero or negative
    /// * `Err(LedgerError::AmountTooLarge)` above [`MAX_ENTRY_AMOUNT`]
    /// * `Err(LedgerError::MethodRequired)` if the method is blank
    /// * `Err(LedgerError::InvalidInitialStatus)` unless the status is
    ///   `InSettlement` or `Credited`
    pub fn create_entry(
        input: NewLedgerEntry,
        now: DateTime<Utc>,
    ) -> Result<LedgerEntry, LedgerError> {
        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(input.amount));
        }
        if input.amount > MAX_ENTRY_AMOUNT {
            return Err(LedgerError::AmountTooLarge {
                amount: input.amount,
                max: MAX_ENTRY_AMOUNT,
            });
        }

        let method = input.method.trim();
        if method.is_empty() {
            return Err(LedgerError::MethodRequired);
        }

        if !matches!(
            input.status,
            LedgerStatus::InSettlement | LedgerStatus::Credited
        ) {
            return Err(LedgerError::InvalidInitialStatus(input.status));
        }

        let utr = input
            .utr
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        Ok(LedgerEntry {
            id: LedgerEntryId::new(),
            entity_id: input.entity_id,
            entry_type: input.entry_type,
            method: method.to_string(),
            amount: input.amount,
            utr,
            ts: now,
            status: input.status,
        })
    }

    /// Moves an entry out of settlement.
    ///
    /// Valid transitions:
    /// - In-Settlement → Credited
    /// - In-Settlement → Failed
    pub fn transition(entry: &mut LedgerEntry, to: LedgerStatus) -> Result<(), LedgerError> {
        if !Self::is_valid_transition(&entry.status, &to) {
            return Err(LedgerError::InvalidStatusTransition {
                from: entry.status.clone(),
                to,
            });
        }
        entry.status = to;
        Ok(())
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: &LedgerStatus, to: &LedgerStatus) -> bool {
        matches!(
            (from, to),
            (
                LedgerStatus::InSettlement,
                LedgerStatus::Credited | LedgerStatus::Failed
            )
        )
    }
}
