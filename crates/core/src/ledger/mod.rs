//! Cash ledger and balance derivation.
//!
//! This module implements the entity cash ledger:
//! - Ledger entries (credits and debits with a settlement status)
//! - Portfolio holdings created by settled orders
//! - Balance derivation (available, in settlement, invested)
//! - Entry construction and status transitions
//! - Error types for ledger operations

pub mod balance;
pub mod entry;
pub mod error;
pub mod holding;
pub mod service;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod entry_props;

pub use balance::{Balances, LedgerEngine};
pub use entry::{EntryType, LedgerEntry, LedgerStatus, NewLedgerEntry};
pub use error::LedgerError;
pub use holding::PortfolioHolding;
pub use service::{LedgerService, MAX_ENTRY_AMOUNT};
