//! Desks: session-scoped operations on onboarding, the ledger and the
//! order book.
//!
//! Each desk resolves the acting session and its entity from the
//! [`AppContext`](crate::AppContext), applies the pure rules from
//! `finops-core` and persists the result.

pub mod compliance;
pub mod ledger;
pub mod orders;

pub use compliance::ComplianceDesk;
pub use ledger::LedgerDesk;
pub use orders::{OrderDesk, OrderRequest};
