//! Application layer for finops.
//!
//! This crate wires the pure rules of `finops-core` to the storage of
//! `finops-store`:
//! - The application context (configuration, store and session)
//! - The per-navigation route guard and the demo bypass
//! - Compliance, ledger and order desks acting for the signed-in entity
//! - The dashboard summary

pub mod context;
pub mod dashboard;
pub mod desk;
pub mod error;
pub mod guard;

#[cfg(test)]
mod guard_props;

pub use context::AppContext;
pub use dashboard::{Dashboard, DashboardSummary, PendingApprovals};
pub use desk::{ComplianceDesk, LedgerDesk, OrderDesk, OrderRequest};
pub use error::DeskError;
pub use guard::RouteGuard;
