//! Core business logic for finops.
//!
//! This crate contains pure business logic with ZERO storage or UI dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `compliance` - Entity onboarding compliance records
//! - `entity` - Entities and their users
//! - `guard` - Route guard decision logic
//! - `ledger` - Cash ledger entries, holdings and balance derivation
//! - `workflow` - Investment orders, policy checks and maker-checker approval

pub mod compliance;
pub mod entity;
pub mod guard;
pub mod ledger;
pub mod workflow;

#[cfg(test)]
mod compliance_props;
