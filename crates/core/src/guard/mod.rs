//! Navigation guard decisions.
//!
//! This module holds the pure decision table of the route guard: given a
//! target path, whether a session exists and the entity's compliance state,
//! it decides whether to render the route or redirect. Side effects such as
//! seeding a demo session live with the caller.
//!
//! # Modules
//!
//! - `routes` - Route paths and path classification
//! - `types` - Guard states and decisions
//! - `decision` - The ordered decision table

pub mod decision;
pub mod routes;
pub mod types;

pub use decision::{ComplianceCheck, decide};
pub use types::{GuardDecision, GuardState};
