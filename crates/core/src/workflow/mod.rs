//! Investment order workflow for finops.
//!
//! This module implements the order lifecycle state machine, the
//! maker-checker approval rule and the entity investment policy checks.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (OrderStatus, OrderEvent, Approval)
//! - `order` - The order aggregate and its creation input
//! - `policy` - Entity investment policy and the policy engine
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic

pub mod error;
pub mod order;
pub mod policy;
pub mod service;
pub mod types;

#[cfg(test)]
mod order_props;
#[cfg(test)]
mod service_props;

pub use error::{PolicyViolation, WorkflowError};
pub use order::{Order, OrderDraft};
pub use policy::{CreditRating, Exposure, MAX_TENOR_DAYS, Policy, PolicyEngine};
pub use service::WorkflowService;
pub use types::{Approval, OrderEvent, OrderEventKind, OrderStatus};
