//! Workflow error types for order lifecycle management.
//!
//! This module defines all error types that can occur during
//! workflow operations such as placement, approvals and settlement.

use finops_shared::Role;
use chrono::NaiveDate;
use finops_shared::types::{OrderId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::workflow::policy::CreditRating;
use crate::workflow::types::OrderStatus;

/// An order that breaks the entity's investment policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyViolation {
    /// Order amount must be positive.
    #[error("Order amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Tenor is zero or longer than the policy allows.
    #[error("Tenor of {tenor_days} days is outside the policy maximum of {max_tenor_days} days")]
    TenorOutOfRange {
        /// Requested tenor.
        tenor_days: u32,
        /// Policy maximum.
        max_tenor_days: u32,
    },

    /// Instrument rating is weaker than the policy minimum.
    #[error("Instrument rating {rating} is below the policy minimum {min_rating}")]
    RatingBelowMinimum {
        /// Instrument rating.
        rating: CreditRating,
        /// Policy minimum.
        min_rating: CreditRating,
    },

    /// Not enough available cash.
    #[error("Order amount {amount} exceeds available balance {available}")]
    InsufficientFunds {
        /// Order amount.
        amount: Decimal,
        /// Available balance.
        available: Decimal,
    },

    /// The instrument would exceed the concentration cap.
    #[error("Order would put more than {cap_pct}% of funds into {instrument_slug}")]
    ConcentrationExceeded {
        /// Instrument identifier.
        instrument_slug: String,
        /// Policy cap in percent.
        cap_pct: Decimal,
    },
}

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted a transition on a settled, rejected or cancelled order.
    #[error("Order is {status} and can no longer change")]
    TerminalState {
        /// The terminal status.
        status: OrderStatus,
    },

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: OrderStatus,
        /// The attempted target status.
        to: OrderStatus,
    },

    /// The role may not create or submit orders.
    #[error("Role {role} is not allowed to prepare orders")]
    NotAuthorizedToPrepare {
        /// The acting role.
        role: Role,
    },

    /// The role may not approve or reject orders.
    #[error("Role {role} is not allowed to approve orders")]
    NotAuthorizedToApprove {
        /// The acting role.
        role: Role,
    },

    /// Only the maker or an owner may cancel.
    #[error("User {user_id} is not allowed to cancel this order")]
    NotAuthorizedToCancel {
        /// The acting user.
        user_id: UserId,
    },

    /// The user already approved this order.
    #[error("User {user_id} has already approved this order")]
    DuplicateApproval {
        /// The approving user.
        user_id: UserId,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// The order breaks the entity's policy.
    #[error("Policy violation: {0}")]
    PolicyViolation(#[from] PolicyViolation),

    /// Settlement date plus tenor falls past the last representable date.
    #[error("Maturity of a {tenor_days}-day tenor settling on {settlement_date} is out of range")]
    MaturityOutOfRange {
        /// The settlement date.
        settlement_date: NaiveDate,
        /// The tenor in days.
        tenor_days: u32,
    },

    /// Order not found.
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
}

impl WorkflowError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TerminalState { .. } => "TERMINAL_STATE",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NotAuthorizedToPrepare { .. } => "NOT_AUTHORIZED_TO_PREPARE",
            Self::NotAuthorizedToApprove { .. } => "NOT_AUTHORIZED_TO_APPROVE",
            Self::NotAuthorizedToCancel { .. } => "NOT_AUTHORIZED_TO_CANCEL",
            Self::DuplicateApproval { .. } => "DUPLICATE_APPROVAL",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::PolicyViolation(_) => "POLICY_VIOLATION",
            Self::MaturityOutOfRange { .. } => "MATURITY_OUT_OF_RANGE",
            Self::OrderNotFound(_) => "ORDER_NOT_FOUND",
        }
    }

    /// Returns true for lifecycle invariant violations.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::TerminalState { .. } | Self::InvalidTransition { .. }
        )
    }
}
