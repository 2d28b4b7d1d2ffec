//! Workflow domain types for order lifecycle management.

use chrono::{DateTime, Utc};
use finops_shared::Role;
use finops_shared::types::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status in the approval workflow.
///
/// The valid transitions are:
/// - Created → Submitted (submit, below the maker-checker threshold)
/// - Created → Pending Approval (submit, at or above the threshold)
/// - Submitted → Approved (approve, the maker may confirm)
/// - Pending Approval → Approved (approve by a distinct checker role)
/// - Submitted | Pending Approval → Rejected (reject)
/// - Created | Submitted | Pending Approval → Cancelled (cancel)
/// - Approved → Settled (settle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Order captured, not yet submitted.
    Created,
    /// Submitted, no checker required.
    Submitted,
    /// Submitted, waiting for a checker.
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    /// Approved and awaiting settlement.
    Approved,
    /// Funds settled into a holding (terminal).
    Settled,
    /// Rejected by a checker (terminal).
    Rejected,
    /// Withdrawn before approval (terminal).
    Cancelled,
}

impl OrderStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Submitted => "Submitted",
            Self::PendingApproval => "Pending Approval",
            Self::Approved => "Approved",
            Self::Settled => "Settled",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Settled | Self::Rejected | Self::Cancelled)
    }

    /// Returns true while the order still waits for a decision.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Created | Self::Submitted | Self::PendingApproval)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of an audit trail event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEventKind {
    /// Order created.
    Created,
    /// Order submitted without checker.
    Submitted,
    /// Order submitted and routed to a checker.
    SentForApproval,
    /// An approval was recorded without completing maker-checker.
    ApprovalRecorded,
    /// Order approved.
    Approved,
    /// Order rejected.
    Rejected,
    /// Order cancelled.
    Cancelled,
    /// Order settled.
    Settled,
}

/// One entry of the order audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEvent {
    /// When the event happened.
    pub ts: DateTime<Utc>,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: OrderEventKind,
    /// Who caused it, when a user did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<UserId>,
    /// Free-text note, e.g. a rejection reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// An approval given on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    /// The approving user.
    pub user_id: UserId,
    /// The approving user's role at the time.
    pub role: Role,
    /// When the approval was given.
    pub ts: DateTime<Utc>,
}
