//! Workflow service for order state transitions.
//!
//! This module implements the order state machine and the maker-checker
//! rule. Every successful transition appends to the order's audit trail;
//! a failed transition leaves the order untouched.

use chrono::{DateTime, Utc};
use finops_shared::{Role, Session};
use finops_shared::types::HoldingId;

use crate::ledger::holding::PortfolioHolding;
use crate::workflow::error::WorkflowError;
use crate::workflow::order::Order;
use crate::workflow::policy::Policy;
use crate::workflow::types::{Approval, OrderEventKind, OrderStatus};

/// Stateless service for managing order workflow transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Submit a created order.
    ///
    /// Orders at or above the policy's maker-checker threshold go to
    /// `PendingApproval`; smaller orders go to `Submitted`.
    ///
    /// # Returns
    /// * `Ok(new_status)` if the transition is valid
    /// * `Err(WorkflowError::TerminalState)` if the order is terminal
    /// * `Err(WorkflowError::InvalidTransition)` if not in Created status
    /// * `Err(WorkflowError::NotAuthorizedToPrepare)` if the role cannot make orders
    pub fn submit(
        order: &mut Order,
        policy: &Policy,
        actor: &Session,
        now: DateTime<Utc>,
    ) -> Result<OrderStatus, WorkflowError> {
        let (target, kind) = if policy.requires_checker(order.amount) {
            (OrderStatus::PendingApproval, OrderEventKind::SentForApproval)
        } else {
            (OrderStatus::Submitted, OrderEventKind::Submitted)
        };

        Self::ensure_transition(order, &[OrderStatus::Created], target)?;

        if !actor.role.can_prepare() {
            return Err(WorkflowError::NotAuthorizedToPrepare {
                role: actor.role.clone(),
            });
        }

        order.status = target;
        order.record(kind, now, Some(actor.user_id.clone()), None);
        Ok(target)
    }

    /// Approve a submitted order.
    ///
    /// A `Submitted` order is approved by any maker or checker, including its
    /// own maker. A `PendingApproval` order records the approval and only
    /// moves to `Approved` once an approval from a checker role different
    /// from the maker's role is present; otherwise it stays pending.
    ///
    /// # Returns
    /// * `Ok(new_status)` - `Approved`, or `PendingApproval` if maker-checker
    ///   is not yet satisfied
    /// * `Err(WorkflowError::TerminalState)` if the order is terminal
    /// * `Err(WorkflowError::InvalidTransition)` if not awaiting approval
    /// * `Err(WorkflowError::NotAuthorizedToApprove)` for read-only roles
    /// * `Err(WorkflowError::DuplicateApproval)` if the user approved before
    pub fn approve(
        order: &mut Order,
        actor: &Session,
        now: DateTime<Utc>,
    ) -> Result<OrderStatus, WorkflowError> {
        Self::ensure_transition(
            order,
            &[OrderStatus::Submitted, OrderStatus::PendingApproval],
            OrderStatus::Approved,
        )?;

        if !(actor.role.can_prepare() || actor.role.can_check()) {
            return Err(WorkflowError::NotAuthorizedToApprove {
                role: actor.role.clone(),
            });
        }

        if order.approved_by(&actor.user_id) {
            return Err(WorkflowError::DuplicateApproval {
                user_id: actor.user_id.clone(),
            });
        }

        order.approvals.push(Approval {
            user_id: actor.user_id.clone(),
            role: actor.role.clone(),
            ts: now,
        });

        if order.status == OrderStatus::Submitted || order.maker_checker_satisfied() {
            order.status = OrderStatus::Approved;
            order.record(
                OrderEventKind::Approved,
                now,
                Some(actor.user_id.clone()),
                None,
            );
        } else {
            order.record(
                OrderEventKind::ApprovalRecorded,
                now,
                Some(actor.user_id.clone()),
                None,
            );
        }

        Ok(order.status)
    }

    /// Reject an order awaiting approval.
    ///
    /// # Returns
    /// * `Ok(OrderStatus::Rejected)` if the transition is valid
    /// * `Err(WorkflowError::RejectionReasonRequired)` if reason is empty
    /// * `Err(WorkflowError::TerminalState)` if the order is terminal
    /// * `Err(WorkflowError::InvalidTransition)` if not awaiting approval
    /// * `Err(WorkflowError::NotAuthorizedToApprove)` if the role cannot check
    pub fn reject(
        order: &mut Order,
        actor: &Session,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<OrderStatus, WorkflowError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        Self::ensure_transition(
            order,
            &[OrderStatus::Submitted, OrderStatus::PendingApproval],
            OrderStatus::Rejected,
        )?;

        if !actor.role.can_check() {
            return Err(WorkflowError::NotAuthorizedToApprove {
                role: actor.role.clone(),
            });
        }

        order.status = OrderStatus::Rejected;
        order.record(
            OrderEventKind::Rejected,
            now,
            Some(actor.user_id.clone()),
            Some(reason.to_string()),
        );
        Ok(OrderStatus::Rejected)
    }

    /// Cancel an order that has not been approved yet.
    ///
    /// Only the maker or an owner may cancel.
    pub fn cancel(
        order: &mut Order,
        actor: &Session,
        now: DateTime<Utc>,
    ) -> Result<OrderStatus, WorkflowError> {
        Self::ensure_transition(
            order,
            &[
                OrderStatus::Created,
                OrderStatus::Submitted,
                OrderStatus::PendingApproval,
            ],
            OrderStatus::Cancelled,
        )?;

        if actor.user_id != order.created_by && actor.role != Role::Owner {
            return Err(WorkflowError::NotAuthorizedToCancel {
                user_id: actor.user_id.clone(),
            });
        }

        order.status = OrderStatus::Cancelled;
        order.record(
            OrderEventKind::Cancelled,
            now,
            Some(actor.user_id.clone()),
            None,
        );
        Ok(OrderStatus::Cancelled)
    }

    /// Settle an approved order and create the resulting holding.
    pub fn settle(order: &mut Order, now: DateTime<Utc>) -> Result<PortfolioHolding, WorkflowError> {
        Self::ensure_transition(order, &[OrderStatus::Approved], OrderStatus::Settled)?;
        let maturity_date = order
            .maturity_date()
            .ok_or(WorkflowError::MaturityOutOfRange {
                settlement_date: order.settlement_date,
                tenor_days: order.tenor_days,
            })?;

        order.status = OrderStatus::Settled;
        order.record(OrderEventKind::Settled, now, None, None);

        Ok(PortfolioHolding {
            id: HoldingId::new(),
            entity_id: order.entity_id.clone(),
            order_id: order.id,
            instrument_slug: order.instrument_slug.clone(),
            principal: order.amount,
            expected_yield: order.expected_yield,
            settlement_date: order.settlement_date,
            maturity_date,
            created_at: now,
        })
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Created → Submitted | Pending Approval | Cancelled
    /// - Submitted → Approved | Rejected | Cancelled
    /// - Pending Approval → Approved | Rejected | Cancelled
    /// - Approved → Settled
    #[must_use]
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        matches!(
            (from, to),
            (
                OrderStatus::Created,
                OrderStatus::Submitted | OrderStatus::PendingApproval | OrderStatus::Cancelled
            ) | (
                OrderStatus::Submitted | OrderStatus::PendingApproval,
                OrderStatus::Approved | OrderStatus::Rejected | OrderStatus::Cancelled
            ) | (OrderStatus::Approved, OrderStatus::Settled)
        )
    }

    /// Rejects terminal orders and orders not in one of `allowed`.
    fn ensure_transition(
        order: &Order,
        allowed: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<(), WorkflowError> {
        if order.status.is_terminal() {
            return Err(WorkflowError::TerminalState {
                status: order.status,
            });
        }
        if !allowed.contains(&order.status) {
            return Err(WorkflowError::InvalidTransition {
                from: order.status,
                to,
            });
        }
        Ok(())
    }
}
