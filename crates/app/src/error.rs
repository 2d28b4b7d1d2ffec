//! Errors returned by the desks and the dashboard.

use finops_core::ledger::LedgerError;
use finops_core::workflow::{PolicyViolation, WorkflowError};
use finops_shared::{AppError, Role};
use finops_store::{ComplianceError, StorageError};
use thiserror::Error;

/// Errors from application operations.
#[derive(Debug, Error)]
pub enum DeskError {
    /// The operation needs a signed-in user.
    #[error("No active session")]
    NoSession,

    /// The session's role may not perform the action.
    #[error("Role {role} may not {action}")]
    Forbidden {
        /// The acting role.
        role: Role,
        /// What was attempted.
        action: &'static str,
    },

    /// Ledger validation or transition failure.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Order workflow failure.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Compliance mutation failure.
    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    /// Persistence failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<PolicyViolation> for DeskError {
    fn from(violation: PolicyViolation) -> Self {
        Self::Workflow(WorkflowError::PolicyViolation(violation))
    }
}

impl DeskError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NoSession => "NO_SESSION",
            Self::Forbidden { .. } => "FORBIDDEN",
            Self::Ledger(e) => e.error_code(),
            Self::Workflow(e) => e.error_code(),
            Self::Compliance(ComplianceError::NotSubmittable { .. }) => "NOT_SUBMITTABLE",
            Self::Compliance(ComplianceError::Storage(_)) | Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        let message = err.to_string();
        match err {
            DeskError::NoSession => Self::Unauthorized(message),
            DeskError::Forbidden { .. }
            | DeskError::Workflow(
                WorkflowError::NotAuthorizedToPrepare { .. }
                | WorkflowError::NotAuthorizedToApprove { .. }
                | WorkflowError::NotAuthorizedToCancel { .. },
            ) => Self::Forbidden(message),
            DeskError::Ledger(LedgerError::EntryNotFound(_))
            | DeskError::Workflow(WorkflowError::OrderNotFound(_)) => Self::NotFound(message),
            DeskError::Ledger(LedgerError::InvalidStatusTransition { .. })
            | DeskError::Compliance(ComplianceError::NotSubmittable { .. }) => {
                Self::InvariantViolation(message)
            }
            DeskError::Workflow(e) if e.is_invariant_violation() => {
                Self::InvariantViolation(message)
            }
            DeskError::Workflow(WorkflowError::PolicyViolation(_)) => Self::BusinessRule(message),
            DeskError::Ledger(_) | DeskError::Workflow(_) => Self::Validation(message),
            DeskError::Compliance(ComplianceError::Storage(_)) | DeskError::Storage(_) => {
                Self::Storage(message)
            }
        }
    }
}
