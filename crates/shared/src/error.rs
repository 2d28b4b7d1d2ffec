//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Authorization outcomes of the route guard are *not* errors; they are
/// navigation decisions. `AppError` covers the failures callers must handle.
#[derive(Debug, Error)]
pub enum AppError {
    /// No session is present.
    #[error("Authentication required: {0}")]
    Unauthorized(String),

    /// The session's role does not permit the action.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule or policy violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// A state transition that the record's lifecycle does not allow.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error was caused by the caller rather than the system.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Internal(_))
    }
}
