//! The route guard decision table.

use crate::compliance::ComplianceRecord;

use super::routes;
use super::types::GuardDecision;

/// Compliance state of the session's entity as seen by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceCheck {
    /// A record exists with status exactly `Approved`.
    Approved,
    /// No record, or a record with any other status.
    NotApproved,
    /// The record could not be read.
    Unavailable,
}

impl ComplianceCheck {
    /// Classifies the result of a compliance lookup.
    ///
    /// Read failures are kept distinct from "not approved" for logging, but
    /// the guard treats both the same way.
    #[must_use]
    pub fn from_lookup<E>(lookup: Result<Option<ComplianceRecord>, E>) -> Self {
        match lookup {
            Ok(Some(record)) if record.is_approved() => Self::Approved,
            Ok(_) => Self::NotApproved,
            Err(_) => Self::Unavailable,
        }
    }
}

/// Decides the outcome of navigating to `path`.
///
/// Rules, first match wins:
/// 1. Paths outside the protected subtree are public: `Allow`.
/// 2. The onboarding subtree always renders: `Allow`.
/// 3. No session: `RedirectHome`.
/// 4. Entity not approved, or compliance unreadable: `RedirectOnboarding`.
/// 5. The bare protected root: `RedirectDashboard`.
/// 6. Otherwise `Allow`.
///
/// `compliance` is only invoked when rule 4 is reached.
pub fn decide<F>(path: &str, has_session: bool, compliance: F) -> GuardDecision
where
    F: FnOnce() -> ComplianceCheck,
{
    if !routes::is_protected(path) || routes::is_onboarding(path) {
        return GuardDecision::Allow;
    }

    if !has_session {
        return GuardDecision::RedirectHome;
    }

    match compliance() {
        ComplianceCheck::Approved => {}
        ComplianceCheck::NotApproved | ComplianceCheck::Unavailable => {
            return GuardDecision::RedirectOnboarding;
        }
    }

    if routes::is_protected_root(path) {
        GuardDecision::RedirectDashboard
    } else {
        GuardDecision::Allow
    }
}
