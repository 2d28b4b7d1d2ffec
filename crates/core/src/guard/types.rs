//! Guard states and decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::routes;

/// Outcome of evaluating one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardDecision {
    /// Render the requested route.
    Allow,
    /// No session: send the user to the landing page.
    RedirectHome,
    /// Entity not KYC-approved: send the user to onboarding.
    RedirectOnboarding,
    /// The bare protected root: send the user to the dashboard.
    RedirectDashboard,
}

impl GuardDecision {
    /// Returns the path to redirect to, or `None` when the route renders.
    #[must_use]
    pub const fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectHome => Some(routes::HOME),
            Self::RedirectOnboarding => Some(routes::ONBOARDING),
            Self::RedirectDashboard => Some(routes::DASHBOARD),
        }
    }

    /// Returns true if the route renders.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the string representation of the decision.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::RedirectHome => "redirect_home",
            Self::RedirectOnboarding => "redirect_onboarding",
            Self::RedirectDashboard => "redirect_dashboard",
        }
    }
}

impl fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the guard for the current path.
///
/// The guard starts in `Loading` and re-enters it on every path change; a
/// decision is never carried over from one path to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    /// Evaluation pending; render a loading indicator.
    #[default]
    Loading,
    /// Evaluation finished.
    Decided(GuardDecision),
}

impl GuardState {
    /// Returns the decision, if evaluation finished.
    #[must_use]
    pub const fn decision(self) -> Option<GuardDecision> {
        match self {
            Self::Loading => None,
            Self::Decided(decision) => Some(decision),
        }
    }
}
