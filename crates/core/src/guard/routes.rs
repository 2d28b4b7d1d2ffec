//! Route paths known to the guard.

/// Public landing page.
pub const HOME: &str = "/";
/// Root of the protected application subtree.
pub const PROTECTED_ROOT: &str = "/app";
/// Root of the onboarding subtree.
pub const ONBOARDING: &str = "/app/onboarding";
/// Dashboard landing page.
pub const DASHBOARD: &str = "/app/dashboard";

/// Returns true if `path` is `prefix` itself or lies below it.
fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Returns true for the onboarding page and everything below it.
#[must_use]
pub fn is_onboarding(path: &str) -> bool {
    is_under(path, ONBOARDING)
}

/// Returns true for paths the guard protects.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    is_under(path, PROTECTED_ROOT)
}

/// Returns true for the protected root exactly.
#[must_use]
pub fn is_protected_root(path: &str) -> bool {
    path == PROTECTED_ROOT
}
