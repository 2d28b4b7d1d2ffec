//! Per-navigation route guard.
//!
//! The guard re-enters `Loading` on every navigation, then composes the
//! session and the entity's compliance record into one decision. Denials are
//! decisions, not errors.

use chrono::Utc;
use finops_core::guard::{ComplianceCheck, GuardDecision, GuardState, decide, routes};
use finops_shared::types::EntityId;
use finops_store::StorageError;
use finops_store::seeder::fixtures;
use tracing::{debug, info, warn};

use crate::context::AppContext;

/// Route guard state machine for one client.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    state: GuardState,
    path: Option<String>,
}

impl RouteGuard {
    /// Creates a guard in `Loading`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// The path of the last navigation.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Evaluates a navigation to `path`.
    ///
    /// Visiting the onboarding subtree without a session provisions demo
    /// data (when enabled), signs in the onboarding demo identity and makes
    /// sure its entity has a draft compliance record. That side effect never
    /// changes the outcome: onboarding always renders.
    pub fn navigate(&mut self, ctx: &mut AppContext, path: &str) -> GuardDecision {
        self.state = GuardState::Loading;
        self.path = Some(path.to_string());

        if routes::is_onboarding(path)
            && ctx.session().is_none()
            && let Err(e) = Self::start_onboarding_demo(ctx)
        {
            warn!(error = %e, "Failed to start onboarding demo session");
        }

        let session = ctx.session();
        let entity_id = session.as_ref().map(AppContext::entity_of);
        let decision = decide(path, session.is_some(), || {
            entity_id.map_or(ComplianceCheck::NotApproved, |id| {
                Self::compliance_check(ctx, &id)
            })
        });

        debug!(path, decision = %decision, "Route guard decision");
        self.state = GuardState::Decided(decision);
        decision
    }

    /// Demo escape hatch: approves the bypass entity, signs in its owner
    /// and reloads, re-evaluating the current path from `Loading`.
    ///
    /// # Errors
    ///
    /// Returns an error if the compliance record or session cannot be stored.
    pub fn force_demo_bypass(&mut self, ctx: &mut AppContext) -> Result<GuardDecision, StorageError> {
        let entity_id = EntityId::new(fixtures::BYPASS_ENTITY_ID);
        ctx.compliance()
            .approve(&entity_id, fixtures::bypass_entity_data(), Utc::now())?;
        ctx.sessions().set_session(fixtures::bypass_session(), true)?;
        info!(entity_id = %entity_id, "Demo bypass applied");

        ctx.reload();
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| routes::PROTECTED_ROOT.to_string());
        Ok(self.navigate(ctx, &path))
    }

    fn start_onboarding_demo(ctx: &mut AppContext) -> Result<(), StorageError> {
        if ctx.config().demo.auto_seed {
            ctx.seeder().seed(Utc::now())?;
        }
        let session = fixtures::onboarding_session();
        let entity_id = AppContext::entity_of(&session);
        ctx.sessions().set_session(session, false)?;
        ctx.compliance().ensure_draft(&entity_id, Utc::now())?;
        info!(entity_id = %entity_id, "Onboarding demo session started");
        Ok(())
    }

    fn compliance_check(ctx: &AppContext, entity_id: &EntityId) -> ComplianceCheck {
        let lookup = ctx.compliance().get_status(entity_id);
        if let Err(e) = &lookup {
            warn!(entity_id = %entity_id, error = %e, "Compliance lookup failed, treating as not onboarded");
        }
        ComplianceCheck::from_lookup(lookup)
    }
}
