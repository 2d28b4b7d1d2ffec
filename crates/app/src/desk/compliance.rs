//! Onboarding (KYC) submission.

use chrono::Utc;
use finops_core::compliance::ComplianceRecord;
use tracing::info;

use crate::context::AppContext;
use crate::error::DeskError;

/// Stateless desk submitting the session entity's onboarding data.
pub struct ComplianceDesk;

impl ComplianceDesk {
    /// Submits `entity_data` for review.
    ///
    /// # Returns
    /// * `Ok(record)` in `Submitted` status
    /// * `Err(DeskError::Forbidden)` unless the role may prepare
    /// * `Err(DeskError::Compliance)` if the record is already submitted,
    ///   under review or approved
    pub fn submit(
        ctx: &mut AppContext,
        entity_data: serde_json::Value,
    ) -> Result<ComplianceRecord, DeskError> {
        let session = ctx.require_session()?;
        if !session.role.can_prepare() {
            return Err(DeskError::Forbidden {
                role: session.role,
                action: "submit onboarding data",
            });
        }

        let entity_id = AppContext::entity_of(&session);
        let record = ctx
            .compliance()
            .submit_for_review(&entity_id, entity_data, Utc::now())?;
        info!(entity_id = %entity_id, by = %session.user_id, "Onboarding submitted");
        Ok(record)
    }
}
