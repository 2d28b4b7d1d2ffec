//! Dashboard summary for the signed-in entity.

use finops_core::compliance::ComplianceStatus;
use finops_core::ledger::{Balances, LedgerEntry, PortfolioHolding};
use finops_shared::types::EntityId;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::context::AppContext;
use crate::desk::{LedgerDesk, OrderDesk};
use crate::error::DeskError;

/// Number of ledger entries shown on the dashboard.
pub const RECENT_ENTRIES: usize = 5;

/// Orders waiting for a checker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingApprovals {
    /// Number of orders.
    pub count: usize,
    /// Total amount of those orders.
    pub total_amount: Decimal,
}

/// Dashboard response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// The entity shown.
    pub entity_id: EntityId,
    /// Registered entity name, if any.
    pub entity_name: Option<String>,
    /// Compliance status; `None` when missing or unreadable.
    pub compliance_status: Option<ComplianceStatus>,
    /// Cash position.
    pub balances: Balances,
    /// Orders still waiting for a decision.
    pub open_orders: usize,
    /// Orders waiting for a checker.
    pub pending_approvals: PendingApprovals,
    /// Holdings, earliest maturity first.
    pub holdings: Vec<PortfolioHolding>,
    /// Most recent ledger entries, newest first.
    pub recent_entries: Vec<LedgerEntry>,
}

/// Builds the dashboard.
pub struct Dashboard;

impl Dashboard {
    /// Summarises the session entity's position.
    pub fn summary(ctx: &mut AppContext) -> Result<DashboardSummary, DeskError> {
        let session = ctx.require_session()?;
        let entity_id = AppContext::entity_of(&session);

        let compliance_status = match ctx.compliance().get_status(&entity_id) {
            Ok(record) => record.map(|r| r.status),
            Err(e) => {
                warn!(entity_id = %entity_id, error = %e, "Compliance record unreadable");
                None
            }
        };

        let open_orders = ctx
            .orders()
            .for_entity(&entity_id)
            .iter()
            .filter(|o| o.status.is_open())
            .count();
        let pending = OrderDesk::pending_approvals(ctx, &entity_id);

        let mut recent_entries = ctx.ledger().for_entity(&entity_id);
        recent_entries.truncate(RECENT_ENTRIES);

        Ok(DashboardSummary {
            entity_name: ctx.entities().find(&entity_id).map(|e| e.name),
            compliance_status,
            balances: LedgerDesk::balances_for(ctx, &entity_id),
            open_orders,
            pending_approvals: PendingApprovals {
                count: pending.len(),
                total_amount: pending
                    .iter()
                    .map(|o| o.amount)
                    .fold(Decimal::ZERO, Decimal::saturating_add),
            },
            holdings: ctx.portfolio().for_entity(&entity_id),
            recent_entries,
            entity_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use finops_shared::{Role, Session};
    use rust_decimal_macros::dec;

    #[test]
    fn test_requires_session() {
        let mut ctx = AppContext::in_memory();
        assert!(matches!(
            Dashboard::summary(&mut ctx),
            Err(DeskError::NoSession)
        ));
    }

    #[test]
    fn test_summary_of_seeded_entity() {
        let mut ctx = AppContext::in_memory();
        ctx.seeder().seed(Utc::now()).unwrap();
        ctx.sessions()
            .login(
                Session::new("demo-owner", "owner@demotraders.in", Role::Owner, "entity-001"),
                false,
            )
            .unwrap();
        for _ in 0..7 {
            LedgerDesk::record_credit(&mut ctx, "NEFT", dec!(100), None, true).unwrap();
        }

        let summary = Dashboard::summary(&mut ctx).unwrap();
        assert_eq!(summary.entity_name.as_deref(), Some("Demo Traders LLP"));
        assert_eq!(summary.compliance_status, None);
        assert_eq!(summary.balances.available, dec!(700));
        assert_eq!(summary.recent_entries.len(), RECENT_ENTRIES);
        assert_eq!(summary.open_orders, 0);
        assert_eq!(summary.pending_approvals.count, 0);
    }
}
