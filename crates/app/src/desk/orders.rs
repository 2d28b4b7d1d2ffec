//! Investment order operations.

use chrono::{DateTime, Utc};
use finops_core::ledger::{LedgerEngine, PortfolioHolding};
use finops_core::workflow::{
    CreditRating, Exposure, Order, OrderDraft, OrderStatus, PolicyEngine, WorkflowError,
    WorkflowService,
};
use finops_shared::Session;
use finops_shared::types::{EntityId, OrderId};
use rust_decimal::Decimal;
use tracing::info;

use crate::context::AppContext;
use crate::desk::ledger::LedgerDesk;
use crate::error::DeskError;

/// What the maker asks to buy.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Instrument identifier.
    pub instrument_slug: String,
    /// Instrument credit rating.
    pub rating: CreditRating,
    /// Amount to invest.
    pub amount: Decimal,
    /// Expected annual yield in percent.
    pub expected_yield: Decimal,
    /// Tenor in days.
    pub tenor_days: u32,
}

/// Stateless desk driving orders through their lifecycle.
pub struct OrderDesk;

impl OrderDesk {
    /// Places an order for the session's entity after checking it against
    /// the entity's policy and funds.
    ///
    /// # Returns
    /// * `Ok(order)` in `Created` status
    /// * `Err(WorkflowError::NotAuthorizedToPrepare)` if the role cannot make orders
    /// * `Err(WorkflowError::PolicyViolation)` if a policy check fails
    pub fn place_order(ctx: &mut AppContext, request: OrderRequest) -> Result<Order, DeskError> {
        let session = ctx.require_session()?;
        if !session.role.can_prepare() {
            return Err(WorkflowError::NotAuthorizedToPrepare {
                role: session.role,
            }
            .into());
        }

        let entity_id = AppContext::entity_of(&session);
        let policy = ctx.policies().get_or_default(&entity_id);
        let balances = LedgerDesk::balances_for(ctx, &entity_id);
        let exposure = Exposure {
            available: balances.available,
            invested: balances.invested,
            instrument_principal: LedgerEngine::instrument_exposure(
                &entity_id,
                &request.instrument_slug,
                &ctx.portfolio().list(),
            ),
        };

        let draft = OrderDraft {
            entity_id,
            instrument_slug: request.instrument_slug.trim().to_string(),
            rating: request.rating,
            amount: request.amount,
            expected_yield: request.expected_yield,
            tenor_days: request.tenor_days,
        };
        PolicyEngine::check(&policy, &draft, &exposure)?;

        let order = Order::create(draft, session.user_id, session.role, Utc::now());
        ctx.orders().insert(order.clone())?;

        info!(
            order_id = %order.id,
            entity_id = %order.entity_id,
            amount = %order.amount,
            "Order placed"
        );
        Ok(order)
    }

    /// Submits a created order; large orders go to `Pending Approval`.
    pub fn submit(ctx: &mut AppContext, id: OrderId) -> Result<Order, DeskError> {
        let session = ctx.require_session()?;
        let policy = ctx.policies().get_or_default(&AppContext::entity_of(&session));
        Self::apply(ctx, &session, id, |order, now| {
            WorkflowService::submit(order, &policy, &session, now).map(drop)
        })
    }

    /// Records the session user's approval.
    pub fn approve(ctx: &mut AppContext, id: OrderId) -> Result<Order, DeskError> {
        let session = ctx.require_session()?;
        Self::apply(ctx, &session, id, |order, now| {
            WorkflowService::approve(order, &session, now).map(drop)
        })
    }

    /// Rejects an order awaiting approval.
    pub fn reject(ctx: &mut AppContext, id: OrderId, reason: &str) -> Result<Order, DeskError> {
        let session = ctx.require_session()?;
        Self::apply(ctx, &session, id, |order, now| {
            WorkflowService::reject(order, &session, reason, now).map(drop)
        })
    }

    /// Cancels an order that is not yet approved.
    pub fn cancel(ctx: &mut AppContext, id: OrderId) -> Result<Order, DeskError> {
        let session = ctx.require_session()?;
        Self::apply(ctx, &session, id, |order, now| {
            WorkflowService::cancel(order, &session, now).map(drop)
        })
    }

    /// Settles an approved order and books the resulting holding.
    pub fn settle(
        ctx: &mut AppContext,
        id: OrderId,
    ) -> Result<(Order, PortfolioHolding), DeskError> {
        let session = ctx.require_session()?;
        if !(session.role.can_prepare() || session.role.can_check()) {
            return Err(DeskError::Forbidden {
                role: session.role,
                action: "settle orders",
            });
        }

        let mut holding = None;
        let order = Self::apply(ctx, &session, id, |order, now| {
            holding = Some(WorkflowService::settle(order, now)?);
            Ok(())
        })?;
        let holding = holding.ok_or(WorkflowError::OrderNotFound(id))?;
        ctx.portfolio().append(holding.clone())?;

        info!(order_id = %order.id, holding_id = %holding.id, "Order settled");
        Ok((order, holding))
    }

    /// Orders of the session's entity, newest first.
    pub fn orders(ctx: &mut AppContext) -> Result<Vec<Order>, DeskError> {
        let session = ctx.require_session()?;
        Ok(ctx.orders().for_entity(&AppContext::entity_of(&session)))
    }

    /// Orders of `entity_id` waiting for a checker.
    #[must_use]
    pub fn pending_approvals(ctx: &AppContext, entity_id: &EntityId) -> Vec<Order> {
        ctx.orders()
            .for_entity(entity_id)
            .into_iter()
            .filter(|o| o.status == OrderStatus::PendingApproval)
            .collect()
    }

    /// Loads order `id` of the session's entity, applies `f` and stores it.
    fn apply(
        ctx: &AppContext,
        session: &Session,
        id: OrderId,
        f: impl FnOnce(&mut Order, DateTime<Utc>) -> Result<(), WorkflowError>,
    ) -> Result<Order, DeskError> {
        let entity_id = AppContext::entity_of(session);
        let updated = ctx.orders().update(id, |order| {
            if order.entity_id != entity_id {
                return Err(DeskError::from(WorkflowError::OrderNotFound(id)));
            }
            let from = order.status;
            f(order, Utc::now())?;
            info!(
                order_id = %id,
                from = %from,
                to = %order.status,
                by = %session.user_id,
                "Order updated"
            );
            Ok::<_, DeskError>(())
        })?;

        updated
            .map(|(order, ())| order)
            .ok_or_else(|| WorkflowError::OrderNotFound(id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finops_shared::Role;
    use rust_decimal_macros::dec;

    fn login(ctx: &mut AppContext, user: &str, role: Role) {
        ctx.sessions()
            .login(
                Session::new(user, format!("{user}@finops.dev"), role, "entity-001"),
                false,
            )
            .unwrap();
    }

    fn funded(amount: Decimal) -> AppContext {
        let mut ctx = AppContext::in_memory();
        login(&mut ctx, "owner", Role::Owner);
        LedgerDesk::record_credit(&mut ctx, "RTGS", amount, None, true).unwrap();
        ctx
    }

    fn request(amount: Decimal) -> OrderRequest {
        OrderRequest {
            instrument_slug: "tbill-91d".to_string(),
            rating: CreditRating::Aaa,
            amount,
            expected_yield: dec!(6.85),
            tenor_days: 91,
        }
    }

    #[test]
    fn test_place_checks_funds() {
        let mut ctx = funded(dec!(100000));
        let result = OrderDesk::place_order(&mut ctx, request(dec!(100001)));
        assert!(matches!(
            result,
            Err(DeskError::Workflow(WorkflowError::PolicyViolation(_)))
        ));
        assert!(OrderDesk::orders(&mut ctx).unwrap().is_empty());
    }

    #[test]
    fn test_place_checks_concentration() {
        let mut ctx = funded(dec!(100000));
        let result = OrderDesk::place_order(&mut ctx, request(dec!(25000.01)));
        assert!(matches!(
            result,
            Err(DeskError::Workflow(WorkflowError::PolicyViolation(_)))
        ));
        assert!(OrderDesk::place_order(&mut ctx, request(dec!(25000))).is_ok());
    }

    #[test]
    fn test_full_lifecycle_below_threshold() {
        let mut ctx = funded(dec!(100000));
        login(&mut ctx, "maker", Role::Preparer);

        let order = OrderDesk::place_order(&mut ctx, request(dec!(20000))).unwrap();
        assert_eq!(
            OrderDesk::submit(&mut ctx, order.id).unwrap().status,
            OrderStatus::Submitted
        );
        assert_eq!(
            OrderDesk::approve(&mut ctx, order.id).unwrap().status,
            OrderStatus::Approved
        );

        let (settled, holding) = OrderDesk::settle(&mut ctx, order.id).unwrap();
        assert_eq!(settled.status, OrderStatus::Settled);
        assert_eq!(holding.principal, dec!(20000));
        assert_eq!(LedgerDesk::balances(&mut ctx).unwrap().invested, dec!(20000));
        assert_eq!(settled.events.len(), 4);
    }

    #[test]
    fn test_auditor_cannot_place() {
        let mut ctx = funded(dec!(1000));
        login(&mut ctx, "aud", Role::Auditor);
        assert!(matches!(
            OrderDesk::place_order(&mut ctx, request(dec!(10))),
            Err(DeskError::Workflow(
                WorkflowError::NotAuthorizedToPrepare { .. }
            ))
        ));
    }

    #[test]
    fn test_unknown_order() {
        let mut ctx = funded(dec!(1000));
        assert!(matches!(
            OrderDesk::cancel(&mut ctx, OrderId::new()),
            Err(DeskError::Workflow(WorkflowError::OrderNotFound(_)))
        ));
    }

    #[test]
    fn test_failed_transition_is_not_stored() {
        let mut ctx = funded(dec!(1000));
        let order = OrderDesk::place_order(&mut ctx, request(dec!(100))).unwrap();
        assert!(OrderDesk::settle(&mut ctx, order.id).is_err());
        let stored = ctx.orders().find(order.id).unwrap();
        assert_eq!(stored, order);
    }
}
