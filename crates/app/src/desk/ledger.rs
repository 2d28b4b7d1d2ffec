//! Cash ledger operations.

use chrono::Utc;
use finops_core::ledger::{
    Balances, EntryType, LedgerEngine, LedgerEntry, LedgerError, LedgerService, LedgerStatus,
    NewLedgerEntry,
};
use finops_shared::Session;
use finops_shared::types::{EntityId, LedgerEntryId};
use rust_decimal::Decimal;
use tracing::info;

use crate::context::AppContext;
use crate::error::DeskError;

/// Stateless desk recording and settling cash movements.
pub struct LedgerDesk;

impl LedgerDesk {
    /// Records a deposit for the session's entity.
    ///
    /// `cleared` deposits start as `Credited`; others start `In-Settlement`.
    pub fn record_credit(
        ctx: &mut AppContext,
        method: &str,
        amount: Decimal,
        utr: Option<String>,
        cleared: bool,
    ) -> Result<LedgerEntry, DeskError> {
        let status = if cleared {
            LedgerStatus::Credited
        } else {
            LedgerStatus::InSettlement
        };
        Self::record(ctx, EntryType::Credit, method, amount, utr, status)
    }

    /// Records a withdrawal for the session's entity. Withdrawals start
    /// `In-Settlement`.
    pub fn record_debit(
        ctx: &mut AppContext,
        method: &str,
        amount: Decimal,
        utr: Option<String>,
    ) -> Result<LedgerEntry, DeskError> {
        Self::record(
            ctx,
            EntryType::Debit,
            method,
            amount,
            utr,
            LedgerStatus::InSettlement,
        )
    }

    /// Marks an entry in settlement as credited.
    pub fn mark_credited(ctx: &mut AppContext, id: LedgerEntryId) -> Result<LedgerEntry, DeskError> {
        Self::transition(ctx, id, LedgerStatus::Credited)
    }

    /// Marks an entry in settlement as failed.
    pub fn mark_failed(ctx: &mut AppContext, id: LedgerEntryId) -> Result<LedgerEntry, DeskError> {
        Self::transition(ctx, id, LedgerStatus::Failed)
    }

    /// Entries of the session's entity, newest first.
    pub fn entries(ctx: &mut AppContext) -> Result<Vec<LedgerEntry>, DeskError> {
        let session = ctx.require_session()?;
        Ok(ctx.ledger().for_entity(&AppContext::entity_of(&session)))
    }

    /// Balances of the session's entity.
    pub fn balances(ctx: &mut AppContext) -> Result<Balances, DeskError> {
        let session = ctx.require_session()?;
        Ok(Self::balances_for(ctx, &AppContext::entity_of(&session)))
    }

    /// Balances of `entity_id`, folded from the stored ledger and portfolio.
    #[must_use]
    pub fn balances_for(ctx: &AppContext, entity_id: &EntityId) -> Balances {
        LedgerEngine::compute_balances(entity_id, &ctx.ledger().list(), &ctx.portfolio().list())
    }

    fn record(
        ctx: &mut AppContext,
        entry_type: EntryType,
        method: &str,
        amount: Decimal,
        utr: Option<String>,
        status: LedgerStatus,
    ) -> Result<LedgerEntry, DeskError> {
        let session = ctx.require_session()?;
        Self::ensure_can_operate(&session, "record ledger entries")?;

        let entry = LedgerService::create_entry(
            NewLedgerEntry {
                entity_id: AppContext::entity_of(&session),
                entry_type,
                method: method.to_string(),
                amount,
                utr,
                status,
            },
            Utc::now(),
        )?;
        ctx.ledger().append(entry.clone())?;

        info!(
            entry_id = %entry.id,
            entity_id = %entry.entity_id,
            amount = %entry.amount,
            status = %entry.status,
            "Ledger entry recorded"
        );
        Ok(entry)
    }

    fn transition(
        ctx: &mut AppContext,
        id: LedgerEntryId,
        to: LedgerStatus,
    ) -> Result<LedgerEntry, DeskError> {
        let session = ctx.require_session()?;
        Self::ensure_can_operate(&session, "settle ledger entries")?;
        let entity_id = AppContext::entity_of(&session);

        let updated = ctx.ledger().update(id, |entry| {
            if entry.entity_id != entity_id {
                return Err(DeskError::from(LedgerError::EntryNotFound(id)));
            }
            LedgerService::transition(entry, to.clone()).map_err(DeskError::from)
        })?;

        let entry = updated.ok_or(LedgerError::EntryNotFound(id))?;
        info!(entry_id = %entry.id, status = %entry.status, "Ledger entry settled");
        Ok(entry)
    }

    /// Read-only roles may look but not touch.
    fn ensure_can_operate(session: &Session, action: &'static str) -> Result<(), DeskError> {
        if session.role.can_prepare() || session.role.can_check() {
            Ok(())
        } else {
            Err(DeskError::Forbidden {
                role: session.role.clone(),
                action,
            })
        }
    }
}
