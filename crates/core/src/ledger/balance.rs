//! Entity balance derivation.
//!
//! Balances are never stored. They are folded from the ledger and portfolio
//! snapshots on every call:
//! - credits: cleared credits (`CREDIT` + `Credited`)
//! - in settlement: debits still moving (`DEBIT` + `In-Settlement`)
//! - invested: principal of all holdings
//! - available: `max(0, credits - in settlement)`
//!
//! Sums saturate at `Decimal::MAX` instead of panicking on hand-edited
//! snapshots.

use finops_shared::types::EntityId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::LedgerEntry;
use super::holding::PortfolioHolding;

/// Balances of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balances {
    /// Cash free to invest. Never negative.
    pub available: Decimal,
    /// Debits not yet settled.
    pub in_settlement: Decimal,
    /// Principal held in the portfolio.
    pub invested: Decimal,
}

/// Stateless engine deriving balances from raw records.
pub struct LedgerEngine;

impl LedgerEngine {
    /// Computes the balances of `entity_id`.
    ///
    /// Records of other entities are ignored. The result depends only on the
    /// inputs, so repeated calls over the same snapshot are identical.
    #[must_use]
    pub fn compute_balances(
        entity_id: &EntityId,
        entries: &[LedgerEntry],
        holdings: &[PortfolioHolding],
    ) -> Balances {
        let (credits, in_settlement) = entries
            .iter()
            .filter(|e| &e.entity_id == entity_id)
            .fold((Decimal::ZERO, Decimal::ZERO), |(credits, pending), e| {
                if e.is_cleared_credit() {
                    (credits.saturating_add(e.amount), pending)
                } else if e.is_pending_debit() {
                    (credits, pending.saturating_add(e.amount))
                } else {
                    (credits, pending)
                }
            });

        let invested = holdings
            .iter()
            .filter(|h| &h.entity_id == entity_id)
            .map(|h| h.principal)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        Balances {
            available: credits.saturating_sub(in_settlement).max(Decimal::ZERO),
            in_settlement,
            invested,
        }
    }

    /// Principal already held in one instrument by `entity_id`.
    #[must_use]
    pub fn instrument_exposure(
        entity_id: &EntityId,
        instrument_slug: &str,
        holdings: &[PortfolioHolding],
    ) -> Decimal {
        holdings
            .iter()
            .filter(|h| &h.entity_id == entity_id && h.instrument_slug == instrument_slug)
            .map(|h| h.principal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
