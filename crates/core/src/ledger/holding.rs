//! Portfolio holdings.

use chrono::{DateTime, NaiveDate, Utc};
use finops_shared::types::{EntityId, HoldingId, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An invested position created when an order settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioHolding {
    /// Unique identifier for this holding.
    pub id: HoldingId,
    /// The owning entity.
    pub entity_id: EntityId,
    /// The order that created the holding.
    pub order_id: OrderId,
    /// Instrument identifier.
    pub instrument_slug: String,
    /// Invested principal.
    pub principal: Decimal,
    /// Expected annual yield in percent.
    pub expected_yield: Decimal,
    /// Date the funds settled.
    pub settlement_date: NaiveDate,
    /// Date the instrument matures.
    pub maturity_date: NaiveDate,
    /// When the holding was recorded.
    pub created_at: DateTime<Utc>,
}
