//! The order aggregate.

use chrono::{DateTime, Days, NaiveDate, Utc};
use finops_shared::Role;
use finops_shared::types::{EntityId, OrderId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflow::policy::CreditRating;
use crate::workflow::types::{Approval, OrderEvent, OrderEventKind, OrderStatus};

/// Input for placing an order.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// The investing entity.
    pub entity_id: EntityId,
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

/// An investment order.
///
/// `events` is the audit trail: it is only ever appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier.
    pub id: OrderId,
    /// The investing entity.
    pub entity_id: EntityId,
    /// Instrument identifier.
    pub instrument_slug: String,
    /// Instrument credit rating at placement.
    pub rating: CreditRating,
    /// Amount to invest.
    pub amount: Decimal,
    /// Expected annual yield in percent.
    pub expected_yield: Decimal,
    /// Tenor in days.
    pub tenor_days: u32,
    /// Current status.
    pub status: OrderStatus,
    /// The maker.
    pub created_by: UserId,
    /// The maker's role at placement.
    pub created_by_role: Role,
    /// Approvals in the order they were given.
    #[serde(default)]
    pub approvals: Vec<Approval>,
    /// Date funds settle (T+1 from placement).
    pub settlement_date: NaiveDate,
    /// Lifecycle events in the order they happened.
    #[serde(default)]
    pub events: Vec<OrderEvent>,
    /// Placement time.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates an order in `Created` status with its first audit event.
    #[must_use]
    pub fn create(
        draft: OrderDraft,
        created_by: UserId,
        created_by_role: Role,
        now: DateTime<Utc>,
    ) -> Self {
        let today = now.date_naive();
        let mut order = Self {
            id: OrderId::new(),
            entity_id: draft.entity_id,
            instrument_slug: draft.instrument_slug,
            rating: draft.rating,
            amount: draft.amount,
            expected_yield: draft.expected_yield,
            tenor_days: draft.tenor_days,
            status: OrderStatus::Created,
            created_by: created_by.clone(),
            created_by_role,
            approvals: Vec::new(),
            settlement_date: today.succ_opt().unwrap_or(today),
            events: Vec::new(),
            created_at: now,
        };
        order.record(OrderEventKind::Created, now, Some(created_by), None);
        order
    }

    /// Date the instrument matures, `None` past the last representable date.
    #[must_use]
    pub fn maturity_date(&self) -> Option<NaiveDate> {
        self.settlement_date
            .checked_add_days(Days::new(u64::from(self.tenor_days)))
    }

    /// Returns true if some approval came from a checker whose role differs
    /// from the maker's role.
    #[must_use]
    pub fn maker_checker_satisfied(&self) -> bool {
        self.approvals
            .iter()
            .any(|a| a.role != self.created_by_role && a.role.can_check())
    }

    /// Returns true if `user_id` already approved this order.
    #[must_use]
    pub fn approved_by(&self, user_id: &UserId) -> bool {
        self.approvals.iter().any(|a| &a.user_id == user_id)
    }

    /// Appends an audit event.
    pub(crate) fn record(
        &mut self,
        kind: OrderEventKind,
        ts: DateTime<Utc>,
        by: Option<UserId>,
        note: Option<String>,
    ) {
        self.events.push(OrderEvent { ts, kind, by, note });
    }
}
