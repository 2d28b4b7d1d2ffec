//! Entity investment policy and the policy engine.
//!
//! Each entity has one policy. It bounds what may be ordered (credit
//! quality, tenor, concentration) and sets the amount from which an order
//! needs a checker.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::error::PolicyViolation;
use crate::workflow::order::OrderDraft;

/// Long-term credit rating of an instrument.
///
/// Ordered from weakest to strongest, so `rating >= min_rating` reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreditRating {
    /// BBB-
    #[serde(rename = "BBB-")]
    BbbMinus,
    /// BBB
    #[serde(rename = "BBB")]
    Bbb,
    /// BBB+
    #[serde(rename = "BBB+")]
    BbbPlus,
    /// A-
    #[serde(rename = "A-")]
    AMinus,
    /// A
    #[serde(rename = "A")]
    A,
    /// A+
    #[serde(rename = "A+")]
    APlus,
    /// AA-
    #[serde(rename = "AA-")]
    AaMinus,
    /// AA
    #[serde(rename = "AA")]
    Aa,
    /// AA+
    #[serde(rename = "AA+")]
    AaPlus,
    /// AAA (and sovereign)
    #[serde(rename = "AAA")]
    Aaa,
}

impl CreditRating {
    /// Parses a rating symbol.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BBB-" => Some(Self::BbbMinus),
            "BBB" => Some(Self::Bbb),
            "BBB+" => Some(Self::BbbPlus),
            "A-" => Some(Self::AMinus),
            "A" => Some(Self::A),
            "A+" => Some(Self::APlus),
            "AA-" => Some(Self::AaMinus),
            "AA" => Some(Self::Aa),
            "AA+" => Some(Self::AaPlus),
            "AAA" | "SOV" => Some(Self::Aaa),
            _ => None,
        }
    }

    /// Returns the rating symbol.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BbbMinus => "BBB-",
            Self::Bbb => "BBB",
            Self::BbbPlus => "BBB+",
            Self::AMinus => "A-",
            Self::A => "A",
            Self::APlus => "A+",
            Self::AaMinus => "AA-",
            Self::Aa => "AA",
            Self::AaPlus => "AA+",
            Self::Aaa => "AAA",
        }
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Investment policy of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Weakest acceptable instrument rating.
    pub min_rating: CreditRating,
    /// Longest acceptable tenor in days.
    pub max_tenor_days: u32,
    /// Largest share of total funds one instrument may take, in percent.
    pub concentration_cap_pct: Decimal,
    /// Orders at or above this amount need a checker.
    pub maker_checker_threshold: Decimal,
}

impl Policy {
    /// Returns true if an order of `amount` needs a distinct-role approval.
    #[must_use]
    pub fn requires_checker(&self, amount: Decimal) -> bool {
        amount >= self.maker_checker_threshold
    }
}

impl Default for Policy {
    /// Conservative treasury defaults: AA and above, up to one year, at most a
    /// quarter of funds per instrument, checker from 10 lakh.
    fn default() -> Self {
        Self {
            min_rating: CreditRating::Aa,
            max_tenor_days: 365,
            concentration_cap_pct: Decimal::new(25, 0),
            maker_checker_threshold: Decimal::new(1_000_000, 0),
        }
    }
}

/// Funds position an order is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Exposure {
    /// Cash available to invest.
    pub available: Decimal,
    /// Principal already invested across all instruments.
    pub invested: Decimal,
    /// Principal already invested in the ordered instrument.
    pub instrument_principal: Decimal,
}

/// Hard ceiling on tenor, whatever a policy allows: one hundred years.
pub const MAX_TENOR_DAYS: u32 = 36_500;

/// Stateless engine evaluating orders against a policy.
pub struct PolicyEngine;

impl PolicyEngine {
    /// Checks a draft order against `policy` and the entity's `exposure`.
    ///
    /// Checks run in order and the first violation is returned:
    /// amount, tenor, rating, funds, concentration. Tenor is also bounded
    /// by [`MAX_TENOR_DAYS`]. Concentration fails closed when total funds
    /// are not positive.
    pub fn check(
        policy: &Policy,
        draft: &OrderDraft,
        exposure: &Exposure,
    ) -> Result<(), PolicyViolation> {
        if draft.amount <= Decimal::ZERO {
            return Err(PolicyViolation::NonPositiveAmount(draft.amount));
        }

        let max_tenor_days = policy.max_tenor_days.min(MAX_TENOR_DAYS);
        if draft.tenor_days == 0 || draft.tenor_days > max_tenor_days {
            return Err(PolicyViolation::TenorOutOfRange {
                tenor_days: draft.tenor_days,
                max_tenor_days,
            });
        }

        if draft.rating < policy.min_rating {
            return Err(PolicyViolation::RatingBelowMinimum {
                rating: draft.rating,
                min_rating: policy.min_rating,
            });
        }

        if draft.amount > exposure.available {
            return Err(PolicyViolation::InsufficientFunds {
                amount: draft.amount,
                available: exposure.available,
            });
        }

        let total_funds = exposure.available.saturating_add(exposure.invested);
        let concentrated = exposure.instrument_principal.saturating_add(draft.amount);
        let within_cap = total_funds > Decimal::ZERO
            && concentrated
                .checked_div(total_funds)
                .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED))
                .is_some_and(|pct| pct <= policy.concentration_cap_pct);
        if !within_cap {
            return Err(PolicyViolation::ConcentrationExceeded {
                instrument_slug: draft.instrument_slug.clone(),
                cap_pct: policy.concentration_cap_pct,
            });
        }

        Ok(())
    }
}
