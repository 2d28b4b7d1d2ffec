//! Entity KYC compliance records.
//!
//! A compliance record gates access to the application: only an entity whose
//! record status is exactly `Approved` may use protected routes. Every other
//! value, including unrecognised status strings, counts as not approved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// KYC status of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComplianceStatus {
    /// Onboarding started, nothing submitted yet.
    Draft,
    /// Onboarding data submitted for review.
    Submitted,
    /// Review in progress.
    UnderReview,
    /// KYC approved; the entity may use the application.
    Approved,
    /// KYC rejected; the entity must re-submit.
    Rejected,
    /// A stored status value this build does not know.
    Unknown(String),
}

impl ComplianceStatus {
    /// Parses a status. Matching is exact and case-sensitive.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Draft" => Self::Draft,
            "Submitted" => Self::Submitted,
            "Under Review" => Self::UnderReview,
            "Approved" => Self::Approved,
            "Rejected" => Self::Rejected,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Unknown(raw) => raw,
        }
    }

    /// Returns true only for `Approved`.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved)
    }

    /// Returns true if onboarding data may be (re-)submitted from this status.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }
}

impl From<String> for ComplianceStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ComplianceStatus> for String {
    fn from(status: ComplianceStatus) -> Self {
        match status {
            ComplianceStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The KYC record of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceRecord {
    /// Current status.
    pub status: ComplianceStatus,
    /// When the status last changed.
    pub ts: DateTime<Utc>,
    /// Onboarding form data as captured by the onboarding flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_data: Option<serde_json::Value>,
    /// When the record was approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
}

impl ComplianceRecord {
    /// A fresh draft record.
    #[must_use]
    pub fn draft(now: DateTime<Utc>) -> Self {
        Self {
            status: ComplianceStatus::Draft,
            ts: now,
            entity_data: None,
            approved_at: None,
        }
    }

    /// A submitted record carrying the onboarding data.
    #[must_use]
    pub fn submitted(entity_data: serde_json::Value, now: DateTime<Utc>) -> Self {
        Self {
            status: ComplianceStatus::Submitted,
            ts: now,
            entity_data: Some(entity_data),
            approved_at: None,
        }
    }

    /// An approved record.
    #[must_use]
    pub fn approved(entity_data: serde_json::Value, now: DateTime<Utc>) -> Self {
        Self {
            status: ComplianceStatus::Approved,
            ts: now,
            entity_data: Some(entity_data),
            approved_at: Some(now),
        }
    }

    /// Returns true if the record grants access.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status.is_approved()
    }
}
