//! Session and role types for the client-side authorization gate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{EntityId, UserId};

/// Role of a user within an entity.
///
/// Stored as a plain string. Known values map to dedicated variants; anything
/// else is kept verbatim in [`Role::Other`] so that role checks stay exhaustive
/// and unknown roles fail closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Full access, may both prepare and check.
    Owner,
    /// Checker in the maker-checker flow.
    Approver,
    /// Maker in the maker-checker flow.
    Preparer,
    /// Read-only access.
    Auditor,
    /// Any role string not recognised above.
    Other(String),
}

impl Role {
    /// Parses a role. Matching is exact; unknown values become `Other`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Owner" => Self::Owner,
            "Approver" => Self::Approver,
            "Preparer" => Self::Preparer,
            "Auditor" => Self::Auditor,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Owner => "Owner",
            Self::Approver => "Approver",
            Self::Preparer => "Preparer",
            Self::Auditor => "Auditor",
            Self::Other(raw) => raw,
        }
    }

    /// Returns true if the role may create (make) orders.
    #[must_use]
    pub fn can_prepare(&self) -> bool {
        matches!(self, Self::Owner | Self::Preparer)
    }

    /// Returns true if the role may approve (check) orders.
    #[must_use]
    pub fn can_check(&self) -> bool {
        matches!(self, Self::Owner | Self::Approver)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated session held by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The signed-in user.
    pub user_id: UserId,
    /// User email.
    pub email: String,
    /// User's role in the entity.
    pub role: Role,
    /// The entity the user acts for. Older sessions may lack it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<EntityId>,
    /// Whether the user finished onboarding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarded: Option<bool>,
}

impl Session {
    /// Creates a session bound to an entity.
    #[must_use]
    pub fn new(
        user_id: impl Into<UserId>,
        email: impl Into<String>,
        role: Role,
        entity_id: impl Into<EntityId>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            role,
            entity_id: Some(entity_id.into()),
            onboarded: None,
        }
    }

    /// Returns the session's entity, or `fallback` when the session has none.
    #[must_use]
    pub fn entity_or(&self, fallback: &EntityId) -> EntityId {
        self.entity_id.clone().unwrap_or_else(|| fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Owner", Role::Owner)]
    #[case("Approver", Role::Approver)]
    #[case("Preparer", Role::Preparer)]
    #[case("Auditor", Role::Auditor)]
    #[case("owner", Role::Other("owner".to_string()))]
    #[case("Treasurer", Role::Other("Treasurer".to_string()))]
    fn test_role_parse(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(Role::parse(raw), expected);
        assert_eq!(Role::parse(raw).as_str(), raw);
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Owner.can_prepare());
        assert!(Role::Owner.can_check());
        assert!(Role::Preparer.can_prepare());
        assert!(!Role::Preparer.can_check());
        assert!(Role::Approver.can_check());
        assert!(!Role::Approver.can_prepare());
        assert!(!Role::Auditor.can_prepare());
        assert!(!Role::Auditor.can_check());
        assert!(!Role::Other("CFO".into()).can_check());
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let session = Session::new("user-001", "demo@finops.dev", Role::Preparer, "entity-001");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["userId"], "user-001");
        assert_eq!(json["role"], "Preparer");
        assert_eq!(json["entityId"], "entity-001");
        assert!(json.get("onboarded").is_none());
    }

    #[test]
    fn test_session_accepts_unknown_role_and_missing_entity() {
        let raw = r#"{"userId":"u","email":"e@x.io","role":"Controller"}"#;
        let session: Session = serde_json::from_str(raw).unwrap();
        assert_eq!(session.role, Role::Other("Controller".to_string()));
        assert!(session.entity_id.is_none());

        let fallback = EntityId::new("entity-001");
        assert_eq!(session.entity_or(&fallback), fallback);
    }

    #[test]
    fn test_session_round_trip() {
        let mut session = Session::new("user-9", "ops@urbanthreads.in", Role::Owner, "urban-threads");
        session.onboarded = Some(true);
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
