use serde::Serialize;
use uuid::Uuid;

/// The accountable party of a plugin or site: exactly one user or one team.
/// Rows store this as an `owner_type` tag plus `owner_id`; the enum keeps the
/// two cases exhaustively matched instead of string-compared per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerRef {
    User(Uuid),
    Team(Uuid),
}

impl OwnerRef {
    pub fn from_parts(owner_type: &str, owner_id: Uuid) -> Option<Self> {
        match owner_type {
            "user" => Some(OwnerRef::User(owner_id)),
            "team" => Some(OwnerRef::Team(owner_id)),
            _ => None,
        }
    }
}

/// A fully resolved, authorized message recipient. A user recipient always
/// carries its email; a team recipient never does, and is the only variant
/// that yields a `team_id` on the stored message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "recipient_type", rename_all = "lowercase")]
pub enum Recipient {
    User { id: Uuid, email: String },
    Team { id: Uuid },
}

impl Recipient {
    pub fn recipient_type(&self) -> &'static str {
        match self {
            Recipient::User { .. } => "user",
            Recipient::Team { .. } => "team",
        }
    }

    pub fn recipient_id(&self) -> Uuid {
        match self {
            Recipient::User { id, .. } => *id,
            Recipient::Team { id } => *id,
        }
    }

    pub fn recipient_email(&self) -> Option<&str> {
        match self {
            Recipient::User { email, .. } => Some(email),
            Recipient::Team { .. } => None,
        }
    }

    pub fn team_id(&self) -> Option<Uuid> {
        match self {
            Recipient::User { .. } => None,
            Recipient::Team { id } => Some(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_ref_rejects_unknown_tags() {
        let id = Uuid::new_v4();
        assert_eq!(OwnerRef::from_parts("user", id), Some(OwnerRef::User(id)));
        assert_eq!(OwnerRef::from_parts("team", id), Some(OwnerRef::Team(id)));
        assert_eq!(OwnerRef::from_parts("organization", id), None);
    }

    #[test]
    fn team_recipient_has_no_email_and_carries_team_id() {
        let id = Uuid::new_v4();
        let r = Recipient::Team { id };
        assert_eq!(r.recipient_type(), "team");
        assert_eq!(r.recipient_email(), None);
        assert_eq!(r.team_id(), Some(id));
    }

    #[test]
    fn user_recipient_has_email_and_no_team_id() {
        let id = Uuid::new_v4();
        let r = Recipient::User { id, email: "owner@example.com".into() };
        assert_eq!(r.recipient_type(), "user");
        assert_eq!(r.recipient_email(), Some("owner@example.com"));
        assert_eq!(r.team_id(), None);
    }
}
