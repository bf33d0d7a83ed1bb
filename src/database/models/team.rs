use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub user_id: Uuid,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub members: Json<Vec<TeamMember>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// The single membership predicate used by every authorization branch:
    /// the owner counts as an active participant even when absent from the
    /// members list.
    pub fn has_active_participant(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
            || self
                .members
                .iter()
                .any(|m| m.user_id == user_id && m.status == "active")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(owner_id: Uuid, members: Vec<TeamMember>) -> Team {
        let now = chrono::Utc::now();
        Team {
            id: Uuid::new_v4(),
            name: "Acme".into(),
            owner_id,
            members: Json(members),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_is_participant_even_when_absent_from_members() {
        let owner = Uuid::new_v4();
        let t = team(owner, vec![]);
        assert!(t.has_active_participant(owner));
    }

    #[test]
    fn active_member_is_participant() {
        let member = Uuid::new_v4();
        let t = team(
            Uuid::new_v4(),
            vec![TeamMember { user_id: member, status: "active".into() }],
        );
        assert!(t.has_active_participant(member));
    }

    #[test]
    fn inactive_member_is_not_participant() {
        let member = Uuid::new_v4();
        let t = team(
            Uuid::new_v4(),
            vec![TeamMember { user_id: member, status: "pending".into() }],
        );
        assert!(!t.has_active_participant(member));
    }

    #[test]
    fn stranger_is_not_participant() {
        let t = team(
            Uuid::new_v4(),
            vec![TeamMember { user_id: Uuid::new_v4(), status: "active".into() }],
        );
        assert!(!t.has_active_participant(Uuid::new_v4()));
    }
}
