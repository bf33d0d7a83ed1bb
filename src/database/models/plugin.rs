use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::messaging::recipient::OwnerRef;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plugin {
    pub id: Uuid,
    pub name: String,
    pub owner_type: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plugin {
    /// Tagged owner reference; `None` for an unrecognized `owner_type`,
    /// which callers treat the same as an orphaned owner.
    pub fn owner(&self) -> Option<OwnerRef> {
        OwnerRef::from_parts(&self.owner_type, self.owner_id)
    }
}
