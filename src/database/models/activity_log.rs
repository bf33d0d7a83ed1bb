use serde::Serialize;
use uuid::Uuid;

/// Insert shape for the `activitylogs` table
#[derive(Debug, Clone, Serialize)]
pub struct NewActivityLog {
    pub user_email: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub details: String,
}
