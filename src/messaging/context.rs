use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a message concerns. Only meaningful for admin senders, where it
/// drives recipient resolution; for regular senders it is stored with the
/// message untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    User,
    Plugin,
    Site,
    Team,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContext {
    #[serde(rename = "type")]
    pub kind: ContextKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}
