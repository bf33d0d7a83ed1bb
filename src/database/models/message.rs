use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::messaging::recipient::Recipient;
use crate::messaging::Sender;

/// Insert shape for the `messages` table. Delivery state fields are fixed at
/// creation time; replies and read/archive transitions happen elsewhere in
/// the platform.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub subject: String,
    pub message: String,
    pub sender_id: Uuid,
    pub sender_email: String,
    pub sender_name: Option<String>,
    pub recipient_type: String,
    pub recipient_id: Uuid,
    pub recipient_email: Option<String>,
    pub team_id: Option<Uuid>,
    pub is_read: bool,
    pub is_archived: bool,
    pub priority: String,
    pub status: String,
    pub category: String,
    pub context: Value,
}

impl NewMessage {
    pub fn compose(
        sender: &Sender,
        subject: String,
        message: String,
        context: Value,
        recipient: &Recipient,
    ) -> Self {
        Self {
            subject,
            message,
            sender_id: sender.id,
            sender_email: sender.email.clone(),
            sender_name: sender.full_name.clone(),
            recipient_type: recipient.recipient_type().to_string(),
            recipient_id: recipient.recipient_id(),
            recipient_email: recipient.recipient_email().map(str::to_string),
            team_id: recipient.team_id(),
            is_read: false,
            is_archived: false,
            priority: "normal".to_string(),
            status: "open".to_string(),
            category: "general".to_string(),
            context,
        }
    }
}
