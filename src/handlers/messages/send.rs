use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::database::models::NewMessage;
use crate::error::ApiError;
use crate::messaging::{resolve, SendSubmission, Sender};
use crate::middleware::AuthUser;
use crate::services;
use crate::state::AppState;

/// POST /api/messages - resolve the recipient, authorize the sender, then
/// persist the message. Resolution happens entirely before the first write.
pub async fn send_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(submission): Json<SendSubmission>,
) -> Result<impl IntoResponse, ApiError> {
    let sender = Sender::from(auth);

    let recipient = resolve(state.directory.as_ref(), &sender, &submission).await?;

    let context = submission
        .context
        .as_ref()
        .and_then(|c| serde_json::to_value(c).ok())
        .unwrap_or_else(|| json!({}));

    let message = NewMessage::compose(
        &sender,
        submission.subject,
        submission.message,
        context,
        &recipient,
    );
    let message_id = services::deliver(state.store.as_ref(), &message).await?;

    tracing::info!(
        "message {} sent by {} to {} {}",
        message_id,
        sender.email,
        recipient.recipient_type(),
        recipient.recipient_id()
    );

    Ok(Json(json!({
        "success": true,
        "message": "Bericht succesvol verzonden",
        "message_id": message_id
    })))
}
