use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{NewActivityLog, NewMessage};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}

/// Write side of message delivery. Split from resolution so the
/// authorization logic never touches storage.
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn create_message(&self, message: &NewMessage) -> Result<Uuid, StoreError>;
    async fn record_activity(&self, entry: &NewActivityLog) -> Result<(), StoreError>;
}

/// Commit a resolved message: persist it, then append the activity-log entry.
///
/// The two writes are deliberately not transactional: a failed audit insert
/// after a successful message insert is logged and swallowed, matching how
/// the platform has always behaved. No write of any kind happens before this
/// point, so a failed resolution leaves no partial state.
pub async fn deliver(store: &dyn MessageStore, message: &NewMessage) -> Result<Uuid, StoreError> {
    let message_id = store.create_message(message).await?;

    let target = match &message.recipient_email {
        Some(email) => email.clone(),
        None => message.recipient_id.to_string(),
    };
    let entry = NewActivityLog {
        user_email: message.sender_email.clone(),
        action: format!("Bericht verzonden: {}", message.subject),
        entity_type: "user".to_string(),
        entity_id: message.sender_id,
        details: format!("Naar {}: {}", message.recipient_type, target),
    };
    if let Err(e) = store.record_activity(&entry).await {
        tracing::warn!("activity log write failed for message {}: {}", message_id, e);
    }

    Ok(message_id)
}

/// Message store backed by the fleet Postgres database
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PgMessageStore {
    async fn create_message(&self, message: &NewMessage) -> Result<Uuid, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO messages (\
                subject, message, sender_id, sender_email, sender_name, \
                recipient_type, recipient_id, recipient_email, team_id, \
                is_read, is_archived, priority, status, category, context) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING id",
        )
        .bind(&message.subject)
        .bind(&message.message)
        .bind(message.sender_id)
        .bind(&message.sender_email)
        .bind(&message.sender_name)
        .bind(&message.recipient_type)
        .bind(message.recipient_id)
        .bind(&message.recipient_email)
        .bind(message.team_id)
        .bind(message.is_read)
        .bind(message.is_archived)
        .bind(&message.priority)
        .bind(&message.status)
        .bind(&message.category)
        .bind(&message.context)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn record_activity(&self, entry: &NewActivityLog) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO activitylogs (user_email, action, entity_type, entity_id, details) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&entry.user_email)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(entry.entity_id)
        .bind(&entry.details)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
