use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Plugin, Project, Site, Team, User};

/// Errors from the lookup layer. Every variant surfaces to the client as a
/// generic 500 "Database error"; the detail only reaches the logs.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}

/// Point lookups the resolver depends on. Every entity is read fresh per
/// resolution call; implementations hold no per-request state.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, DirectoryError>;
    async fn team_by_id(&self, id: Uuid) -> Result<Option<Team>, DirectoryError>;
    async fn plugin_by_id(&self, id: Uuid) -> Result<Option<Plugin>, DirectoryError>;
    async fn site_by_id(&self, id: Uuid) -> Result<Option<Site>, DirectoryError>;
    async fn project_by_id(&self, id: Uuid) -> Result<Option<Project>, DirectoryError>;
}

/// Directory backed by the fleet Postgres database
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn user_by_id(&self, id: Uuid) -> Result<Option<User>, DirectoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, full_name, role, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn team_by_id(&self, id: Uuid) -> Result<Option<Team>, DirectoryError> {
        // Teams created before the membership feature have a NULL members column
        let team = sqlx::query_as::<_, Team>(
            "SELECT id, name, owner_id, COALESCE(members, '[]'::jsonb) AS members, created_at, updated_at \
             FROM teams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(team)
    }

    async fn plugin_by_id(&self, id: Uuid) -> Result<Option<Plugin>, DirectoryError> {
        let plugin = sqlx::query_as::<_, Plugin>(
            "SELECT id, name, owner_type, owner_id, created_at, updated_at FROM plugins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(plugin)
    }

    async fn site_by_id(&self, id: Uuid) -> Result<Option<Site>, DirectoryError> {
        let site = sqlx::query_as::<_, Site>(
            "SELECT id, name, url, owner_type, owner_id, created_at, updated_at FROM sites WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(site)
    }

    async fn project_by_id(&self, id: Uuid) -> Result<Option<Project>, DirectoryError> {
        let project = sqlx::query_as::<_, Project>(
            "SELECT id, name, team_id, created_at, updated_at FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }
}
