use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::Team;
use crate::messaging::context::{ContextKind, MessageContext};
use crate::messaging::directory::{Directory, DirectoryError};
use crate::messaging::recipient::{OwnerRef, Recipient};
use crate::messaging::Sender;

/// A message submission as received on the wire. Recipient hints select how
/// the recipient is derived; which hints are honored depends on the sender's
/// role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendSubmission {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub context: Option<MessageContext>,
    #[serde(default)]
    pub to_user_id: Option<Uuid>,
    #[serde(default)]
    pub to_team_id: Option<Uuid>,
    #[serde(default)]
    pub to_team_member_id: Option<Uuid>,
    #[serde(default)]
    pub is_team_inbox: bool,
    #[serde(default)]
    pub is_project_inbox: bool,
    #[serde(default)]
    pub project_id: Option<Uuid>,
}

/// Terminal resolution failures. Display strings are the exact client-facing
/// messages; `error.rs` maps variants onto HTTP statuses.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Subject and message are required")]
    MissingFields,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("Invalid recipient configuration")]
    InvalidRecipientConfiguration,

    #[error("Invalid recipient configuration for regular user")]
    InvalidRecipientHints,

    #[error("Invalid message configuration")]
    InvalidMessageConfiguration,

    #[error("Database error")]
    Directory(#[from] DirectoryError),
}

/// Resolve a submission to an authorized recipient.
///
/// Validation runs before any lookup, then exactly one strategy is selected:
/// admins with a context resolve from that context, everyone else resolves
/// through team membership. An admin without a context has no valid strategy.
pub async fn resolve(
    directory: &dyn Directory,
    sender: &Sender,
    submission: &SendSubmission,
) -> Result<Recipient, ResolveError> {
    if submission.subject.trim().is_empty() || submission.message.trim().is_empty() {
        return Err(ResolveError::MissingFields);
    }

    match (sender.is_admin(), &submission.context) {
        (true, Some(context)) => resolve_as_admin(directory, context, submission).await,
        (false, _) => resolve_as_member(directory, sender, submission).await,
        (true, None) => Err(ResolveError::InvalidMessageConfiguration),
    }
}

/// Admin strategy: derive the recipient from what the message concerns.
async fn resolve_as_admin(
    directory: &dyn Directory,
    context: &MessageContext,
    submission: &SendSubmission,
) -> Result<Recipient, ResolveError> {
    match context.kind {
        ContextKind::User => {
            let user_id = submission
                .to_user_id
                .ok_or(ResolveError::InvalidRecipientConfiguration)?;
            let user = directory
                .user_by_id(user_id)
                .await?
                .ok_or(ResolveError::NotFound("User"))?;
            Ok(Recipient::User { id: user.id, email: user.email })
        }
        ContextKind::Plugin => {
            let plugin_id = context
                .id
                .ok_or(ResolveError::InvalidRecipientConfiguration)?;
            let plugin = directory
                .plugin_by_id(plugin_id)
                .await?
                .ok_or(ResolveError::NotFound("Plugin"))?;
            resolve_owner(directory, plugin.owner(), "Plugin").await
        }
        ContextKind::Site => {
            let site_id = context
                .id
                .ok_or(ResolveError::InvalidRecipientConfiguration)?;
            let site = directory
                .site_by_id(site_id)
                .await?
                .ok_or(ResolveError::NotFound("Site"))?;
            resolve_owner(directory, site.owner(), "Site").await
        }
        ContextKind::Team => {
            let team_id = submission
                .to_team_id
                .ok_or(ResolveError::InvalidRecipientConfiguration)?;
            let team = directory
                .team_by_id(team_id)
                .await?
                .ok_or(ResolveError::NotFound("Team"))?;
            // Admin messages "to a team" go to the team's accountable owner,
            // not the team inbox. Kept as the platform behaves today.
            let owner = directory
                .user_by_id(team.owner_id)
                .await?
                .ok_or(ResolveError::NotFound("User"))?;
            Ok(Recipient::User { id: owner.id, email: owner.email })
        }
    }
}

/// Follow a plugin/site owner reference to its user or team. A missing owner
/// row, or an owner tag we do not recognize, means the ownable is orphaned.
async fn resolve_owner(
    directory: &dyn Directory,
    owner: Option<OwnerRef>,
    entity: &'static str,
) -> Result<Recipient, ResolveError> {
    match owner {
        Some(OwnerRef::User(user_id)) => {
            let user = directory
                .user_by_id(user_id)
                .await?
                .ok_or(ResolveError::NotFound("User"))?;
            Ok(Recipient::User { id: user.id, email: user.email })
        }
        Some(OwnerRef::Team(team_id)) => {
            let team = directory
                .team_by_id(team_id)
                .await?
                .ok_or(ResolveError::NotFound("Team"))?;
            Ok(Recipient::Team { id: team.id })
        }
        None => Err(ResolveError::NotFound(entity)),
    }
}

/// Member strategy: a regular sender may only address a team or project
/// inbox they belong to, a fellow active member, or the team's owner. Each
/// case re-verifies team existence and participation on its own.
async fn resolve_as_member(
    directory: &dyn Directory,
    sender: &Sender,
    submission: &SendSubmission,
) -> Result<Recipient, ResolveError> {
    if let (true, Some(team_id)) = (submission.is_team_inbox, submission.to_team_id) {
        let team = lookup_team(directory, team_id).await?;
        ensure_participant(&team, sender.id, "You are not a member of this team")?;
        return Ok(Recipient::Team { id: team.id });
    }

    if let (true, Some(project_id)) = (submission.is_project_inbox, submission.project_id) {
        let project = directory
            .project_by_id(project_id)
            .await?
            .ok_or(ResolveError::NotFound("Project"))?;
        let team = directory
            .team_by_id(project.team_id)
            .await?
            .ok_or(ResolveError::NotFound("Project team"))?;
        ensure_participant(&team, sender.id, "You are not a member of this project team")?;
        return Ok(Recipient::Team { id: team.id });
    }

    if let (Some(member_id), Some(team_id)) = (submission.to_team_member_id, submission.to_team_id) {
        let team = lookup_team(directory, team_id).await?;
        ensure_participant(&team, sender.id, "You are not a member of this team")?;
        if !team.has_active_participant(member_id) {
            return Err(ResolveError::Forbidden("Recipient is not a member of this team"));
        }
        let user = directory
            .user_by_id(member_id)
            .await?
            .ok_or(ResolveError::NotFound("User"))?;
        return Ok(Recipient::User { id: user.id, email: user.email });
    }

    if let (Some(user_id), Some(team_id)) = (submission.to_user_id, submission.to_team_id) {
        let team = lookup_team(directory, team_id).await?;
        ensure_participant(&team, sender.id, "You are not a member of this team")?;
        if team.owner_id != user_id {
            return Err(ResolveError::Forbidden("Invalid recipient"));
        }
        let owner = directory
            .user_by_id(user_id)
            .await?
            .ok_or(ResolveError::NotFound("User"))?;
        return Ok(Recipient::User { id: owner.id, email: owner.email });
    }

    Err(ResolveError::InvalidRecipientHints)
}

async fn lookup_team(directory: &dyn Directory, team_id: Uuid) -> Result<Team, ResolveError> {
    directory
        .team_by_id(team_id)
        .await?
        .ok_or(ResolveError::NotFound("Team"))
}

fn ensure_participant(
    team: &Team,
    user_id: Uuid,
    denial: &'static str,
) -> Result<(), ResolveError> {
    if team.has_active_participant(user_id) {
        Ok(())
    } else {
        Err(ResolveError::Forbidden(denial))
    }
}
