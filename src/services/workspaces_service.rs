use diesel::Connection;
use diesel::prelude::PgConnection;
use uuid::Uuid;

use crate::{
    db::enums::{ChannelType, MemberRole},
    db::models::channel::NewChannel,
    db::models::workspace::{NewWorkspace, Workspace, WorkspaceSummary},
    db::models::workspace_member::{MemberInfo, NewWorkspaceMember, WorkspaceMember},
    db::repositories::channels::ChannelsRepo,
    db::repositories::documents::DocumentsRepo,
    db::repositories::members::MembersRepo,
    db::repositories::messages::MessagesRepo,
    db::repositories::workspaces::WorkspacesRepo,
    error::AppError,
    services::context::RequestContext,
};

const SEARCH_LIMIT: i64 = 50;
const DEFAULT_CHANNEL: &str = "general";

pub struct WorkspacesService;

impl WorkspacesService {
    /// Creates the workspace, its owner membership and the default
    /// "general" channel atomically.
    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        name: &str,
        description: Option<String>,
        icon: Option<String>,
        password: &str,
        bcrypt_cost: u32,
    ) -> Result<Workspace, AppError> {
        let password_hash = bcrypt::hash(password, bcrypt_cost)?;

        let workspace = conn.transaction::<_, AppError, _>(|conn| {
            let workspace = WorkspacesRepo::insert(
                conn,
                &NewWorkspace {
                    name: name.to_string(),
                    description,
                    icon,
                    password_hash,
                },
            )?;

            MembersRepo::insert(
                conn,
                &NewWorkspaceMember {
                    workspace_id: workspace.id,
                    user_id: ctx.user_id.clone(),
                    user_name: ctx.user_name.clone(),
                    user_email: ctx.user_email.clone(),
                    role: MemberRole::Owner,
                },
            )?;

            ChannelsRepo::insert(
                conn,
                &NewChannel {
                    workspace_id: workspace.id,
                    name: DEFAULT_CHANNEL.to_string(),
                    channel_type: ChannelType::Channel,
                    participants: vec![],
                    dm_key: None,
                },
            )?;

            Ok(workspace)
        })?;

        tracing::info!(workspace_id = %workspace.id, owner = %ctx.user_id, "Workspace created");
        Ok(workspace)
    }

    pub fn list_for_user(
        conn: &mut PgConnection,
        user_id: &str,
    ) -> Result<Vec<Workspace>, AppError> {
        Ok(WorkspacesRepo::list_for_user(conn, user_id)?)
    }

    pub fn get(conn: &mut PgConnection, workspace_id: Uuid) -> Result<Workspace, AppError> {
        WorkspacesRepo::find_by_id(conn, workspace_id)?
            .ok_or_else(|| AppError::not_found("Workspace"))
    }

    /// Password hashes never leave this layer; search results are reduced
    /// to summaries.
    pub fn search(
        conn: &mut PgConnection,
        query: &str,
    ) -> Result<Vec<WorkspaceSummary>, AppError> {
        let results = WorkspacesRepo::search(conn, query, SEARCH_LIMIT)?;
        Ok(results.into_iter().map(WorkspaceSummary::from).collect())
    }

    pub fn join(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        workspace_id: Uuid,
        password: &str,
    ) -> Result<WorkspaceMember, AppError> {
        let workspace = WorkspacesRepo::find_by_id(conn, workspace_id)?
            .ok_or_else(|| AppError::not_found("Workspace"))?;

        if !bcrypt::verify(password, &workspace.password_hash)? {
            return Err(AppError::auth("Invalid password"));
        }

        let member = MembersRepo::insert(
            conn,
            &NewWorkspaceMember {
                workspace_id,
                user_id: ctx.user_id.clone(),
                user_name: ctx.user_name.clone(),
                user_email: ctx.user_email.clone(),
                role: MemberRole::Editor,
            },
        )?
        .ok_or_else(|| AppError::conflict("You are already a member of this workspace"))?;

        WorkspacesRepo::touch(conn, workspace_id)?;
        Ok(member)
    }

    pub fn members(
        conn: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<Vec<MemberInfo>, AppError> {
        WorkspacesRepo::find_by_id(conn, workspace_id)?
            .ok_or_else(|| AppError::not_found("Workspace"))?;

        let members = MembersRepo::list_by_workspace(conn, workspace_id)?;
        Ok(members.into_iter().map(MemberInfo::from).collect())
    }

    /// Deleting a workspace is owner-only; the role is read back from the
    /// membership table, never taken from the request.
    pub fn delete(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        workspace_id: Uuid,
    ) -> Result<(), AppError> {
        WorkspacesRepo::find_by_id(conn, workspace_id)?
            .ok_or_else(|| AppError::not_found("Workspace"))?;

        let requester = MembersRepo::find(conn, workspace_id, &ctx.user_id)?
            .ok_or_else(|| AppError::forbidden("Not a member of this workspace"))?;
        if requester.role != MemberRole::Owner {
            return Err(AppError::forbidden(
                "Only the workspace owner can delete it",
            ));
        }

        conn.transaction::<_, AppError, _>(|conn| {
            let channel_ids: Vec<String> = ChannelsRepo::ids_by_workspace(conn, workspace_id)?
                .into_iter()
                .map(|id| id.to_string())
                .collect();
            MessagesRepo::delete_by_channels(conn, &channel_ids)?;
            ChannelsRepo::delete_by_workspace(conn, workspace_id)?;
            DocumentsRepo::delete_by_workspace(conn, workspace_id)?;
            MembersRepo::delete_by_workspace(conn, workspace_id)?;
            WorkspacesRepo::delete_by_id(conn, workspace_id)?;
            Ok(())
        })?;

        tracing::info!(workspace_id = %workspace_id, requester = %ctx.user_id, "Workspace deleted");
        Ok(())
    }
}
