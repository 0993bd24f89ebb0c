use diesel::prelude::PgConnection;
use uuid::Uuid;

use crate::{
    db::enums::ChannelType,
    db::models::channel::{Channel, NewChannel},
    db::repositories::channels::{ChannelsRepo, dm_key},
    db::repositories::workspaces::WorkspacesRepo,
    error::AppError,
    validation::channel::{validate_channel_name, validate_dm_pair},
};

pub struct ChannelsService;

impl ChannelsService {
    pub fn list_by_workspace(
        conn: &mut PgConnection,
        workspace_id: Uuid,
    ) -> Result<Vec<Channel>, AppError> {
        Ok(ChannelsRepo::list_by_workspace(conn, workspace_id)?)
    }

    pub fn create(
        conn: &mut PgConnection,
        workspace_id: Uuid,
        name: &str,
        channel_type: ChannelType,
        participants: Vec<String>,
    ) -> Result<Channel, AppError> {
        validate_channel_name(name)?;
        WorkspacesRepo::find_by_id(conn, workspace_id)?
            .ok_or_else(|| AppError::not_found("Workspace"))?;

        let channel = ChannelsRepo::insert(
            conn,
            &NewChannel {
                workspace_id,
                name: name.to_string(),
                channel_type,
                participants,
                dm_key: None,
            },
        )?;
        Ok(channel)
    }

    /// Resolves the DM channel for an unordered participant pair, creating
    /// it on first use. Concurrent calls from both participants converge on
    /// one row via the `(workspace, dm_key)` uniqueness constraint.
    pub fn get_or_create_dm(
        conn: &mut PgConnection,
        workspace_id: Uuid,
        user_a: &str,
        user_b: &str,
        name_a: &str,
        name_b: &str,
    ) -> Result<Channel, AppError> {
        validate_dm_pair(user_a, user_b)?;

        let key = dm_key(user_a, user_b);
        if let Some(existing) = ChannelsRepo::find_dm(conn, workspace_id, &key)? {
            return Ok(existing);
        }

        WorkspacesRepo::find_by_id(conn, workspace_id)?
            .ok_or_else(|| AppError::not_found("Workspace"))?;

        let new_channel = NewChannel {
            workspace_id,
            name: format!("DM: {} & {}", name_a, name_b),
            channel_type: ChannelType::Dm,
            participants: vec![user_a.to_string(), user_b.to_string()],
            dm_key: Some(key.clone()),
        };

        match ChannelsRepo::try_insert_dm(conn, &new_channel)? {
            Some(created) => Ok(created),
            // Lost the race; the other participant's insert won.
            None => ChannelsRepo::find_dm(conn, workspace_id, &key)?
                .ok_or_else(|| AppError::internal("DM channel vanished after conflict")),
        }
    }
}
