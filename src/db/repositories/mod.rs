pub mod channels;
pub mod documents;
pub mod members;
pub mod messages;
pub mod users;
pub mod workspaces;
