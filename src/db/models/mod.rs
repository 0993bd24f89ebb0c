// Sub-modules organized by domain entity
pub mod channel;
pub mod document;
pub mod message;
pub mod user;
pub mod workspace;
pub mod workspace_member;

pub use channel::*;
pub use document::*;
pub use message::*;
pub use user::*;
pub use workspace::*;
pub use workspace_member::*;
