pub mod auth;
pub mod channel;
pub mod document;
pub mod message;
pub mod workspace;
