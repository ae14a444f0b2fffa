pub mod codec;
pub mod error;
pub mod message;
pub mod message_kind;
