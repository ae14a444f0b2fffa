pub mod channel;
pub mod channel_policy;
pub mod connection_config;
pub mod error;
