use thiserror::Error;

use ferry_shared::{ChannelError, EncodeError, TransportErrorCode};

/// Errors that can occur while bringing a session up
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// The substrate could not create a host for the topology
    #[error("Transport initialization failed: {0}")]
    TransportInitFailed(TransportErrorCode),

    /// The host was created but the outbound connection could not be opened
    #[error("Connecting to the server failed: {0}")]
    ConnectFailed(TransportErrorCode),

    /// The channel topology could not be built from the configuration
    #[error("Invalid channel topology: {0}")]
    Topology(#[from] ChannelError),

    /// `init` was called on a session that is already connecting or connected
    #[error("Session is already initialized. Call shutdown() before creating a new session")]
    AlreadyStarted,

    /// `init` was called on a session that has been shut down
    #[error("Session is closed. Closed sessions cannot be reinitialized")]
    SessionClosed,
}

/// Errors that can occur while sending a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    /// No live connection
    #[error("Cannot send: session is not connected")]
    NotConnected,

    /// The message could not be framed
    #[error("Cannot send: {0}")]
    EncodeFailed(#[from] EncodeError),

    /// The substrate rejected the datagram
    #[error("Transport rejected the datagram: {0}")]
    TransportSendFailed(TransportErrorCode),
}

/// Errors that can occur while resolving startup configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set but its value could not be parsed
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    /// The target profile name is not recognized
    #[error("Unknown target profile {0:?}. Expected \"standalone\" or \"web\"")]
    UnknownProfile(String),

    /// A size that must be positive was zero
    #[error("{key} must be greater than zero")]
    Zero { key: &'static str },
}
