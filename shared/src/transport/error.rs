use thiserror::Error;

/// Failure codes reported by a transport substrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TransportErrorCode {
    #[error("Unknown or uninitialized host")]
    WrongHost,

    #[error("Unknown or closed connection")]
    WrongConnection,

    #[error("Channel is not part of the connection topology")]
    WrongChannel,

    #[error("Transport ran out of buffers or sockets")]
    NoResources,

    #[error("Malformed transport packet")]
    BadMessage,

    #[error("Peer stopped responding")]
    Timeout,

    #[error("Payload exceeds the maximum datagram size")]
    MessageTooLong,

    #[error("Operation not valid in the current transport state")]
    WrongOperation,

    #[error("Peer refused the connection")]
    ConnectionRefused,

    #[error("Could not resolve the server address")]
    DnsFailure,

    #[error("Socket I/O failure")]
    Io,
}

impl TransportErrorCode {
    /// Whether the code means the link to the server is gone for good
    pub fn is_connection_loss(&self) -> bool {
        matches!(
            self,
            TransportErrorCode::Timeout
                | TransportErrorCode::WrongConnection
                | TransportErrorCode::ConnectionRefused
        )
    }
}
