use ferry_serde::SerdeErr;
use thiserror::Error;

/// Errors that can occur while encoding a message into a datagram buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The serialized message does not fit the datagram capacity
    #[error("Message needs {needed} bytes but the datagram capacity is {capacity} bytes. Nothing was written")]
    Overflow { needed: usize, capacity: usize },
}

/// Errors that can occur while decoding a received datagram
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The datagram ended before the message layout was complete
    #[error("Datagram truncated at offset {offset}: {needed} more byte(s) required by the message layout")]
    Truncated { offset: usize, needed: usize },

    /// The discriminant byte does not name a known message kind
    #[error("Unknown message kind discriminant {0}. The sender may be running a newer protocol")]
    UnknownKind(u8),

    /// The bytes are present but do not form a valid message
    #[error("Malformed {what} at offset {offset}")]
    Malformed { what: &'static str, offset: usize },
}

impl From<SerdeErr> for DecodeError {
    fn from(error: SerdeErr) -> Self {
        match error {
            SerdeErr::Truncated { offset, needed } => DecodeError::Truncated { offset, needed },
            SerdeErr::Malformed { what, offset } => DecodeError::Malformed { what, offset },
        }
    }
}
