use thiserror::Error;

/// Errors that can occur while reading values out of a byte buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerdeErr {
    /// The buffer ended before the value's layout was fully read
    #[error("Buffer truncated: needed {needed} more byte(s) at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    /// The bytes were present but do not form a valid value
    #[error("Malformed {what} at offset {offset}")]
    Malformed { what: &'static str, offset: usize },
}
