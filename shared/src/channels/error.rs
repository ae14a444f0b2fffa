use thiserror::Error;

use crate::channels::channel::ChannelMode;

/// Errors that can occur while building the channel topology
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// More channels were registered than a channel id can address
    #[error("Cannot register more than {limit} channels on one connection")]
    TooManyChannels { limit: usize },

    /// Topology was sized for zero peers
    #[error("Topology must allow at least one peer")]
    ZeroPeers,

    /// The policy needs exactly one lane of this mode but none was registered
    #[error("No {mode:?} channel registered. The channel policy needs exactly one")]
    MissingMode { mode: ChannelMode },

    /// The policy needs exactly one lane of this mode but several were registered
    #[error("{count} {mode:?} channels registered. The channel policy needs exactly one")]
    DuplicateMode { mode: ChannelMode, count: usize },
}
