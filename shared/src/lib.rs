//! # Ferry Shared
//! Message model, wire codec and channel policy used by the ferry client
//! and by the transports it runs on.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use ferry_serde::{
    ByteReader, ByteWrite, ByteWriter, ConstByteLength, Serde, SerdeErr, MAX_DATAGRAM_BYTES,
};

mod channels;
mod messages;
mod transport;
mod wrapping_number;

pub use channels::{
    channel::{Channel, ChannelId, ChannelMode},
    channel_policy::ChannelPolicy,
    connection_config::{ConnectionConfig, Topology, MAX_CHANNELS},
    error::ChannelError,
};
pub use messages::{
    codec::{decode, encode, encode_into},
    error::{DecodeError, EncodeError},
    message::{
        ClientSpawned, CreateAccount, EmptyMessage, Message, MessagePayload, PlayerMoved,
        Position,
    },
    message_kind::MessageKind,
};
pub use transport::{
    error::TransportErrorCode,
    raw_event::{RawEvent, RawEventKind},
    types::{ConnectionId, HostId},
};
pub use wrapping_number::{sequence_greater_than, sequence_less_than};
