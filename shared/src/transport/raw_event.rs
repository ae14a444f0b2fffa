use crate::{
    channels::channel::ChannelId,
    transport::{
        error::TransportErrorCode,
        types::{ConnectionId, HostId},
    },
};

/// Result of one non-blocking receive poll
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    /// A datagram arrived on a channel
    Data {
        host: HostId,
        connection: ConnectionId,
        channel: ChannelId,
        payload: Vec<u8>,
    },
    /// Nothing pending
    Nothing,
    /// The peer accepted the connection
    Connect { connection: ConnectionId },
    /// The peer closed the connection
    Disconnect { connection: ConnectionId },
    /// A connectionless broadcast datagram
    Broadcast { host: HostId, payload: Vec<u8> },
    /// The substrate reported a failure while receiving
    Error(TransportErrorCode),
}

/// Payload-free tag of a [`RawEvent`], for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawEventKind {
    Data,
    Nothing,
    Connect,
    Disconnect,
    Broadcast,
    Error,
}

impl RawEvent {
    pub fn kind(&self) -> RawEventKind {
        match self {
            RawEvent::Data { .. } => RawEventKind::Data,
            RawEvent::Nothing => RawEventKind::Nothing,
            RawEvent::Connect { .. } => RawEventKind::Connect,
            RawEvent::Disconnect { .. } => RawEventKind::Disconnect,
            RawEvent::Broadcast { .. } => RawEventKind::Broadcast,
            RawEvent::Error(_) => RawEventKind::Error,
        }
    }
}
