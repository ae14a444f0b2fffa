use ferry_shared::{ChannelId, ChannelPolicy, ConnectionId, HostId};

use crate::transport::ServerTarget;

/// Lifecycle of a [`TransportSession`](crate::TransportSession).
///
/// `Uninitialized -> Connecting -> Connected -> ShuttingDown -> Closed`.
/// A failed `init` falls back to `Uninitialized`. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Uninitialized,
    Connecting,
    Connected,
    ShuttingDown,
    Closed,
}

/// The single client-to-server link, alive between `init` and `shutdown`
#[derive(Debug, Clone)]
pub struct Connection {
    host: HostId,
    id: ConnectionId,
    server: ServerTarget,
    channels: ChannelPolicy,
}

impl Connection {
    pub(crate) fn new(
        host: HostId,
        id: ConnectionId,
        server: ServerTarget,
        channels: ChannelPolicy,
    ) -> Self {
        Self {
            host,
            id,
            server,
            channels,
        }
    }

    pub fn host(&self) -> HostId {
        self.host
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn server(&self) -> &ServerTarget {
        &self.server
    }

    pub fn channels(&self) -> &ChannelPolicy {
        &self.channels
    }

    pub fn channel_for(&self, reliable: bool) -> ChannelId {
        self.channels.channel_for(reliable)
    }
}
