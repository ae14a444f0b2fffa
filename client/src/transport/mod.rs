//! The substrate a [`TransportSession`](crate::TransportSession) drives.
//!
//! Anything that can open a host, connect it to `host:port`, poll for one
//! event without blocking, send on a channel and shut down can sit behind
//! [`Socket`].

cfg_if! {
    if #[cfg(feature = "transport_udp")] {
        pub mod udp;
    } else {}
}

mod server_target;

pub use server_target::ServerTarget;

use ferry_shared::{ChannelId, ConnectionId, HostId, RawEvent, Topology, TransportErrorCode};

pub trait Socket {
    /// Creates the local host and registers the channel topology with it
    fn init(&mut self, topology: &Topology) -> Result<HostId, TransportErrorCode>;

    /// Opens the outbound connection from `host` to `server`
    fn connect(
        &mut self,
        host: HostId,
        server: &ServerTarget,
    ) -> Result<ConnectionId, TransportErrorCode>;

    /// Returns the next pending event, or [`RawEvent::Nothing`]. Must not block.
    fn receive(&mut self) -> RawEvent;

    /// Queues `payload` for delivery on `channel`. Must not wait for acknowledgment.
    fn send(
        &mut self,
        host: HostId,
        connection: ConnectionId,
        channel: ChannelId,
        payload: &[u8],
    ) -> Result<(), TransportErrorCode>;

    /// Releases the connection and the host. Calling it again is a no-op.
    fn shutdown(&mut self);
}
