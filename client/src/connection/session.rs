use log::{info, warn};

use ferry_shared::{encode_into, ChannelPolicy, Message, RawEvent, TransportErrorCode};

use crate::{
    connection::connection::{Connection, ConnectionState},
    error::{ConnectError, SendError},
    transport::{ServerTarget, Socket},
};

/// Owns the one outbound connection and the substrate it runs on.
///
/// Every operation takes `&mut self` and is meant to be called from the
/// application's tick thread.
pub struct TransportSession {
    socket: Box<dyn Socket>,
    state: ConnectionState,
    connection: Option<Connection>,
    max_peers: u16,
    send_buffer: Vec<u8>,
}

impl TransportSession {
    pub fn new(socket: Box<dyn Socket>, max_datagram_size: usize, max_peers: u16) -> Self {
        Self {
            socket,
            state: ConnectionState::Uninitialized,
            connection: None,
            max_peers,
            send_buffer: vec![0; max_datagram_size],
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// Initializes the substrate, registers the two-lane topology and opens
    /// the connection to `server_addr:port`.
    ///
    /// On failure the session is back in `Uninitialized` and `init` may be
    /// retried.
    pub fn init(&mut self, server_addr: &str, port: u16) -> Result<&Connection, ConnectError> {
        match self.state {
            ConnectionState::Uninitialized => {}
            ConnectionState::Connecting | ConnectionState::Connected => {
                warn!("init called on a session that is already {:?}", self.state);
                return Err(ConnectError::AlreadyStarted);
            }
            ConnectionState::ShuttingDown | ConnectionState::Closed => {
                return Err(ConnectError::SessionClosed);
            }
        }

        let channels = ChannelPolicy::standard(self.max_peers)?;
        let server = ServerTarget::new(server_addr, port);

        self.state = ConnectionState::Connecting;

        let host = match self.socket.init(channels.topology()) {
            Ok(host) => host,
            Err(code) => {
                warn!("Transport init failed: {}", code);
                self.state = ConnectionState::Uninitialized;
                return Err(ConnectError::TransportInitFailed(code));
            }
        };

        let id = match self.socket.connect(host, &server) {
            Ok(id) => id,
            Err(code) => {
                warn!("Connecting to {} failed: {}", server, code);
                self.socket.shutdown();
                self.state = ConnectionState::Uninitialized;
                return Err(ConnectError::ConnectFailed(code));
            }
        };

        info!("Attempting to connect on {}...", server);
        self.state = ConnectionState::Connected;
        Ok(self
            .connection
            .insert(Connection::new(host, id, server, channels)))
    }

    /// Releases the connection and the substrate. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }
        self.state = ConnectionState::ShuttingDown;
        if let Some(connection) = self.connection.take() {
            info!("Shutting down connection to {}", connection.server());
        }
        self.socket.shutdown();
        self.state = ConnectionState::Closed;
    }

    /// Encodes `message` and hands it to the substrate on the lane the channel
    /// policy picks for `reliable`. Returns once the datagram is queued.
    pub fn send(&mut self, message: &Message, reliable: bool) -> Result<(), SendError> {
        let Some(connection) = self.connection.as_ref() else {
            return Err(SendError::NotConnected);
        };
        let host = connection.host();
        let id = connection.id();
        let channel = connection.channel_for(reliable);

        let length = encode_into(message, &mut self.send_buffer)?;

        if let Err(code) = self
            .socket
            .send(host, id, channel, &self.send_buffer[..length])
        {
            warn!(
                "Sending {} on {} failed: {}",
                message.kind(),
                channel,
                code
            );
            if code.is_connection_loss() {
                self.close_on_loss(code);
            }
            return Err(SendError::TransportSendFailed(code));
        }
        Ok(())
    }

    /// Polls the substrate for one event. Returns `Nothing` without touching
    /// the substrate unless connected.
    pub fn poll_raw(&mut self) -> RawEvent {
        if self.state != ConnectionState::Connected {
            return RawEvent::Nothing;
        }

        let event = self.socket.receive();
        match &event {
            RawEvent::Error(code) if code.is_connection_loss() => {
                self.close_on_loss(*code);
            }
            RawEvent::Disconnect { connection } => {
                info!("Server closed {}", connection);
                self.release();
            }
            _ => {}
        }
        event
    }

    fn close_on_loss(&mut self, code: TransportErrorCode) {
        warn!("Connection lost: {}", code);
        self.release();
    }

    fn release(&mut self) {
        self.connection = None;
        self.socket.shutdown();
        self.state = ConnectionState::Closed;
    }
}

impl Drop for TransportSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
