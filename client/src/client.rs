use ferry_shared::{ChannelId, Message, MessagePayload};

use crate::{
    client_config::ClientConfig,
    connection::{
        connection::{Connection, ConnectionState},
        session::TransportSession,
    },
    dispatcher::{Dispatcher, MessageContext},
    error::{ConnectError, SendError},
    pump::{pump_once, PumpOutcome},
    transport::Socket,
};

/// Application-facing handle: a [`TransportSession`] plus the [`Dispatcher`]
/// its inbound messages are routed to.
///
/// Call [`Client::pump_once`] once per tick from whatever loop drives the
/// application.
pub struct Client {
    config: ClientConfig,
    session: TransportSession,
    dispatcher: Dispatcher,
}

impl Client {
    pub fn new<S: Into<Box<dyn Socket>>>(config: ClientConfig, socket: S) -> Self {
        let session =
            TransportSession::new(socket.into(), config.max_datagram_size, config.max_peers);
        Self {
            config,
            session,
            dispatcher: Dispatcher::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Connects to the server and port selected by the configured target profile
    pub fn connect(&mut self) -> Result<&Connection, ConnectError> {
        let port = self.config.target_port();
        self.session.init(&self.config.server_addr, port)
    }

    /// Connects to an explicit server address and port
    pub fn init(&mut self, server_addr: &str, port: u16) -> Result<&Connection, ConnectError> {
        self.session.init(server_addr, port)
    }

    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }

    pub fn send<M: Into<Message>>(&mut self, message: M, reliable: bool) -> Result<(), SendError> {
        self.session.send(&message.into(), reliable)
    }

    pub fn pump_once(&mut self) -> PumpOutcome {
        pump_once(&mut self.session, &mut self.dispatcher)
    }

    /// Registers a handler for messages of kind `M::KIND`
    pub fn on<M, F>(&mut self, handler: F) -> &mut Self
    where
        M: MessagePayload + 'static,
        F: FnMut(&MessageContext, &M) + 'static,
    {
        self.dispatcher.on::<M, F>(handler);
        self
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    pub fn session(&self) -> &TransportSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TransportSession {
        &mut self.session
    }

    pub fn state(&self) -> ConnectionState {
        self.session.state()
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.session.connection()
    }

    /// Lane the next `send` with this reliability flag would use, while connected
    pub fn channel_for(&self, reliable: bool) -> Option<ChannelId> {
        self.session
            .connection()
            .map(|connection| connection.channel_for(reliable))
    }
}
