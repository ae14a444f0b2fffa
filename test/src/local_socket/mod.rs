/// In-memory substrate for E2E testing
/// Scripts inbound events and records outbound datagrams without network I/O

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use ferry_client::transport::{ServerTarget, Socket};
use ferry_shared::{
    encode, ChannelId, ConnectionId, HostId, Message, RawEvent, Topology, TransportErrorCode,
    MAX_DATAGRAM_BYTES,
};

pub const LOCAL_HOST: HostId = HostId(1);
pub const LOCAL_CONNECTION: ConnectionId = ConnectionId(1);

/// One datagram handed to `Socket::send`
#[derive(Debug, Clone, PartialEq)]
pub struct SentDatagram {
    pub host: HostId,
    pub connection: ConnectionId,
    pub channel: ChannelId,
    pub payload: Vec<u8>,
}

#[derive(Default)]
struct LocalState {
    incoming: VecDeque<RawEvent>,
    sent: Vec<SentDatagram>,
    topology: Option<Topology>,
    server: Option<ServerTarget>,
    live: bool,
    init_calls: usize,
    receive_calls: usize,
    shutdown_calls: usize,
    fail_init: Option<TransportErrorCode>,
    fail_connect: Option<TransportErrorCode>,
    fail_send: Option<TransportErrorCode>,
}

/// The substrate half, owned by the session under test
pub struct LocalSocket {
    state: Arc<Mutex<LocalState>>,
}

/// The test's half: scripts events and inspects what the session did
#[derive(Clone)]
pub struct LocalSocketHandle {
    state: Arc<Mutex<LocalState>>,
}

impl LocalSocket {
    pub fn new() -> (Self, LocalSocketHandle) {
        let state = Arc::new(Mutex::new(LocalState::default()));
        (
            Self {
                state: state.clone(),
            },
            LocalSocketHandle { state },
        )
    }

    fn state(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap()
    }
}

impl From<LocalSocket> for Box<dyn Socket> {
    fn from(socket: LocalSocket) -> Self {
        Box::new(socket)
    }
}

impl Socket for LocalSocket {
    fn init(&mut self, topology: &Topology) -> Result<HostId, TransportErrorCode> {
        let mut state = self.state();
        state.init_calls += 1;
        if let Some(code) = state.fail_init.take() {
            return Err(code);
        }
        state.topology = Some(topology.clone());
        state.live = true;
        Ok(LOCAL_HOST)
    }

    fn connect(
        &mut self,
        host: HostId,
        server: &ServerTarget,
    ) -> Result<ConnectionId, TransportErrorCode> {
        let mut state = self.state();
        if host != LOCAL_HOST || !state.live {
            return Err(TransportErrorCode::WrongHost);
        }
        if let Some(code) = state.fail_connect.take() {
            return Err(code);
        }
        state.server = Some(server.clone());
        Ok(LOCAL_CONNECTION)
    }

    fn receive(&mut self) -> RawEvent {
        let mut state = self.state();
        state.receive_calls += 1;
        if !state.live {
            return RawEvent::Nothing;
        }
        state.incoming.pop_front().unwrap_or(RawEvent::Nothing)
    }

    fn send(
        &mut self,
        host: HostId,
        connection: ConnectionId,
        channel: ChannelId,
        payload: &[u8],
    ) -> Result<(), TransportErrorCode> {
        let mut state = self.state();
        if let Some(code) = state.fail_send.take() {
            return Err(code);
        }
        state.sent.push(SentDatagram {
            host,
            connection,
            channel,
            payload: payload.to_vec(),
        });
        Ok(())
    }

    fn shutdown(&mut self) {
        let mut state = self.state();
        state.shutdown_calls += 1;
        state.live = false;
    }
}

impl LocalSocketHandle {
    fn state(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap()
    }

    pub fn push_event(&self, event: RawEvent) {
        self.state().incoming.push_back(event);
    }

    /// Queues `message` as a full-size datagram arriving on `channel`
    pub fn push_message(&self, message: &Message, channel: ChannelId) {
        let payload = encode(message, MAX_DATAGRAM_BYTES).unwrap();
        self.push_data(payload, channel);
    }

    pub fn push_data(&self, payload: Vec<u8>, channel: ChannelId) {
        self.push_event(RawEvent::Data {
            host: LOCAL_HOST,
            connection: LOCAL_CONNECTION,
            channel,
            payload,
        });
    }

    pub fn pending(&self) -> usize {
        self.state().incoming.len()
    }

    pub fn sent(&self) -> Vec<SentDatagram> {
        self.state().sent.clone()
    }

    pub fn topology(&self) -> Option<Topology> {
        self.state().topology.clone()
    }

    pub fn server(&self) -> Option<ServerTarget> {
        self.state().server.clone()
    }

    pub fn is_live(&self) -> bool {
        self.state().live
    }

    pub fn init_calls(&self) -> usize {
        self.state().init_calls
    }

    pub fn receive_calls(&self) -> usize {
        self.state().receive_calls
    }

    pub fn shutdown_calls(&self) -> usize {
        self.state().shutdown_calls
    }

    /// Makes the next `init` fail with `code`
    pub fn fail_next_init(&self, code: TransportErrorCode) {
        self.state().fail_init = Some(code);
    }

    /// Makes the next `connect` fail with `code`
    pub fn fail_next_connect(&self, code: TransportErrorCode) {
        self.state().fail_connect = Some(code);
    }

    /// Makes the next `send` fail with `code`
    pub fn fail_next_send(&self, code: TransportErrorCode) {
        self.state().fail_send = Some(code);
    }
}
