use std::{
    collections::{HashMap, VecDeque},
    io,
    net::{SocketAddr, ToSocketAddrs, UdpSocket},
    time::{Duration, Instant},
};

use log::{debug, info, warn};

use ferry_shared::{
    ChannelId, ChannelMode, ConnectionId, HostId, RawEvent, Topology, TransportErrorCode,
    MAX_DATAGRAM_BYTES,
};

use super::{
    packet::{PacketHeader, PacketType, HEADER_BYTES},
    reliable::{OrderedReceiver, ReliableSender},
};
use crate::transport::{ServerTarget, Socket as TransportSocket};

/// Settings for the UDP substrate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpConfig {
    /// Local address to bind. Port 0 picks an ephemeral port.
    pub bind_addr: SocketAddr,
    /// Largest payload accepted by `send`, excluding the packet header
    pub max_payload_size: usize,
    /// How long an unacknowledged reliable packet or handshake waits before resending
    pub resend_interval: Duration,
    /// Upper bound on datagrams read by one `receive` call while looking for an event
    pub max_datagrams_per_poll: usize,
}

impl Default for UdpConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 0)),
            max_payload_size: MAX_DATAGRAM_BYTES,
            resend_interval: Duration::from_millis(100),
            max_datagrams_per_poll: 64,
        }
    }
}

struct ReliableLane {
    sender: ReliableSender,
    receiver: OrderedReceiver,
}

struct Link {
    id: ConnectionId,
    accepted: bool,
    last_handshake: Instant,
    lanes: HashMap<ChannelId, ReliableLane>,
}

struct Host {
    id: HostId,
    socket: UdpSocket,
    topology: Topology,
    link: Option<Link>,
}

pub struct Socket {
    config: UdpConfig,
    host: Option<Host>,
    ready: VecDeque<RawEvent>,
    recv_buffer: Vec<u8>,
    next_host_id: u32,
}

impl Socket {
    pub fn new(config: UdpConfig) -> Self {
        let recv_buffer = vec![0; HEADER_BYTES + config.max_payload_size];
        Self {
            config,
            host: None,
            ready: VecDeque::new(),
            recv_buffer,
            next_host_id: 1,
        }
    }

    /// Local address of the bound socket, once initialized
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.host
            .as_ref()
            .and_then(|host| host.socket.local_addr().ok())
    }
}

impl Default for Socket {
    fn default() -> Self {
        Self::new(UdpConfig::default())
    }
}

impl From<Socket> for Box<dyn TransportSocket> {
    fn from(socket: Socket) -> Self {
        Box::new(socket)
    }
}

impl TransportSocket for Socket {
    fn init(&mut self, topology: &Topology) -> Result<HostId, TransportErrorCode> {
        if self.host.is_some() {
            return Err(TransportErrorCode::WrongOperation);
        }

        let socket = UdpSocket::bind(self.config.bind_addr).map_err(|error| {
            warn!("Binding {} failed: {}", self.config.bind_addr, error);
            TransportErrorCode::NoResources
        })?;
        socket
            .set_nonblocking(true)
            .map_err(|error| map_io_error(&error))?;

        let id = HostId(self.next_host_id);
        self.next_host_id = self.next_host_id.wrapping_add(1);
        self.host = Some(Host {
            id,
            socket,
            topology: topology.clone(),
            link: None,
        });
        Ok(id)
    }

    fn connect(
        &mut self,
        host: HostId,
        server: &ServerTarget,
    ) -> Result<ConnectionId, TransportErrorCode> {
        let bind_is_ipv4 = self.config.bind_addr.is_ipv4();
        let Some(live) = self.host.as_mut().filter(|live| live.id == host) else {
            return Err(TransportErrorCode::WrongHost);
        };
        if live.link.is_some() {
            return Err(TransportErrorCode::WrongOperation);
        }

        let addr = (server.host.as_str(), server.port)
            .to_socket_addrs()
            .map_err(|error| {
                warn!("Resolving {} failed: {}", server, error);
                TransportErrorCode::DnsFailure
            })?
            .find(|addr| addr.is_ipv4() == bind_is_ipv4)
            .ok_or(TransportErrorCode::DnsFailure)?;

        live.socket
            .connect(addr)
            .map_err(|error| map_io_error(&error))?;

        let lanes = live
            .topology
            .channels()
            .iter()
            .filter(|channel| channel.mode == ChannelMode::ReliableOrdered)
            .map(|channel| {
                (
                    channel.id,
                    ReliableLane {
                        sender: ReliableSender::new(),
                        receiver: OrderedReceiver::new(),
                    },
                )
            })
            .collect();

        send_packet(&live.socket, &PacketHeader::control(PacketType::Connect).to_packet(&[]))?;

        let id = ConnectionId(1);
        live.link = Some(Link {
            id,
            accepted: false,
            last_handshake: Instant::now(),
            lanes,
        });
        debug!("Handshake sent to {}", addr);
        Ok(id)
    }

    fn receive(&mut self) -> RawEvent {
        let Self {
            config,
            host,
            ready,
            recv_buffer,
            ..
        } = self;
        let Some(Host {
            id: host_id,
            socket,
            topology,
            link: Some(link),
        }) = host.as_mut()
        else {
            return RawEvent::Nothing;
        };

        let now = Instant::now();
        let mut lost = None;
        if !link.accepted && now.duration_since(link.last_handshake) >= config.resend_interval {
            if let Err(code) =
                send_packet(socket, &PacketHeader::control(PacketType::Connect).to_packet(&[]))
            {
                lost = lost.or(Some(code).filter(TransportErrorCode::is_connection_loss));
            }
            link.last_handshake = now;
        }
        for lane in link.lanes.values_mut() {
            lane.sender
                .resend_due(now, config.resend_interval, |packet| {
                    if let Err(code) = send_packet(socket, packet) {
                        lost = lost.or(Some(code).filter(TransportErrorCode::is_connection_loss));
                    }
                });
        }
        if let Some(code) = lost {
            return RawEvent::Error(code);
        }

        if let Some(event) = ready.pop_front() {
            return event;
        }

        for _ in 0..config.max_datagrams_per_poll {
            let length = match socket.recv(recv_buffer) {
                Ok(length) => length,
                Err(error) if error.kind() == io::ErrorKind::WouldBlock => {
                    return RawEvent::Nothing;
                }
                Err(error) => {
                    debug!("Receive failed: {}", error);
                    return RawEvent::Error(map_io_error(&error));
                }
            };

            handle_packet(
                *host_id,
                socket,
                topology,
                link,
                &recv_buffer[..length],
                ready,
            );

            if let Some(event) = ready.pop_front() {
                return event;
            }
        }

        RawEvent::Nothing
    }

    fn send(
        &mut self,
        host: HostId,
        connection: ConnectionId,
        channel: ChannelId,
        payload: &[u8],
    ) -> Result<(), TransportErrorCode> {
        let Some(live) = self.host.as_mut().filter(|live| live.id == host) else {
            return Err(TransportErrorCode::WrongHost);
        };
        let Some(link) = live.link.as_mut().filter(|link| link.id == connection) else {
            return Err(TransportErrorCode::WrongConnection);
        };
        if payload.len() > self.config.max_payload_size {
            return Err(TransportErrorCode::MessageTooLong);
        }
        let mode = live
            .topology
            .channel(channel)
            .map(|channel| channel.mode)
            .ok_or(TransportErrorCode::WrongChannel)?;

        match mode {
            ChannelMode::Unreliable => {
                let packet = PacketHeader::data(channel.get(), 0).to_packet(payload);
                send_packet(&live.socket, &packet)
            }
            ChannelMode::ReliableOrdered => {
                let lane = link
                    .lanes
                    .get_mut(&channel)
                    .ok_or(TransportErrorCode::WrongChannel)?;
                let sequence = lane.sender.next_sequence()?;
                let packet = PacketHeader::data(channel.get(), sequence).to_packet(payload);
                let result = send_packet(&live.socket, &packet);
                lane.sender.track(sequence, packet, Instant::now());
                match result {
                    // queued for resend; delivery is still guaranteed
                    Err(TransportErrorCode::NoResources) => Ok(()),
                    other => other,
                }
            }
        }
    }

    fn shutdown(&mut self) {
        self.ready.clear();
        let Some(host) = self.host.take() else {
            return;
        };
        if host.link.is_some() {
            if let Err(code) = send_packet(
                &host.socket,
                &PacketHeader::control(PacketType::Disconnect).to_packet(&[]),
            ) {
                debug!("Sending disconnect failed: {}", code);
            }
            info!("Disconnected from server");
        }
    }
}

fn handle_packet(
    host_id: HostId,
    socket: &UdpSocket,
    topology: &Topology,
    link: &mut Link,
    packet: &[u8],
    ready: &mut VecDeque<RawEvent>,
) {
    let (header, payload) = match PacketHeader::from_packet(packet) {
        Ok(parts) => parts,
        Err(error) => {
            debug!("Discarding malformed packet: {}", error);
            return;
        }
    };
    let channel = ChannelId::new(header.channel);

    match header.packet_type {
        PacketType::ConnectAccept => {
            if !link.accepted {
                link.accepted = true;
                ready.push_back(RawEvent::Connect {
                    connection: link.id,
                });
            }
        }
        PacketType::Disconnect => {
            ready.push_back(RawEvent::Disconnect {
                connection: link.id,
            });
        }
        PacketType::Connect => {
            debug!("Ignoring connect request; clients do not accept connections");
        }
        PacketType::Ack => {
            if let Some(lane) = link.lanes.get_mut(&channel) {
                lane.sender.ack(header.sequence);
            }
        }
        PacketType::Data => match topology.channel(channel).map(|channel| channel.mode) {
            None => debug!("Discarding data on unknown {}", channel),
            Some(ChannelMode::Unreliable) => ready.push_back(RawEvent::Data {
                host: host_id,
                connection: link.id,
                channel,
                payload: payload.to_vec(),
            }),
            Some(ChannelMode::ReliableOrdered) => {
                let Some(lane) = link.lanes.get_mut(&channel) else {
                    return;
                };
                let Some(released) = lane.receiver.receive(header.sequence, payload.to_vec())
                else {
                    debug!(
                        "Sequence {} on {} is outside the receive window",
                        header.sequence, channel
                    );
                    return;
                };
                let acked = send_packet(
                    socket,
                    &PacketHeader::ack(header.channel, header.sequence).to_packet(&[]),
                );
                for payload in released {
                    ready.push_back(RawEvent::Data {
                        host: host_id,
                        connection: link.id,
                        channel,
                        payload,
                    });
                }
                if let Err(code) = acked {
                    warn!(
                        "Acking sequence {} on {} failed: {}",
                        header.sequence, channel, code
                    );
                    if code.is_connection_loss() {
                        ready.push_back(RawEvent::Error(code));
                    }
                }
            }
        },
    }
}

fn send_packet(socket: &UdpSocket, packet: &[u8]) -> Result<(), TransportErrorCode> {
    socket
        .send(packet)
        .map(|_| ())
        .map_err(|error| map_io_error(&error))
}

fn map_io_error(error: &io::Error) -> TransportErrorCode {
    match error.kind() {
        // ICMP port unreachable surfaces as refused on unix and as reset on windows
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => {
            TransportErrorCode::ConnectionRefused
        }
        io::ErrorKind::WouldBlock => TransportErrorCode::NoResources,
        io::ErrorKind::AddrNotAvailable => TransportErrorCode::WrongHost,
        _ => TransportErrorCode::Io,
    }
}
