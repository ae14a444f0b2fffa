use ferry_client::{
    Client, ClientConfig, ClientSpawned, ConnectError, ConnectionState, CreateAccount,
    EncodeError, Position, RawEvent, SendError, TargetProfile, TransportErrorCode,
};
use ferry_shared::ConnectionId;
use ferry_test::{init_logger, LocalSocket, LocalSocketHandle};

fn client() -> (Client, LocalSocketHandle) {
    init_logger();
    let (socket, handle) = LocalSocket::new();
    (Client::new(ClientConfig::default(), socket), handle)
}

fn spawned() -> ClientSpawned {
    ClientSpawned::new(7, Position::new(1.0, 2.0, 3.0))
}

// ============================================================================
// Init
// ============================================================================

#[test]
fn init_connects_and_registers_two_lane_topology() {
    let (mut client, handle) = client();
    assert_eq!(client.state(), ConnectionState::Uninitialized);

    let connection = client.init("127.0.0.1", 62000).unwrap();
    assert_eq!(connection.server().host, "127.0.0.1");
    assert_eq!(connection.server().port, 62000);

    assert_eq!(client.state(), ConnectionState::Connected);
    let server = handle.server().unwrap();
    assert_eq!(server.to_string(), "127.0.0.1:62000");

    let topology = handle.topology().unwrap();
    assert_eq!(topology.channels().len(), 2);
    assert_eq!(topology.max_peers(), 100);
}

#[test]
fn connect_uses_target_profile_port() {
    init_logger();
    let (socket, handle) = LocalSocket::new();
    let config = ClientConfig::default()
        .with_server("10.0.0.5")
        .with_profile(TargetProfile::Web);
    let mut client = Client::new(config, socket);

    client.connect().unwrap();

    let server = handle.server().unwrap();
    assert_eq!(server.host, "10.0.0.5");
    assert_eq!(server.port, 62001);
}

#[test]
fn init_failure_leaves_session_retryable() {
    let (mut client, handle) = client();
    handle.fail_next_init(TransportErrorCode::NoResources);

    let result = client.init("127.0.0.1", 62000).map(|_| ());
    assert_eq!(
        result,
        Err(ConnectError::TransportInitFailed(
            TransportErrorCode::NoResources
        ))
    );
    assert_eq!(client.state(), ConnectionState::Uninitialized);
    assert!(client.connection().is_none());

    client.init("127.0.0.1", 62000).unwrap();
    assert_eq!(client.state(), ConnectionState::Connected);
    assert_eq!(handle.init_calls(), 2);
}

#[test]
fn connect_failure_releases_transport_and_is_retryable() {
    let (mut client, handle) = client();
    handle.fail_next_connect(TransportErrorCode::DnsFailure);

    let result = client.init("nowhere.invalid", 62000).map(|_| ());
    assert_eq!(
        result,
        Err(ConnectError::ConnectFailed(TransportErrorCode::DnsFailure))
    );
    assert_eq!(client.state(), ConnectionState::Uninitialized);
    assert_eq!(handle.shutdown_calls(), 1);
    assert!(!handle.is_live());

    client.init("127.0.0.1", 62000).unwrap();
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[test]
fn reentrant_init_is_rejected() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();

    let result = client.init("127.0.0.1", 62000).map(|_| ());
    assert_eq!(result, Err(ConnectError::AlreadyStarted));
    assert_eq!(client.state(), ConnectionState::Connected);
    assert_eq!(handle.init_calls(), 1);
}

#[test]
fn zero_peer_topology_is_rejected() {
    init_logger();
    let (socket, handle) = LocalSocket::new();
    let config = ClientConfig {
        max_peers: 0,
        ..Default::default()
    };
    let mut client = Client::new(config, socket);

    assert!(matches!(
        client.init("127.0.0.1", 62000),
        Err(ConnectError::Topology(_))
    ));
    assert_eq!(client.state(), ConnectionState::Uninitialized);
    assert_eq!(handle.init_calls(), 0);
}

// ============================================================================
// Shutdown
// ============================================================================

#[test]
fn shutdown_twice_is_harmless() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();

    client.shutdown();
    assert_eq!(client.state(), ConnectionState::Closed);
    client.shutdown();
    assert_eq!(client.state(), ConnectionState::Closed);

    assert_eq!(handle.shutdown_calls(), 1);
    assert!(client.connection().is_none());
}

#[test]
fn closed_session_cannot_be_reinitialized() {
    let (mut client, _handle) = client();
    client.init("127.0.0.1", 62000).unwrap();
    client.shutdown();

    let result = client.init("127.0.0.1", 62000).map(|_| ());
    assert_eq!(result, Err(ConnectError::SessionClosed));
    assert_eq!(client.state(), ConnectionState::Closed);
}

#[test]
fn dropping_the_client_releases_the_transport() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();

    drop(client);
    assert_eq!(handle.shutdown_calls(), 1);
    assert!(!handle.is_live());
}

// ============================================================================
// Send
// ============================================================================

#[test]
fn send_before_init_is_not_connected() {
    let (mut client, handle) = client();
    assert_eq!(client.send(spawned(), true), Err(SendError::NotConnected));
    assert!(handle.sent().is_empty());
}

#[test]
fn send_after_shutdown_is_not_connected() {
    let (mut client, _handle) = client();
    client.init("127.0.0.1", 62000).unwrap();
    client.shutdown();
    assert_eq!(client.send(spawned(), false), Err(SendError::NotConnected));
}

#[test]
fn oversized_message_is_refused_before_the_transport() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();

    let account = CreateAccount {
        username: "u".repeat(2000),
        password: "hunter2".to_string(),
        email: "someone@example.com".to_string(),
    };
    let result = client.send(account, true);

    assert!(matches!(
        result,
        Err(SendError::EncodeFailed(EncodeError::Overflow {
            capacity: 1024,
            ..
        }))
    ));
    assert!(handle.sent().is_empty());
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[test]
fn transient_send_failure_keeps_session_open() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();
    handle.fail_next_send(TransportErrorCode::NoResources);

    assert_eq!(
        client.send(spawned(), true),
        Err(SendError::TransportSendFailed(
            TransportErrorCode::NoResources
        ))
    );
    assert_eq!(client.state(), ConnectionState::Connected);

    client.send(spawned(), true).unwrap();
    assert_eq!(handle.sent().len(), 1);
}

#[test]
fn connection_loss_on_send_closes_session() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();
    handle.fail_next_send(TransportErrorCode::ConnectionRefused);

    assert_eq!(
        client.send(spawned(), true),
        Err(SendError::TransportSendFailed(
            TransportErrorCode::ConnectionRefused
        ))
    );
    assert_eq!(client.state(), ConnectionState::Closed);
    assert!(!handle.is_live());
}

// ============================================================================
// Poll
// ============================================================================

#[test]
fn poll_before_init_returns_nothing_without_touching_transport() {
    let (mut client, handle) = client();
    handle.push_event(RawEvent::Connect {
        connection: ConnectionId(1),
    });

    assert_eq!(client.session_mut().poll_raw(), RawEvent::Nothing);
    assert_eq!(handle.receive_calls(), 0);
    assert_eq!(handle.pending(), 1);
}

#[test]
fn connection_loss_on_poll_closes_session() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();
    handle.push_event(RawEvent::Error(TransportErrorCode::Timeout));

    assert_eq!(
        client.session_mut().poll_raw(),
        RawEvent::Error(TransportErrorCode::Timeout)
    );
    assert_eq!(client.state(), ConnectionState::Closed);
    assert_eq!(client.session_mut().poll_raw(), RawEvent::Nothing);
}

#[test]
fn transient_poll_error_keeps_session_open() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();
    handle.push_event(RawEvent::Error(TransportErrorCode::BadMessage));

    client.session_mut().poll_raw();
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[test]
fn server_disconnect_closes_session() {
    let (mut client, handle) = client();
    client.init("127.0.0.1", 62000).unwrap();
    handle.push_event(RawEvent::Disconnect {
        connection: ConnectionId(1),
    });

    client.session_mut().poll_raw();
    assert_eq!(client.state(), ConnectionState::Closed);
    assert!(client.connection().is_none());
}
