//! # Ferry Client
//! A client that holds a single connection to a game server, sends messages
//! over a reliable-ordered or an unreliable lane, and pumps one inbound event
//! per tick into typed message handlers.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub mod transport;

mod client;
mod client_config;
mod connection;
mod dispatcher;
mod error;
mod pump;

pub use ferry_shared::{
    ChannelId, ChannelMode, ClientSpawned, ConnectionId, CreateAccount, DecodeError,
    EmptyMessage, EncodeError, HostId, Message, MessageKind, MessagePayload, PlayerMoved,
    Position, RawEvent, RawEventKind, TransportErrorCode,
};

pub use client::Client;
pub use client_config::{ClientConfig, TargetProfile};
pub use connection::{
    connection::{Connection, ConnectionState},
    session::TransportSession,
};
pub use dispatcher::{Dispatcher, MessageContext};
pub use error::{ConfigError, ConnectError, SendError};
pub use pump::{pump_once, PumpOutcome};
