//! Plain UDP substrate with a reliable-ordered lane built on per-packet acks
//! and resends, next to an unreliable pass-through lane.

mod packet;
mod reliable;
mod socket;

pub use packet::{PacketHeader, PacketType, HEADER_BYTES};
pub use reliable::{OrderedReceiver, ReliableSender, RECEIVE_WINDOW, SEND_WINDOW};
pub use socket::{Socket, UdpConfig};
