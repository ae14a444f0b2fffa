pub mod local_socket;

pub use helpers::{init_logger, FakeServer};
pub use local_socket::{LocalSocket, LocalSocketHandle, SentDatagram};
