/// Identifies a lane on the connection. Assigned in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u8);

impl ChannelId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "channel#{}", self.0)
    }
}

/// Delivery guarantee of a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// Every payload arrives, in send order. Retransmitted by the transport.
    ReliableOrdered,
    /// Payloads may be lost, duplicated or reordered. Never retransmitted.
    Unreliable,
}

impl ChannelMode {
    pub fn is_reliable(&self) -> bool {
        matches!(self, ChannelMode::ReliableOrdered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub mode: ChannelMode,
}
