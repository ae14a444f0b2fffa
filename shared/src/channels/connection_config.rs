use crate::channels::{
    channel::{Channel, ChannelId, ChannelMode},
    error::ChannelError,
};

/// Channel ids are a single byte on the wire
pub const MAX_CHANNELS: usize = u8::MAX as usize + 1;

/// Collects channel registrations before the topology is sealed
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfig {
    channels: Vec<Channel>,
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a lane and returns the id it will be addressed by
    pub fn add_channel(&mut self, mode: ChannelMode) -> Result<ChannelId, ChannelError> {
        if self.channels.len() >= MAX_CHANNELS {
            return Err(ChannelError::TooManyChannels {
                limit: MAX_CHANNELS,
            });
        }
        // len < 256 was just checked
        let id = ChannelId::new(self.channels.len() as u8);
        self.channels.push(Channel { id, mode });
        Ok(id)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}

/// The sealed channel set plus the peer count the host is sized for.
/// Nothing can be added or removed once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    channels: Vec<Channel>,
    max_peers: u16,
}

impl Topology {
    pub fn new(config: ConnectionConfig, max_peers: u16) -> Result<Self, ChannelError> {
        if max_peers == 0 {
            return Err(ChannelError::ZeroPeers);
        }
        Ok(Self {
            channels: config.channels,
            max_peers,
        })
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(usize::from(id.get()))
    }

    pub fn max_peers(&self) -> u16 {
        self.max_peers
    }
}
