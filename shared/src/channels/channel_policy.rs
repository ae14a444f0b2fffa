use crate::channels::{
    channel::{ChannelId, ChannelMode},
    connection_config::{ConnectionConfig, Topology},
    error::ChannelError,
};

/// Maps outgoing traffic onto one of two fixed lanes.
///
/// Guaranteed-delivery control traffic (spawns, account requests) goes on the
/// reliable lane; high-frequency state such as position updates goes on the
/// unreliable lane so it never waits behind a retransmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPolicy {
    topology: Topology,
    reliable: ChannelId,
    unreliable: ChannelId,
}

impl ChannelPolicy {
    /// Registers the reliable lane then the unreliable lane, sized for `max_peers`
    pub fn standard(max_peers: u16) -> Result<Self, ChannelError> {
        let mut config = ConnectionConfig::new();
        config.add_channel(ChannelMode::ReliableOrdered)?;
        config.add_channel(ChannelMode::Unreliable)?;
        Self::new(Topology::new(config, max_peers)?)
    }

    /// Requires exactly one lane of each mode in `topology`
    pub fn new(topology: Topology) -> Result<Self, ChannelError> {
        let reliable = Self::single_lane(&topology, ChannelMode::ReliableOrdered)?;
        let unreliable = Self::single_lane(&topology, ChannelMode::Unreliable)?;
        Ok(Self {
            topology,
            reliable,
            unreliable,
        })
    }

    fn single_lane(topology: &Topology, mode: ChannelMode) -> Result<ChannelId, ChannelError> {
        let mut lanes = topology
            .channels()
            .iter()
            .filter(|channel| channel.mode == mode);
        let Some(first) = lanes.next() else {
            return Err(ChannelError::MissingMode { mode });
        };
        let extra = lanes.count();
        if extra > 0 {
            return Err(ChannelError::DuplicateMode {
                mode,
                count: extra + 1,
            });
        }
        Ok(first.id)
    }

    pub fn channel_for(&self, reliable: bool) -> ChannelId {
        if reliable {
            self.reliable
        } else {
            self.unreliable
        }
    }

    pub fn mode_of(&self, id: ChannelId) -> Option<ChannelMode> {
        self.topology.channel(id).map(|channel| channel.mode)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }
}
