use crate::messages::error::DecodeError;

/// Discriminant carried in byte 0 of every datagram
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKind {
    None = 0,
    CreateAccount = 1,
    ClientSpawned = 2,
    PlayerMoved = 3,
}

impl MessageKind {
    /// Every kind known to this build, in discriminant order
    pub const ALL: [MessageKind; 4] = [
        MessageKind::None,
        MessageKind::CreateAccount,
        MessageKind::ClientSpawned,
        MessageKind::PlayerMoved,
    ];

    pub fn discriminant(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::None => "None",
            MessageKind::CreateAccount => "CreateAccount",
            MessageKind::ClientSpawned => "ClientSpawned",
            MessageKind::PlayerMoved => "PlayerMoved",
        }
    }
}

impl TryFrom<u8> for MessageKind {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MessageKind::None),
            1 => Ok(MessageKind::CreateAccount),
            2 => Ok(MessageKind::ClientSpawned),
            3 => Ok(MessageKind::PlayerMoved),
            // SECURITY: peers can send any byte here; never index or panic on it.
            other => Err(DecodeError::UnknownKind(other)),
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
