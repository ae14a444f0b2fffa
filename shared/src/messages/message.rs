use ferry_serde::{ByteReader, ByteWrite, ConstByteLength, Serde, SerdeErr};

use crate::messages::{error::DecodeError, message_kind::MessageKind};

/// A typed message body that can be registered with a dispatcher
pub trait MessagePayload: Serde + Into<Message> {
    const KIND: MessageKind;

    /// Borrows the payload out of a decoded message if the kinds match
    fn from_message(message: &Message) -> Option<&Self>;
}

/// Every message the client knows how to put on, or take off, the wire
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    None(EmptyMessage),
    CreateAccount(CreateAccount),
    ClientSpawned(ClientSpawned),
    PlayerMoved(PlayerMoved),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::None(_) => MessageKind::None,
            Message::CreateAccount(_) => MessageKind::CreateAccount,
            Message::ClientSpawned(_) => MessageKind::ClientSpawned,
            Message::PlayerMoved(_) => MessageKind::PlayerMoved,
        }
    }

    /// Serialized size including the discriminant byte
    pub fn byte_length(&self) -> usize {
        let body = match self {
            Message::None(body) => body.byte_length(),
            Message::CreateAccount(body) => body.byte_length(),
            Message::ClientSpawned(body) => body.byte_length(),
            Message::PlayerMoved(body) => body.byte_length(),
        };
        body.saturating_add(<u8 as ConstByteLength>::const_byte_length())
    }

    pub(crate) fn ser(&self, writer: &mut dyn ByteWrite) {
        self.kind().discriminant().ser(writer);
        match self {
            Message::None(body) => body.ser(writer),
            Message::CreateAccount(body) => body.ser(writer),
            Message::ClientSpawned(body) => body.ser(writer),
            Message::PlayerMoved(body) => body.ser(writer),
        }
    }

    pub(crate) fn de(reader: &mut ByteReader) -> Result<Self, DecodeError> {
        let kind = MessageKind::try_from(u8::de(reader)?)?;
        let message = match kind {
            MessageKind::None => Message::None(EmptyMessage::de(reader)?),
            MessageKind::CreateAccount => Message::CreateAccount(CreateAccount::de(reader)?),
            MessageKind::ClientSpawned => Message::ClientSpawned(ClientSpawned::de(reader)?),
            MessageKind::PlayerMoved => Message::PlayerMoved(PlayerMoved::de(reader)?),
        };
        Ok(message)
    }
}

macro_rules! impl_message_payload {
    ($($variant:ident),*) => {
        $(
            impl MessagePayload for $variant {
                const KIND: MessageKind = MessageKind::$variant;

                fn from_message(message: &Message) -> Option<&Self> {
                    match message {
                        Message::$variant(body) => Some(body),
                        _ => None,
                    }
                }
            }

            impl From<$variant> for Message {
                fn from(body: $variant) -> Self {
                    Message::$variant(body)
                }
            }
        )*
    };
}

impl_message_payload!(CreateAccount, ClientSpawned, PlayerMoved);

impl MessagePayload for EmptyMessage {
    const KIND: MessageKind = MessageKind::None;

    fn from_message(message: &Message) -> Option<&Self> {
        match message {
            Message::None(body) => Some(body),
            _ => None,
        }
    }
}

impl From<EmptyMessage> for Message {
    fn from(body: EmptyMessage) -> Self {
        Message::None(body)
    }
}

// EmptyMessage

/// Body of the `None` kind. Carries nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyMessage;

impl Serde for EmptyMessage {
    fn ser(&self, _writer: &mut dyn ByteWrite) {}

    fn de(_reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(EmptyMessage)
    }

    fn byte_length(&self) -> usize {
        0
    }
}

// Position

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Serde for Position {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
        self.z.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            x: f32::de(reader)?,
            y: f32::de(reader)?,
            z: f32::de(reader)?,
        })
    }

    fn byte_length(&self) -> usize {
        <Self as ConstByteLength>::const_byte_length()
    }
}

impl ConstByteLength for Position {
    fn const_byte_length() -> usize {
        3 * <f32 as ConstByteLength>::const_byte_length()
    }
}

// CreateAccount

/// Account registration request sent on the reliable lane
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAccount {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl Serde for CreateAccount {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.username.ser(writer);
        self.password.ser(writer);
        self.email.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            username: String::de(reader)?,
            password: String::de(reader)?,
            email: String::de(reader)?,
        })
    }

    fn byte_length(&self) -> usize {
        self.username
            .byte_length()
            .saturating_add(self.password.byte_length())
            .saturating_add(self.email.byte_length())
    }
}

// ClientSpawned

/// Authoritative notice that a player entered the world
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClientSpawned {
    pub player_id: i32,
    pub position: Position,
}

impl ClientSpawned {
    pub fn new(player_id: i32, position: Position) -> Self {
        Self {
            player_id,
            position,
        }
    }
}

impl Serde for ClientSpawned {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.player_id.ser(writer);
        self.position.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            player_id: i32::de(reader)?,
            position: Position::de(reader)?,
        })
    }

    fn byte_length(&self) -> usize {
        <i32 as ConstByteLength>::const_byte_length()
            + <Position as ConstByteLength>::const_byte_length()
    }
}

// PlayerMoved

/// Best-effort position update, meant for the unreliable lane
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerMoved {
    pub player_id: i32,
    pub position: Position,
}

impl PlayerMoved {
    pub fn new(player_id: i32, position: Position) -> Self {
        Self {
            player_id,
            position,
        }
    }
}

impl Serde for PlayerMoved {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.player_id.ser(writer);
        self.position.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            player_id: i32::de(reader)?,
            position: Position::de(reader)?,
        })
    }

    fn byte_length(&self) -> usize {
        <i32 as ConstByteLength>::const_byte_length()
            + <Position as ConstByteLength>::const_byte_length()
    }
}
