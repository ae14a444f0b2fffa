// An enum representing the different types of packets that can be
// sent/received

use ferry_shared::{ByteReader, ByteWrite, ByteWriter, ConstByteLength, Serde, SerdeErr};

/// Every UDP packet starts with: packet type, channel, sequence (u16 LE)
pub const HEADER_BYTES: usize = 4;

#[repr(u8)]
#[derive(Copy, Debug, Clone, Eq, PartialEq, Hash)]
pub enum PacketType {
    // A packet sent by the client to request a connection
    Connect = 0,
    // The server's answer to Connect
    ConnectAccept = 1,
    // Either side is closing the connection
    Disconnect = 2,
    // A packet containing a message on a channel
    Data = 3,
    // Acknowledges a reliable Data packet
    Ack = 4,
}

impl Serde for PacketType {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        (*self as u8).ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let offset = reader.position();
        match u8::de(reader)? {
            0 => Ok(PacketType::Connect),
            1 => Ok(PacketType::ConnectAccept),
            2 => Ok(PacketType::Disconnect),
            3 => Ok(PacketType::Data),
            4 => Ok(PacketType::Ack),
            // unknown types come from peers speaking another protocol
            _ => Err(SerdeErr::Malformed {
                what: "packet type",
                offset,
            }),
        }
    }

    fn byte_length(&self) -> usize {
        1
    }
}

#[derive(Copy, Debug, Clone, Eq, PartialEq)]
pub struct PacketHeader {
    pub packet_type: PacketType,
    pub channel: u8,
    pub sequence: u16,
}

impl PacketHeader {
    /// Header for a packet that belongs to no channel
    pub fn control(packet_type: PacketType) -> Self {
        Self {
            packet_type,
            channel: 0,
            sequence: 0,
        }
    }

    pub fn data(channel: u8, sequence: u16) -> Self {
        Self {
            packet_type: PacketType::Data,
            channel,
            sequence,
        }
    }

    pub fn ack(channel: u8, sequence: u16) -> Self {
        Self {
            packet_type: PacketType::Ack,
            channel,
            sequence,
        }
    }

    /// Header followed by `payload`, ready for the socket
    pub fn to_packet(&self, payload: &[u8]) -> Vec<u8> {
        let mut packet = vec![0; HEADER_BYTES + payload.len()];
        let mut writer = ByteWriter::new(&mut packet);
        self.ser(&mut writer);
        writer.write_bytes(payload);
        packet
    }

    /// Splits a received packet into its header and payload
    pub fn from_packet(packet: &[u8]) -> Result<(Self, &[u8]), SerdeErr> {
        let mut reader = ByteReader::new(packet);
        let header = Self::de(&mut reader)?;
        Ok((header, &packet[reader.position()..]))
    }
}

impl Serde for PacketHeader {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.packet_type.ser(writer);
        self.channel.ser(writer);
        self.sequence.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            packet_type: PacketType::de(reader)?,
            channel: u8::de(reader)?,
            sequence: u16::de(reader)?,
        })
    }

    fn byte_length(&self) -> usize {
        <Self as ConstByteLength>::const_byte_length()
    }
}

impl ConstByteLength for PacketHeader {
    fn const_byte_length() -> usize {
        HEADER_BYTES
    }
}
