//! Datagram framing: byte 0 holds the [`MessageKind`] discriminant, the
//! kind's fixed layout follows, and any remaining bytes are zero padding.
//!
//! [`MessageKind`]: crate::MessageKind

use ferry_serde::{ByteReader, ByteWriter};

use crate::messages::{
    error::{DecodeError, EncodeError},
    message::Message,
};

/// Encodes `message` into a fresh buffer of exactly `capacity` bytes.
pub fn encode(message: &Message, capacity: usize) -> Result<Vec<u8>, EncodeError> {
    check_fits(message, capacity)?;
    let mut buffer = vec![0u8; capacity];
    encode_into(message, &mut buffer)?;
    Ok(buffer)
}

/// Encodes `message` into `buffer`, zero-filling whatever the message does not
/// use. Returns the number of meaningful bytes at the front of `buffer`.
///
/// On error the buffer is left untouched.
pub fn encode_into(message: &Message, buffer: &mut [u8]) -> Result<usize, EncodeError> {
    check_fits(message, buffer.len())?;

    let mut writer = ByteWriter::new(buffer);
    message.ser(&mut writer);
    if writer.overflowed() {
        // byte_length disagreed with ser; still never hand out a partial frame
        return Err(EncodeError::Overflow {
            needed: message.byte_length(),
            capacity: writer.capacity(),
        });
    }
    Ok(writer.finish())
}

/// Decodes one message from the front of `bytes`. Trailing bytes are ignored.
pub fn decode(bytes: &[u8]) -> Result<Message, DecodeError> {
    let mut reader = ByteReader::new(bytes);
    Message::de(&mut reader)
}

fn check_fits(message: &Message, capacity: usize) -> Result<(), EncodeError> {
    let needed = message.byte_length();
    if needed > capacity {
        return Err(EncodeError::Overflow { needed, capacity });
    }
    Ok(())
}
