use crate::error::SerdeErr;

/// Cursor over a received datagram
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    cursor: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, cursor: 0 }
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let Some(byte) = self.buffer.get(self.cursor) else {
            return Err(SerdeErr::Truncated {
                offset: self.cursor,
                needed: 1,
            });
        };
        self.cursor += 1;
        Ok(*byte)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'b [u8], SerdeErr> {
        if self.remaining() < length {
            return Err(SerdeErr::Truncated {
                offset: self.cursor,
                needed: length - self.remaining(),
            });
        }
        let bytes = &self.buffer[self.cursor..self.cursor + length];
        self.cursor += length;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        let mut output = [0u8; N];
        output.copy_from_slice(self.read_bytes(N)?);
        Ok(output)
    }
}
