/// Sink for serialized bytes
pub trait ByteWrite {
    fn write_byte(&mut self, byte: u8);

    fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }
}

/// Writes into a caller-owned, fixed-capacity buffer.
///
/// Writes past the end of the buffer are discarded and latch the
/// `overflowed` flag, so callers can refuse to ship a partial datagram.
pub struct ByteWriter<'b> {
    buffer: &'b mut [u8],
    cursor: usize,
    overflowed: bool,
}

impl<'b> ByteWriter<'b> {
    pub fn new(buffer: &'b mut [u8]) -> Self {
        Self {
            buffer,
            cursor: 0,
            overflowed: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn bytes_written(&self) -> usize {
        self.cursor
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Zero-fills everything after the cursor and returns the written length
    pub fn finish(self) -> usize {
        for byte in self.buffer[self.cursor..].iter_mut() {
            *byte = 0;
        }
        self.cursor
    }
}

impl ByteWrite for ByteWriter<'_> {
    fn write_byte(&mut self, byte: u8) {
        if self.cursor >= self.buffer.len() {
            self.overflowed = true;
            return;
        }
        self.buffer[self.cursor] = byte;
        self.cursor += 1;
    }
}

/// Counts bytes without storing them
pub struct ByteCounter {
    count: usize,
}

impl ByteCounter {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for ByteCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWrite for ByteCounter {
    fn write_byte(&mut self, _byte: u8) {
        self.count += 1;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.count += bytes.len();
    }
}
