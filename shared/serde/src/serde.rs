use crate::{
    byte_reader::ByteReader,
    byte_writer::{ByteCounter, ByteWrite},
    error::SerdeErr,
};

/// A type that can be written to and read from a fixed-width byte layout
pub trait Serde: Sized + Clone + PartialEq {
    /// Writes the value into the given writer
    fn ser(&self, writer: &mut dyn ByteWrite);

    /// Parses a value from the given reader
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;

    /// Number of bytes `ser` will write for this value
    fn byte_length(&self) -> usize {
        let mut counter = ByteCounter::new();
        self.ser(&mut counter);
        counter.count()
    }
}

/// Implemented by types whose serialized size never depends on their value
pub trait ConstByteLength {
    fn const_byte_length() -> usize;
}
