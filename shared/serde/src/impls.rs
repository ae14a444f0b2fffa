use crate::{
    byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde,
    ConstByteLength,
};

// Numbers are fixed-width little-endian.
macro_rules! impl_serde_number {
    ($($ty:ty),*) => {
        $(
            impl Serde for $ty {
                fn ser(&self, writer: &mut dyn ByteWrite) {
                    writer.write_bytes(&self.to_le_bytes());
                }

                fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                    Ok(<$ty>::from_le_bytes(reader.read_array()?))
                }

                fn byte_length(&self) -> usize {
                    <Self as ConstByteLength>::const_byte_length()
                }
            }

            impl ConstByteLength for $ty {
                fn const_byte_length() -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

impl_serde_number!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Serde for bool {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let offset = reader.position();
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(SerdeErr::Malformed {
                what: "bool",
                offset,
            }),
        }
    }

    fn byte_length(&self) -> usize {
        1
    }
}

impl ConstByteLength for bool {
    fn const_byte_length() -> usize {
        1
    }
}

// Strings: u16 byte length, then UTF-8 bytes.
impl Serde for String {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        // Lengths past u16::MAX are clamped here; `byte_length` reports them
        // as unbounded so they are rejected before anything is written.
        let length = u16::try_from(self.len()).unwrap_or(u16::MAX);
        length.ser(writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = u16::de(reader)?;
        let offset = reader.position();
        let bytes = reader.read_bytes(usize::from(length))?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SerdeErr::Malformed {
            what: "utf-8 string",
            offset,
        })
    }

    fn byte_length(&self) -> usize {
        if self.len() > usize::from(u16::MAX) {
            return usize::MAX;
        }
        <u16 as ConstByteLength>::const_byte_length() + self.len()
    }
}
