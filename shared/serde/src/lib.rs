//! # Ferry Serde
//! Byte-aligned, fixed-width serialization into fixed-capacity datagram buffers.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod byte_reader;
mod byte_writer;
mod error;
mod impls;
mod serde;

pub use byte_reader::ByteReader;
pub use byte_writer::{ByteCounter, ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use serde::{ConstByteLength, Serde};

/// Largest datagram the reference topology will carry, in bytes
pub const MAX_DATAGRAM_BYTES: usize = 1024;
