#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Unsigned and signed LEB128 codecs and decode options.
pub mod encoding;
/// Shared error and result types.
pub mod error;
/// Byte sources consumed by the decoders.
pub mod io;

#[cfg(feature = "async")]
pub mod async_support;

#[cfg(feature = "async")]
pub use async_support::{decode_s64_async, decode_u64_async, write_s64_async, write_u64_async};
pub use encoding::{
    DecodeOptions, LEB128_MAX_LEN, Leb128Bytes, decode_s64, decode_s64_with, decode_u64,
    decode_u64_with, encode_s64, encode_s64_into, encode_u64, encode_u64_into,
};
pub use error::{Error, Result};
pub use io::ByteSource;
