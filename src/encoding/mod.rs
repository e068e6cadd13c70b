//! LEB128 encoders and decoders for 64-bit integers.

mod accumulator;
pub(crate) mod varint;
pub(crate) mod varint_signed;

pub(crate) use accumulator::{Accumulator, Step};
pub use varint::{decode_u64, decode_u64_with, encode_u64, encode_u64_into};
pub use varint_signed::{decode_s64, decode_s64_with, encode_s64, encode_s64_into};

use smallvec::SmallVec;

/// Maximum number of bytes that a 64-bit LEB128 value can occupy (`ceil(64 / 7)`).
pub const LEB128_MAX_LEN: usize = 10;

/// Continuation flag carried in the high bit of every encoded byte.
pub(crate) const CONTINUATION_BIT: u8 = 0x80;
/// Payload bits of an encoded byte.
pub(crate) const PAYLOAD_MASK: u8 = 0x7f;
/// Sign flag within the payload of a signed group.
pub(crate) const SIGN_BIT: u8 = 0x40;

/// Inline buffer holding a single encoded value; never spills to the heap.
pub type Leb128Bytes = SmallVec<[u8; LEB128_MAX_LEN]>;

/// Controls how the decoders treat the final byte of a full-length value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// When `true`, a 10th byte whose payload does not fit in 64 bits is
    /// rejected with [`Error::OutOfRange`](crate::Error::OutOfRange) instead of
    /// having its excess bits discarded.
    pub strict: bool,
}

impl DecodeOptions {
    /// Lenient options: excess bits on the 10th byte are silently dropped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables range validation of the 10th byte.
    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }
}
