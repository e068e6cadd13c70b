use bytes::BufMut;

use super::{
    Accumulator, CONTINUATION_BIT, DecodeOptions, LEB128_MAX_LEN, Leb128Bytes, PAYLOAD_MASK, Step,
};
use crate::error::{Error, Result};
use crate::io::ByteSource;

/// Encodes `value` as an unsigned LEB128 varint and appends it to `out`.
///
/// Returns the number of bytes written, always in `1..=LEB128_MAX_LEN`.
pub fn encode_u64_into<B: BufMut + ?Sized>(mut value: u64, out: &mut B) -> usize {
    let mut written = 0;
    loop {
        let mut byte = (value & u64::from(PAYLOAD_MASK)) as u8;
        value >>= 7;
        if value != 0 {
            byte |= CONTINUATION_BIT;
        }
        out.put_u8(byte);
        written += 1;
        if value == 0 {
            return written;
        }
    }
}

/// Encodes `value` as the minimal unsigned LEB128 byte sequence.
///
/// ```
/// assert_eq!(leb128_codec::encode_u64(256).as_slice(), &[0x80, 0x02]);
/// ```
pub fn encode_u64(value: u64) -> Leb128Bytes {
    let mut buf = [0u8; LEB128_MAX_LEN];
    let len = encode_u64_into(value, &mut &mut buf[..]);
    Leb128Bytes::from_buf_and_len(buf, len)
}

/// Decodes an unsigned LEB128 value from `source` with lenient options.
///
/// Reading stops at the terminating byte, so anything after it stays in the
/// source. End-of-input before a terminator is not an error: the bits gathered
/// so far are returned (zero for an empty source).
pub fn decode_u64<S: ByteSource + ?Sized>(source: &mut S) -> Result<u64> {
    decode_u64_with(source, &DecodeOptions::default())
}

/// Decodes an unsigned LEB128 value from `source` using the given options.
pub fn decode_u64_with<S: ByteSource + ?Sized>(
    source: &mut S,
    options: &DecodeOptions,
) -> Result<u64> {
    UnsignedAccumulator::new(options).drive(source)
}

#[derive(Debug)]
pub(crate) struct UnsignedAccumulator {
    value: u64,
    consumed: usize,
    strict: bool,
}

impl UnsignedAccumulator {
    pub(crate) fn new(options: &DecodeOptions) -> Self {
        Self {
            value: 0,
            consumed: 0,
            strict: options.strict,
        }
    }
}

impl Accumulator for UnsignedAccumulator {
    type Output = u64;

    fn push(&mut self, byte: u8) -> Result<Step<u64>> {
        // An 11th byte is never folded in.
        if self.consumed == LEB128_MAX_LEN {
            tracing::debug!(consumed = self.consumed + 1, "leb128 u64 overflow");
            return Err(Error::Overflow);
        }

        // 7 * 9 = 63: only bit 0 of the 10th payload lands inside the value.
        self.value |= u64::from(byte & PAYLOAD_MASK) << (7 * self.consumed);
        self.consumed += 1;

        if byte & CONTINUATION_BIT != 0 {
            return Ok(Step::Continue);
        }

        if self.strict && self.consumed == LEB128_MAX_LEN && byte & PAYLOAD_MASK & !1 != 0 {
            tracing::debug!(byte, "leb128 u64 final byte out of range");
            return Err(Error::OutOfRange { byte });
        }
        Ok(Step::Done(self.value))
    }

    fn partial(&self) -> u64 {
        self.value
    }

    fn consumed(&self) -> usize {
        self.consumed
    }
}
