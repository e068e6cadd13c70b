use bytes::BufMut;

use super::{
    Accumulator, CONTINUATION_BIT, DecodeOptions, LEB128_MAX_LEN, Leb128Bytes, PAYLOAD_MASK,
    SIGN_BIT, Step,
};
use crate::error::{Error, Result};
use crate::io::ByteSource;

/// Encodes `value` as a signed LEB128 varint and appends it to `out`.
///
/// Returns the number of bytes written, always in `1..=LEB128_MAX_LEN`.
pub fn encode_s64_into<B: BufMut + ?Sized>(mut value: i64, out: &mut B) -> usize {
    let mut written = 0;
    loop {
        let mut byte = (value & i64::from(PAYLOAD_MASK)) as u8;
        // Arithmetic shift: the remainder keeps the sign of `value`.
        value >>= 7;
        let sign_set = byte & SIGN_BIT != 0;
        let done = (value == 0 && !sign_set) || (value == -1 && sign_set);
        if !done {
            byte |= CONTINUATION_BIT;
        }
        out.put_u8(byte);
        written += 1;
        if done {
            return written;
        }
    }
}

/// Encodes `value` as the minimal signed LEB128 byte sequence.
///
/// ```
/// assert_eq!(leb128_codec::encode_s64(-256).as_slice(), &[0x80, 0x7e]);
/// ```
pub fn encode_s64(value: i64) -> Leb128Bytes {
    let mut buf = [0u8; LEB128_MAX_LEN];
    let len = encode_s64_into(value, &mut &mut buf[..]);
    Leb128Bytes::from_buf_and_len(buf, len)
}

/// Decodes a signed LEB128 value from `source` with lenient options.
///
/// The terminating byte's sign bit is extended through the upper bits. When
/// the source ends before a terminator, the bits gathered so far are returned
/// as-is, without sign extension.
pub fn decode_s64<S: ByteSource + ?Sized>(source: &mut S) -> Result<i64> {
    decode_s64_with(source, &DecodeOptions::default())
}

/// Decodes a signed LEB128 value from `source` using the given options.
pub fn decode_s64_with<S: ByteSource + ?Sized>(
    source: &mut S,
    options: &DecodeOptions,
) -> Result<i64> {
    SignedAccumulator::new(options).drive(source)
}

/// Accumulates into a `u64` and extends the sign with an explicit mask, so no
/// shift ever depends on signed-operand semantics.
#[derive(Debug)]
pub(crate) struct SignedAccumulator {
    bits: u64,
    shift: u32,
    consumed: usize,
    strict: bool,
}

impl SignedAccumulator {
    pub(crate) fn new(options: &DecodeOptions) -> Self {
        Self {
            bits: 0,
            shift: 0,
            consumed: 0,
            strict: options.strict,
        }
    }
}

impl Accumulator for SignedAccumulator {
    type Output = i64;

    fn push(&mut self, byte: u8) -> Result<Step<i64>> {
        // An 11th byte is never folded in, so `shift` stays below 64 here.
        if self.consumed == LEB128_MAX_LEN {
            tracing::debug!(consumed = self.consumed + 1, "leb128 s64 overflow");
            return Err(Error::Overflow);
        }

        self.bits |= u64::from(byte & PAYLOAD_MASK) << self.shift;
        self.shift += 7;
        self.consumed += 1;

        if byte & CONTINUATION_BIT != 0 {
            return Ok(Step::Continue);
        }

        // A full-length value keeps bit 63 from the last payload; the other six
        // payload bits must repeat it.
        if self.strict
            && self.consumed == LEB128_MAX_LEN
            && !matches!(byte & PAYLOAD_MASK, 0x00 | 0x7f)
        {
            tracing::debug!(byte, "leb128 s64 final byte out of range");
            return Err(Error::OutOfRange { byte });
        }

        if byte & SIGN_BIT != 0 && self.shift < u64::BITS {
            self.bits |= u64::MAX << self.shift;
        }
        Ok(Step::Done(self.bits as i64))
    }

    fn partial(&self) -> i64 {
        self.bits as i64
    }

    fn consumed(&self) -> usize {
        self.consumed
    }
}
