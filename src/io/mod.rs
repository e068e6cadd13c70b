//! Byte sources consumed by the decoders.

use std::io::{self, Read};

/// Sequential, pull-based source of single bytes.
///
/// Each call has three outcomes: `Ok(Some(byte))` when a byte was produced,
/// `Ok(None)` when the source is cleanly exhausted, and `Err(_)` for any other
/// read failure. Decoders call [`ByteSource::next_byte`] once per encoded byte
/// and never ask for more after a value's terminating byte.
pub trait ByteSource {
    /// Attempts to pull the next byte from the source.
    fn next_byte(&mut self) -> io::Result<Option<u8>>;
}

/// Every [`Read`] is a byte source; a zero-length read marks end-of-input.
///
/// Errors, including [`io::ErrorKind::Interrupted`], are surfaced as-is.
impl<R: Read + ?Sized> ByteSource for R {
    #[inline]
    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}
