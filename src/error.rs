use std::io;

/// Convenient alias for results produced by this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can be produced while decoding LEB128 data.
///
/// Encoding never fails, so every variant originates from a decoder.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The byte source failed for a reason other than clean end-of-input.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// More than [`LEB128_MAX_LEN`](crate::encoding::LEB128_MAX_LEN) bytes were read without a terminating byte.
    #[error("leb128 value exceeds 10 bytes")]
    Overflow,

    /// Strict mode only: the final byte carries bits beyond the 64-bit range.
    #[error("leb128 value does not fit in 64 bits (final byte {byte:#04x})")]
    OutOfRange {
        /// The offending 10th byte.
        byte: u8,
    },
}

impl Error {
    /// Returns `true` when the decoder ran past the 10-byte budget.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow)
    }

    /// Returns `true` when the underlying byte source failed.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
