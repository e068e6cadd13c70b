use std::io;

use crate::error::Result;
use crate::io::ByteSource;

/// Outcome of feeding one read attempt to an [`Accumulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step<T> {
    /// Still reading; the value is not terminated yet.
    Continue,
    /// The value is complete. No further bytes may be pulled for it.
    Done(T),
}

/// Per-call decoder state, fed one byte at a time.
///
/// Implementations hold the partial value and the number of bytes consumed.
/// Both the blocking and the async front-ends drive the same accumulators so
/// the bit arithmetic lives in exactly one place.
pub(crate) trait Accumulator {
    type Output: Copy;

    /// Folds one byte into the value.
    fn push(&mut self, byte: u8) -> Result<Step<Self::Output>>;

    /// Value accumulated so far, returned when the source ends early.
    fn partial(&self) -> Self::Output;

    /// Number of bytes folded in so far.
    fn consumed(&self) -> usize;

    /// Handles the outcome of a single read attempt.
    fn advance(&mut self, read: io::Result<Option<u8>>) -> Result<Step<Self::Output>> {
        match read {
            Ok(Some(byte)) => self.push(byte),
            Ok(None) => {
                if self.consumed() > 0 {
                    tracing::trace!(
                        consumed = self.consumed(),
                        "leb128 source ended before a terminating byte"
                    );
                }
                Ok(Step::Done(self.partial()))
            }
            Err(err) => {
                tracing::debug!(
                    consumed = self.consumed(),
                    error = %err,
                    "leb128 byte source failed"
                );
                Err(err.into())
            }
        }
    }

    /// Pulls bytes from `source` until the value terminates, the source ends
    /// or an error occurs.
    fn drive<S: ByteSource + ?Sized>(mut self, source: &mut S) -> Result<Self::Output>
    where
        Self: Sized,
    {
        loop {
            if let Step::Done(value) = self.advance(source.next_byte())? {
                return Ok(value);
            }
        }
    }
}
