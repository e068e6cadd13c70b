//! Async helpers that decode from and encode to tokio I/O objects.
//!
//! The decoders pull one byte per `read` call and share their state machine
//! with the blocking decoders, so EOF, overflow and error handling match
//! [`decode_u64_with`](crate::decode_u64_with) and
//! [`decode_s64_with`](crate::decode_s64_with) exactly.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::encoding::{
    Accumulator, DecodeOptions, Step, encode_s64, encode_u64,
    varint::UnsignedAccumulator, varint_signed::SignedAccumulator,
};
use crate::error::Result;

async fn next_byte<R>(reader: &mut R) -> io::Result<Option<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buf = [0u8; 1];
    match reader.read(&mut buf).await? {
        0 => Ok(None),
        _ => Ok(Some(buf[0])),
    }
}

async fn drive<A, R>(mut acc: A, reader: &mut R) -> Result<A::Output>
where
    A: Accumulator,
    R: AsyncRead + Unpin + ?Sized,
{
    loop {
        if let Step::Done(value) = acc.advance(next_byte(reader).await)? {
            return Ok(value);
        }
    }
}

/// Decodes an unsigned LEB128 value from an async reader.
pub async fn decode_u64_async<R>(reader: &mut R, options: &DecodeOptions) -> Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    drive(UnsignedAccumulator::new(options), reader).await
}

/// Decodes a signed LEB128 value from an async reader.
pub async fn decode_s64_async<R>(reader: &mut R, options: &DecodeOptions) -> Result<i64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    drive(SignedAccumulator::new(options), reader).await
}

/// Writes the unsigned encoding of `value`, returning the number of bytes written.
pub async fn write_u64_async<W>(writer: &mut W, value: u64) -> Result<usize>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let encoded = encode_u64(value);
    writer.write_all(&encoded).await?;
    Ok(encoded.len())
}

/// Writes the signed encoding of `value`, returning the number of bytes written.
pub async fn write_s64_async<W>(writer: &mut W, value: i64) -> Result<usize>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let encoded = encode_s64(value);
    writer.write_all(&encoded).await?;
    Ok(encoded.len())
}
