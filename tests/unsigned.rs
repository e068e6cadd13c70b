use std::io::{self, Read};

use anyhow::Result;
use bytes::BytesMut;
use leb128_codec::{
    DecodeOptions, Error, LEB128_MAX_LEN, decode_u64, decode_u64_with, encode_u64,
    encode_u64_into,
};

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("test error"))
    }
}

/// Counts how many single-byte reads the decoder issues.
struct CountingReader<'a> {
    inner: &'a [u8],
    reads: usize,
}

impl Read for CountingReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        self.inner.read(buf)
    }
}

#[test]
fn low_range_layout_and_round_trip() -> Result<()> {
    for value in 0u64..512 {
        let buf = encode_u64(value);
        match value {
            0..128 => assert_eq!(buf.as_slice(), &[value as u8]),
            128..256 => assert_eq!(buf.as_slice(), &[value as u8, 1]),
            256..384 => assert_eq!(buf.as_slice(), &[(value - 128) as u8, 2]),
            _ => assert_eq!(buf.as_slice(), &[value as u8, 3]),
        }
        assert_eq!(decode_u64(&mut buf.as_slice())?, value);
    }
    Ok(())
}

#[test]
fn literal_encodings() -> Result<()> {
    assert_eq!(encode_u64(0).as_slice(), &[0x00]);
    assert_eq!(encode_u64(256).as_slice(), &[0x80, 0x02]);
    assert_eq!(encode_u64(624_485).as_slice(), &[0xe5, 0x8e, 0x26]);
    assert_eq!(decode_u64(&mut &[0x80u8, 0x02][..])?, 256);

    let max = encode_u64(u64::MAX);
    assert_eq!(
        max.as_slice(),
        &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
    );
    assert!(!max.spilled());
    assert_eq!(decode_u64(&mut max.as_slice())?, u64::MAX);
    Ok(())
}

#[test]
fn encoding_is_minimal_at_group_boundaries() {
    for groups in 1..LEB128_MAX_LEN {
        let boundary = 1u64 << (7 * groups);
        assert_eq!(encode_u64(boundary - 1).len(), groups, "{:#x}", boundary - 1);
        assert_eq!(encode_u64(boundary).len(), groups + 1, "{boundary:#x}");
    }
    assert_eq!(encode_u64(u64::MAX).len(), LEB128_MAX_LEN);
}

#[test]
fn round_trips_across_bit_widths() -> Result<()> {
    for bit in 0..64 {
        let power = 1u64 << bit;
        for value in [power - 1, power, power | 1, power.wrapping_mul(3), !power] {
            let buf = encode_u64(value);
            assert_eq!(buf.last().copied().unwrap_or(0x80) & 0x80, 0);
            assert_eq!(decode_u64(&mut buf.as_slice())?, value, "{value:#x}");
        }
    }
    Ok(())
}

#[test]
fn empty_source_decodes_to_zero() -> Result<()> {
    assert_eq!(decode_u64(&mut io::empty())?, 0);
    assert_eq!(decode_u64(&mut &[0u8; 0][..])?, 0);
    Ok(())
}

#[test]
fn source_failure_is_propagated() {
    let err = decode_u64(&mut FailingReader).unwrap_err();
    assert!(err.is_io());
    let Error::Io(inner) = err else {
        panic!("expected an i/o error");
    };
    assert_eq!(inner.to_string(), "test error");
}

#[test]
fn stops_at_terminating_byte() -> Result<()> {
    let bytes = [0x78u8, 0x10, 0x0f, 0x0a, 0x0b, 0x90, 0x01, 0x00, 0xff, 0xff, 0xff];
    let mut input = &bytes[..];

    assert_eq!(decode_u64(&mut input)?, 120);
    assert_eq!(input.len(), bytes.len() - 1);

    let mut decoded = Vec::new();
    for _ in 0..6 {
        decoded.push(decode_u64(&mut input)?);
    }
    assert_eq!(decoded, [16, 15, 10, 11, 144, 0]);

    // The trailing bytes never see a terminator: EOF returns what was gathered.
    assert_eq!(decode_u64(&mut input)?, (1 << 21) - 1);
    assert!(input.is_empty());
    Ok(())
}

#[test]
fn reads_one_byte_per_group() -> Result<()> {
    let mut reader = CountingReader {
        inner: &[0xe5, 0x8e, 0x26, 0x01, 0x02],
        reads: 0,
    };
    assert_eq!(decode_u64(&mut reader)?, 624_485);
    assert_eq!(reader.reads, 3);
    assert_eq!(reader.inner, &[0x01, 0x02]);
    Ok(())
}

#[test]
fn partial_value_at_end_of_input() -> Result<()> {
    assert_eq!(decode_u64(&mut &[0x80u8][..])?, 0);
    assert_eq!(decode_u64(&mut &[0xffu8][..])?, 0x7f);
    assert_eq!(decode_u64(&mut &[0x80u8, 0x81][..])?, 1 << 7);
    Ok(())
}

#[test]
fn overflow_on_eleventh_byte() {
    let bytes = [
        0xffu8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00,
    ];
    let mut input = &bytes[..];
    let err = decode_u64(&mut input).unwrap_err();
    assert!(err.is_overflow());
    assert_eq!(input.len(), bytes.len() - (LEB128_MAX_LEN + 1));

    let err = decode_u64(&mut &[0x80u8; 11][..]).unwrap_err();
    assert!(matches!(err, Error::Overflow));
}

#[test]
fn ten_continuation_bytes_then_end_of_input() -> Result<()> {
    let bytes = [0x81u8, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80];
    let mut input = &bytes[..];
    assert_eq!(decode_u64(&mut input)?, 1);
    assert!(input.is_empty());

    assert_eq!(decode_u64(&mut &[0x80u8; 10][..])?, 0);
    // Payload bits of the 10th byte beyond bit 63 are dropped.
    assert_eq!(decode_u64(&mut &[0xffu8; 10][..])?, u64::MAX);
    Ok(())
}

#[test]
fn non_minimal_input_is_accepted() -> Result<()> {
    assert_eq!(decode_u64(&mut &[0x80u8, 0x80, 0x00][..])?, 0);
    assert_eq!(decode_u64(&mut &[0x81u8, 0x80, 0x80, 0x00][..])?, 1);
    assert_eq!(
        decode_u64_with(&mut &[0x82u8, 0x80, 0x00][..], &DecodeOptions::new().strict(true))?,
        2
    );
    Ok(())
}

#[test]
fn excess_bits_on_final_byte() -> Result<()> {
    let bytes = [0xffu8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f];
    assert_eq!(decode_u64(&mut &bytes[..])?, u64::MAX);

    let strict = DecodeOptions::new().strict(true);
    let err = decode_u64_with(&mut &bytes[..], &strict).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { byte: 0x7f }));

    let max = encode_u64(u64::MAX);
    assert_eq!(decode_u64_with(&mut max.as_slice(), &strict)?, u64::MAX);
    Ok(())
}

#[test]
fn appends_to_existing_buffers() -> Result<()> {
    let mut out = vec![0xaau8];
    assert_eq!(encode_u64_into(300, &mut out), 2);
    assert_eq!(encode_u64_into(0, &mut out), 1);
    assert_eq!(out, [0xaa, 0xac, 0x02, 0x00]);

    let mut buf = BytesMut::new();
    let written = encode_u64_into(u64::MAX, &mut buf);
    assert_eq!(written, LEB128_MAX_LEN);
    assert_eq!(decode_u64(&mut &buf[..])?, u64::MAX);
    Ok(())
}
