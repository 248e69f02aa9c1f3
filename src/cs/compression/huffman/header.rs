//! Fixed-size header of a compressed stream.
//!
//! Layout, big-endian throughout:
//!
//! | Offset | Size      | Field                                    |
//! |--------|-----------|------------------------------------------|
//! | 0      | 256 × 4   | count of each byte value, ascending      |
//! | 1024   | 4         | number of symbols in the payload         |
//!
//! The header is written with byte-granular writes and read back with
//! byte-granular reads; the bit-packed payload starts at offset 1028.

use super::frequency::{FrequencyTable, SYMBOLS};
use crate::cs::compression::Result;
use crate::cs::error::Error;
use std::io::{self, Read, Write};

/// Width of every header field in bytes.
const FIELD_LEN: usize = 4;

/// Size of the encoded header in bytes.
pub const HEADER_LEN: usize = (SYMBOLS + 1) * FIELD_LEN;

/// Largest count any header field can hold.
pub const MAX_COUNT: u64 = u32::MAX as u64;

/// Decoded header contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub frequencies: FrequencyTable,
    pub length: u64,
}

impl Header {
    /// Builds the header for input counted into `frequencies`.
    ///
    /// Fails with `InputTooLarge` if the total does not fit a header field.
    pub fn new(frequencies: FrequencyTable) -> Result<Self> {
        let length = frequencies.total();
        if length > MAX_COUNT {
            return Err(Error::InputTooLarge {
                size: length,
                max_size: MAX_COUNT,
            });
        }
        Ok(Header {
            frequencies,
            length,
        })
    }

    /// Writes the header to `sink`.
    pub fn write_to<W: Write>(&self, sink: &mut W) -> Result<()> {
        let mut buf = Vec::with_capacity(HEADER_LEN);
        for &count in self.frequencies.counts() {
            buf.extend_from_slice(&to_field(count)?);
        }
        buf.extend_from_slice(&to_field(self.length)?);
        sink.write_all(&buf)?;
        Ok(())
    }

    /// Reads and validates a header from `source`.
    ///
    /// A short read or counts that do not add up to the recorded length fail
    /// with `CorruptHeader`.
    pub fn read_from<R: Read>(source: &mut R) -> Result<Self> {
        let mut buf = [0u8; HEADER_LEN];
        source.read_exact(&mut buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => {
                Error::corrupt_header(format!("header shorter than {} bytes", HEADER_LEN))
            }
            _ => Error::Io(e),
        })?;

        let mut fields = buf
            .chunks_exact(FIELD_LEN)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as u64);

        let mut counts = [0u64; SYMBOLS];
        for (slot, field) in counts.iter_mut().zip(fields.by_ref()) {
            *slot = field;
        }
        let length = fields
            .next()
            .ok_or_else(|| Error::corrupt_header("missing payload length"))?;

        let frequencies = FrequencyTable::from_counts(counts)
            .ok_or_else(|| Error::corrupt_header("symbol counts overflow"))?;
        let total = frequencies.total();
        if total != length {
            return Err(Error::corrupt_header(format!(
                "symbol counts sum to {} but payload length is {}",
                total, length
            )));
        }

        Ok(Header {
            frequencies,
            length,
        })
    }
}

fn to_field(value: u64) -> Result<[u8; FIELD_LEN]> {
    let value = u32::try_from(value).map_err(|_| Error::InputTooLarge {
        size: value,
        max_size: MAX_COUNT,
    })?;
    Ok(value.to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(header: &Header) -> Vec<u8> {
        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_layout() {
        let header = Header::new(FrequencyTable::from_bytes(b"AAB")).unwrap();
        let bytes = encoded(&header);
        assert_eq!(bytes.len(), HEADER_LEN);
        assert_eq!(&bytes[0x41 * 4..0x41 * 4 + 4], &[0, 0, 0, 2]);
        assert_eq!(&bytes[0x42 * 4..0x42 * 4 + 4], &[0, 0, 0, 1]);
        assert_eq!(&bytes[1024..], &[0, 0, 0, 3]);
        assert_eq!(bytes.iter().map(|&b| b as u32).sum::<u32>(), 6);
    }

    #[test]
    fn test_counts_above_one_byte() {
        let data = vec![7u8; 70_000];
        let header = Header::new(FrequencyTable::from_bytes(&data)).unwrap();
        let bytes = encoded(&header);
        assert_eq!(&bytes[7 * 4..8 * 4], &70_000u32.to_be_bytes());

        let decoded = Header::read_from(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.frequencies.count(7), 70_000);
    }

    #[test]
    fn test_empty_header() {
        let header = Header::new(FrequencyTable::new()).unwrap();
        let bytes = encoded(&header);
        assert!(bytes.iter().all(|&b| b == 0));
        let decoded = Header::read_from(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded.length, 0);
        assert!(decoded.frequencies.is_empty());
    }

    #[test]
    fn test_short_header() {
        let bytes = vec![0u8; HEADER_LEN - 1];
        let err = Header::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, Error::CorruptHeader(_)));
    }

    #[test]
    fn test_length_mismatch() {
        let header = Header::new(FrequencyTable::from_bytes(b"hello")).unwrap();
        let mut bytes = encoded(&header);
        bytes[HEADER_LEN - 1] = 4;
        let err = Header::read_from(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, Error::CorruptHeader(_)));
    }

    #[test]
    fn test_oversized_input_rejected() {
        let mut counts = [0u64; SYMBOLS];
        counts[0] = MAX_COUNT;
        counts[1] = 1;
        let err = Header::new(FrequencyTable::from_counts(counts).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            Error::InputTooLarge { size, max_size } if size == MAX_COUNT + 1 && max_size == MAX_COUNT
        ));
    }

    #[test]
    fn test_reads_only_header_bytes() {
        let header = Header::new(FrequencyTable::from_bytes(b"xyz")).unwrap();
        let mut bytes = encoded(&header);
        bytes.extend_from_slice(&[0xAB, 0xCD]);
        let mut source = bytes.as_slice();
        Header::read_from(&mut source).unwrap();
        assert_eq!(source, &[0xAB, 0xCD]);
    }
}
