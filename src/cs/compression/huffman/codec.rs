//! Encode and decode passes over byte streams.

use super::bitio::{BitReader, BitWriter};
use super::codebook::CodeBook;
use super::frequency::FrequencyTable;
use super::header::{Header, HEADER_LEN};
use super::tree::{HuffmanNode, HuffmanTree};
use crate::cs::compression::{Compression, Result};
use crate::cs::error::Error;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Static Huffman codec over whole inputs.
///
/// # Example
///
/// ```
/// use huffpack::cs::compression::Compression;
/// use huffpack::HuffmanCodec;
///
/// let codec = HuffmanCodec::new();
/// let packed = codec.compress(b"abracadabra").unwrap();
/// assert_eq!(codec.decompress(&packed).unwrap(), b"abracadabra");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    pub fn new() -> Self {
        HuffmanCodec
    }
}

impl Compression for HuffmanCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(HEADER_LEN + data.len() / 2);
        compress(&mut Cursor::new(data), &mut out)?;
        Ok(out)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        decompress(data, &mut out)?;
        Ok(out)
    }
}

/// Compresses all of `input` into `output`.
///
/// The input is read twice: once to count symbols, and again after rewinding
/// to encode them. Returns the number of symbols encoded.
pub fn compress<R, W>(input: &mut R, mut output: W) -> Result<u64>
where
    R: Read + Seek,
    W: Write,
{
    let start = input.stream_position()?;
    let frequencies = FrequencyTable::from_reader(&mut *input)?;
    let header = Header::new(frequencies)?;
    debug!(
        "compressing {} bytes with {} distinct symbols",
        header.length,
        header.frequencies.distinct()
    );

    header.write_to(&mut output)?;
    let mut writer = BitWriter::new(output);

    if let Some(tree) = HuffmanTree::build(&header.frequencies) {
        let book = CodeBook::from_tree(&tree);
        input.seek(SeekFrom::Start(start))?;
        let source = BufReader::new(input.take(header.length));
        let encoded = encode_symbols(source, &book, &mut writer)?;
        if encoded != header.length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "input shrank between passes: counted {} bytes, encoded {}",
                    header.length, encoded
                ),
            )
            .into());
        }
    }

    writer.close()?;
    debug!(
        "compressed {} bytes into {} payload bits",
        header.length,
        writer.bits_written()
    );
    Ok(header.length)
}

/// Decompresses a stream produced by [`compress`] into `output`.
///
/// Returns the number of symbols decoded. On `TruncatedStream` the symbols
/// decoded so far have already been written and flushed.
pub fn decompress<R, W>(mut input: R, output: W) -> Result<u64>
where
    R: Read,
    W: Write,
{
    let header = Header::read_from(&mut input)?;
    decode_payload(&header, input, output)
}

/// Compresses the file at `input` into a new file at `output`.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<u64> {
    let mut source = File::open(input)?;
    let sink = BufWriter::new(File::create(output)?);
    compress(&mut source, sink)
}

/// Decompresses the file at `input` into a new file at `output`.
///
/// The output file is only created once the header has been validated, so a
/// corrupt input leaves an existing file at `output` untouched.
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<u64> {
    let mut source = BufReader::new(File::open(input)?);
    let header = Header::read_from(&mut source)?;
    let sink = BufWriter::new(File::create(output)?);
    decode_payload(&header, source, sink)
}

/// Decodes the payload that follows an already validated header.
fn decode_payload<R, W>(header: &Header, input: R, mut output: W) -> Result<u64>
where
    R: Read,
    W: Write,
{
    debug!(
        "decompressing {} symbols with {} distinct values",
        header.length,
        header.frequencies.distinct()
    );

    let tree = match HuffmanTree::build(&header.frequencies) {
        Some(tree) => tree,
        None => {
            output.flush()?;
            skip_trailing(input)?;
            return Ok(0);
        }
    };

    let mut reader = BitReader::new(BufReader::new(input));
    let decoded = decode_symbols(&mut reader, &tree, header.length, &mut output);
    output.flush()?;
    let decoded = decoded?;

    // Only padding may remain in the reader's partial byte.
    skip_trailing(reader.into_inner())?;

    debug!("decompressed {} symbols", decoded);
    Ok(decoded)
}

/// Drains whatever follows the payload, warning if anything does.
fn skip_trailing<R: Read>(mut rest: R) -> Result<u64> {
    let extra = io::copy(&mut rest, &mut io::sink())?;
    if extra > 0 {
        warn!("ignoring {} trailing bytes after payload", extra);
    }
    Ok(extra)
}

fn encode_symbols<R: Read, W: Write>(
    input: R,
    book: &CodeBook,
    writer: &mut BitWriter<W>,
) -> Result<u64> {
    let mut encoded = 0u64;
    for byte in input.bytes() {
        let byte = byte?;
        let code = book.get(byte).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("input changed between passes: byte {} has no code", byte),
            )
        })?;
        writer.write_bits(code)?;
        encoded += 1;
    }
    Ok(encoded)
}

/// Walks the tree once per symbol until `expected` symbols are emitted.
fn decode_symbols<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    tree: &HuffmanTree,
    expected: u64,
    output: &mut W,
) -> Result<u64> {
    let mut decoded = 0u64;

    while decoded < expected {
        let mut node = tree.root();
        // A lone leaf still spends one bit per symbol.
        if node.is_leaf() && reader.read_bit()?.is_none() {
            return Err(Error::TruncatedStream { decoded, expected });
        }

        let symbol = loop {
            match node {
                HuffmanNode::Leaf { symbol, .. } => break *symbol,
                HuffmanNode::Internal { left, right, .. } => {
                    node = match reader.read_bit()? {
                        Some(false) => left.as_ref(),
                        Some(true) => right.as_ref(),
                        None => return Err(Error::TruncatedStream { decoded, expected }),
                    };
                }
            }
        };

        output.write_all(&[symbol])?;
        decoded += 1;
    }

    Ok(decoded)
}
