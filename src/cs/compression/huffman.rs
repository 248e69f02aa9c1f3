//! Static Huffman coding of byte streams.
//!
//! Compression makes two passes over the input. The first counts every byte
//! value; the counts are written as a fixed-size header and used to build a
//! Huffman tree, whose leaf paths become the code for each byte. The second
//! pass replaces every byte with its code, packed most-significant-bit first.
//! Decompression reads the header, rebuilds the identical tree and walks it
//! bit by bit until the recorded number of symbols has been emitted.
//!
//! # Stream format
//!
//! | Field           | Size      | Contents                                     |
//! |-----------------|-----------|----------------------------------------------|
//! | Frequency table | 256 × 4   | big-endian `u32` count per byte value 0-255  |
//! | Payload length  | 4         | big-endian `u32` number of encoded symbols   |
//! | Payload         | variable  | concatenated codes, zero-padded final byte   |
//!
//! An input with a single distinct byte value codes every occurrence as one
//! `0` bit. An empty input produces a header of zeros and no payload.
//!
//! # Examples
//!
//! ```rust
//! use huffpack::cs::compression::huffman::{huffman_decode, huffman_encode};
//!
//! let packed = huffman_encode(b"this is an example for huffman encoding").unwrap();
//! let unpacked = huffman_decode(&packed).unwrap();
//! assert_eq!(unpacked, b"this is an example for huffman encoding");
//! ```

use crate::cs::compression::{Compression, Result};

pub mod bitio;
pub mod codebook;
pub mod codec;
pub mod frequency;
pub mod header;
pub mod tree;

pub use bitio::{BitReader, BitWriter};
pub use codebook::{Code, CodeBook};
pub use codec::{compress, compress_file, decompress, decompress_file, HuffmanCodec};
pub use frequency::FrequencyTable;
pub use header::{Header, HEADER_LEN};
pub use tree::{HuffmanNode, HuffmanTree};

/// Build a frequency table counting each byte of `input`.
pub fn build_frequency_table(input: &[u8]) -> FrequencyTable {
    FrequencyTable::from_bytes(input)
}

/// Build the Huffman tree given a frequency table.
/// Returns `None` if the frequency table is empty.
pub fn build_huffman_tree(freq_table: &FrequencyTable) -> Option<HuffmanTree> {
    HuffmanTree::build(freq_table)
}

/// Build the code table mapping bytes to their Huffman codes.
pub fn build_code_table(tree: &HuffmanTree) -> CodeBook {
    CodeBook::from_tree(tree)
}

/// Convenience function: compresses `input` into a self-describing buffer.
pub fn huffman_encode(input: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().compress(input)
}

/// Convenience function: restores the bytes compressed by [`huffman_encode`].
pub fn huffman_decode(encoded: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().decompress(encoded)
}
