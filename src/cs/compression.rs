//! Compression algorithms implementation.
//!
//! This module provides lossless entropy coders over byte sequences:
//! - Static Huffman coding with a serialized frequency table
//!
//! # Examples
//!
//! ```rust
//! use huffpack::cs::compression::{Compression, HuffmanCodec};
//!
//! let codec = HuffmanCodec::new();
//! let packed = codec.compress(b"TOBEORNOTTOBEORTOBEORNOT").unwrap();
//! assert_eq!(codec.decompress(&packed).unwrap(), b"TOBEORNOTTOBEORTOBEORNOT");
//! ```

use crate::cs::error::Error;

/// Result type for compression operations
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod huffman;
pub use huffman::{
    build_code_table, build_frequency_table, build_huffman_tree, compress_file, decompress_file,
    huffman_decode, huffman_encode, CodeBook, FrequencyTable, HuffmanCodec, HuffmanNode,
    HuffmanTree,
};
