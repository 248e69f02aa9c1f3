//! Lossless byte-stream compression with static Huffman codes.

pub mod cs;

pub use cs::compression::{self, huffman, Compression, HuffmanCodec};
pub use cs::error::{self, Error};
pub use cs::Result;
