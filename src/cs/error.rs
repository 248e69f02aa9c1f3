//! Error type shared by every codec in the crate.

use thiserror::Error;

/// Errors raised while compressing or decompressing a stream.
#[derive(Debug, Error)]
pub enum Error {
    /// A source or sink could not be opened, read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The header of a compressed stream is inconsistent.
    #[error("corrupt header: {0}")]
    CorruptHeader(String),

    /// The bit-packed payload ended before every symbol was decoded.
    #[error("truncated stream: decoded {decoded} of {expected} symbols")]
    TruncatedStream { decoded: u64, expected: u64 },

    /// A bit was written after the writer was closed.
    #[error("write attempted on a closed bit stream")]
    StreamClosed,

    /// The input cannot be represented in the compressed format.
    #[error("input too large: {size} (maximum {max_size})")]
    InputTooLarge { size: u64, max_size: u64 },
}

impl Error {
    /// Convenience constructor for header errors.
    pub fn corrupt_header<S: Into<String>>(msg: S) -> Self {
        Error::CorruptHeader(msg.into())
    }

    /// Returns true when the error left partial output behind.
    pub fn is_incomplete_output(&self) -> bool {
        matches!(self, Error::TruncatedStream { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_conversion() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_display_messages() {
        let err = Error::TruncatedStream {
            decoded: 3,
            expected: 10,
        };
        assert_eq!(err.to_string(), "truncated stream: decoded 3 of 10 symbols");
        assert!(err.is_incomplete_output());

        let err = Error::corrupt_header("short table");
        assert_eq!(err.to_string(), "corrupt header: short table");
        assert!(!err.is_incomplete_output());
    }
}
