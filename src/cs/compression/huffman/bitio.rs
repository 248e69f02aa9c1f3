//! Bit-granular reading and writing over byte streams.
//!
//! Both directions pack bits most-significant-bit first. The writer pads the
//! final partial byte with zero bits on close; the reader reports the end of
//! the underlying source as `None` and keeps reporting it afterwards.

use crate::cs::compression::Result;
use crate::cs::error::Error;
use bitvec::prelude::*;
use std::io::{self, Read, Write};

const BYTE_BITS: u8 = u8::BITS as u8;

/// Accumulates bits and flushes them to a byte sink.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    sink: W,
    /// Pending bits, aligned to the low end
    current: u8,
    /// Number of pending bits (0-7)
    filled: u8,
    bits_written: u64,
    closed: bool,
}

impl<W: Write> BitWriter<W> {
    /// Wraps a byte sink.
    pub fn new(sink: W) -> Self {
        BitWriter {
            sink,
            current: 0,
            filled: 0,
            bits_written: 0,
            closed: false,
        }
    }

    /// Appends one bit. A full byte is written to the sink as soon as it is
    /// complete.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        if self.closed {
            return Err(Error::StreamClosed);
        }

        self.current = (self.current << 1) | bit as u8;
        self.filled += 1;
        self.bits_written += 1;

        if self.filled == BYTE_BITS {
            let byte = self.current;
            self.current = 0;
            self.filled = 0;
            if let Err(e) = self.sink.write_all(&[byte]) {
                // The sink position is unknown now; refuse further bits.
                self.closed = true;
                return Err(e.into());
            }
        }
        Ok(())
    }

    /// Appends every bit of `bits` in order.
    pub fn write_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Total number of bits accepted so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Whether `close` has been called or a sink write has failed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Pads and writes any partial byte, then flushes the sink.
    ///
    /// Calling `close` more than once is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.filled > 0 {
            let padded = self.current << (BYTE_BITS - self.filled);
            self.current = 0;
            self.filled = 0;
            self.sink.write_all(&[padded])?;
        }
        self.sink.flush()?;
        Ok(())
    }

    /// Returns the sink. Pending bits are discarded unless `close` ran first.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Pulls bits one at a time out of a byte source.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    source: R,
    current: u8,
    /// Bits of `current` already consumed; `BYTE_BITS` means a refill is due
    cursor: u8,
    exhausted: bool,
}

impl<R: Read> BitReader<R> {
    /// Wraps a byte source.
    pub fn new(source: R) -> Self {
        BitReader {
            source,
            current: 0,
            cursor: BYTE_BITS,
            exhausted: false,
        }
    }

    /// Reads the next bit, or `None` once the source is exhausted.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.cursor == BYTE_BITS {
            match self.next_byte()? {
                Some(byte) => {
                    self.current = byte;
                    self.cursor = 0;
                }
                None => return Ok(None),
            }
        }

        let bit = (self.current >> (BYTE_BITS - 1 - self.cursor)) & 1;
        self.cursor += 1;
        Ok(Some(bit == 1))
    }

    /// Returns the source, dropping any buffered bits.
    pub fn into_inner(self) -> R {
        self.source
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut buf = [0u8; 1];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}
