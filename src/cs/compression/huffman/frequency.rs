use std::io::{self, Read};

/// Number of distinct byte symbols.
pub const SYMBOLS: usize = 256;

/// Occurrence counts for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOLS],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// An all-zero table.
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; SYMBOLS],
        }
    }

    /// Wraps an existing count array.
    ///
    /// Returns `None` if the counts sum past `u64::MAX`, so that `total` and
    /// every merged tree weight stay representable.
    pub fn from_counts(counts: [u64; SYMBOLS]) -> Option<Self> {
        counts
            .iter()
            .try_fold(0u64, |acc, &c| acc.checked_add(c))
            .map(|_| FrequencyTable { counts })
    }

    /// Counts the bytes of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Counts every byte of `reader` until it is exhausted.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut table = Self::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            table.update(&buf[..n]);
        }
        Ok(table)
    }

    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Count of one symbol.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts, equal to the length of the counted input.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Symbols with a non-zero count, in ascending order, with their counts.
    pub fn symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// The raw count array, indexed by symbol.
    pub fn counts(&self) -> &[u64; SYMBOLS] {
        &self.counts
    }
}
