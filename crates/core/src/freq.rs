//! Byte frequency counting.
//!
//! A [`FrequencyTable`] maps each byte value that appears in the input to
//! its occurrence count. It is the only piece of codec state the container
//! transmits: the decoder rebuilds the exact same Huffman tree from it by
//! rerunning the deterministic builder, so the tree itself never travels.
//!
//! Counting is commutative and associative, so chunked inputs can be
//! counted independently and merged with [`FrequencyTable::merge`] before
//! tree construction without affecting the result.

/// Occurrence counts for each of the 256 possible byte values.
///
/// Counts are u64, unbounded by any practical input size. An empty input
/// yields an empty table; a single repeated byte yields one entry with
/// count equal to the input length. Neither needs special-casing here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Create an empty table (all counts zero).
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte in `input`. Pure function of the input.
    pub fn from_bytes(input: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in input {
            table.counts[byte as usize] += 1;
        }
        table
    }

    /// Record one occurrence of `symbol`.
    pub fn record(&mut self, symbol: u8) {
        self.counts[symbol as usize] += 1;
    }

    /// Set the count for `symbol` directly (used when parsing a
    /// transmitted table).
    pub fn set_count(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    /// Occurrence count for `symbol` (zero if absent).
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Element-wise sum of another table into this one.
    ///
    /// Merging per-chunk tables before tree construction produces the same
    /// tree as counting the concatenated input.
    pub fn merge(&mut self, other: &FrequencyTable) {
        for (count, &extra) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count += extra;
        }
    }

    /// Number of distinct symbols with a non-zero count (0-256).
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    ///
    /// Returns `None` if the sum overflows u64. A table counted from real
    /// bytes can never overflow; one populated via [`set_count`] from an
    /// untrusted container can, and must be rejected.
    ///
    /// [`set_count`]: FrequencyTable::set_count
    pub fn total_bytes(&self) -> Option<u64> {
        self.counts
            .iter()
            .try_fold(0u64, |total, &count| total.checked_add(count))
    }

    /// True if no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate over `(symbol, count)` pairs with non-zero counts,
    /// ascending by symbol value.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}
