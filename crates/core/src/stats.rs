//! Codec statistics and diagnostic dumps.
//!
//! Collected explicitly by the caller around a compress or decompress
//! call; nothing in the codec path updates these on its own. The table
//! formatters take read-only snapshots and are meant for debug output,
//! not for machine consumption (use [`CodecStats::export_text`] for
//! that).
//!
//! # Thread Safety
//!
//! `CodecStats` is NOT thread-safe; the codec is single-threaded and so
//! is its bookkeeping.

use crate::code::CodeTable;
use crate::freq::FrequencyTable;
use std::time::{Duration, Instant};

/// Statistics for a single compress or decompress run.
#[derive(Debug, Clone)]
pub struct CodecStats {
    /// When the operation started
    pub start_time: Instant,

    /// When the operation ended (set on completion)
    pub end_time: Option<Instant>,

    /// Original (uncompressed) byte count
    pub input_bytes: u64,

    /// Container byte count
    pub container_bytes: u64,

    /// Distinct symbols in the input
    pub distinct_symbols: usize,

    /// Valid bits in the encoded payload
    pub payload_bits: u64,
}

impl CodecStats {
    /// Create new stats with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_bytes: 0,
            container_bytes: 0,
            distinct_symbols: 0,
            payload_bits: 0,
        }
    }

    /// Mark the operation as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compression ratio (container / original). Returns 0.0 for empty
    /// input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.container_bytes as f64 / self.input_bytes as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Codec Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!("Original:  {} bytes", self.input_bytes);
        println!("Container: {} bytes", self.container_bytes);
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!("Distinct symbols: {}", self.distinct_symbols);
        println!("Payload bits: {}", self.payload_bits);
    }

    /// Export stats as key=value lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_bytes={}\n\
             container_bytes={}\n\
             compression_ratio={:.4}\n\
             distinct_symbols={}\n\
             payload_bits={}\n",
            self.duration().as_millis(),
            self.input_bytes,
            self.container_bytes,
            self.compression_ratio(),
            self.distinct_symbols,
            self.payload_bits,
        )
    }
}

impl Default for CodecStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a frequency table for debug output, one symbol per line,
/// ascending by symbol value.
pub fn format_frequency_table(table: &FrequencyTable) -> String {
    let mut out = String::new();
    for (symbol, count) in table.iter() {
        out.push_str(&format!("{}: {}\n", printable(symbol), count));
    }
    out
}

/// Render a code table for debug output, one symbol per line.
pub fn format_code_table(codes: &CodeTable) -> String {
    let mut out = String::new();
    for (symbol, code) in codes.iter() {
        out.push_str(&format!(
            "{}: {} ({} bits)\n",
            printable(symbol),
            code,
            code.len
        ));
    }
    out
}

fn printable(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("0x{symbol:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::build_tree;

    #[test]
    fn test_compression_ratio() {
        let mut stats = CodecStats::new();
        stats.input_bytes = 1000;
        stats.container_bytes = 750;
        assert_eq!(stats.compression_ratio(), 0.75);

        let empty = CodecStats::new();
        assert_eq!(empty.compression_ratio(), 0.0);
    }

    #[test]
    fn test_export_text() {
        let mut stats = CodecStats::new();
        stats.input_bytes = 1000;
        stats.container_bytes = 640;
        stats.distinct_symbols = 12;
        stats.complete();

        let text = stats.export_text();
        assert!(text.contains("input_bytes=1000"));
        assert!(text.contains("container_bytes=640"));
        assert!(text.contains("distinct_symbols=12"));
    }

    #[test]
    fn test_format_frequency_table() {
        let table = FrequencyTable::from_bytes(b"aab\x01");
        let text = format_frequency_table(&table);
        assert_eq!(text, "0x01: 1\n'a': 2\n'b': 1\n");
    }

    #[test]
    fn test_format_code_table() {
        let table = FrequencyTable::from_bytes(b"aaaabbbcc");
        let root = build_tree(&table).unwrap().unwrap();
        let codes = CodeTable::from_tree(&root).unwrap();
        let text = format_code_table(&codes);
        assert!(text.contains("'a': 0 (1 bits)"));
        assert!(text.contains("'b': 11 (2 bits)"));
        assert!(text.contains("'c': 10 (2 bits)"));
    }
}
