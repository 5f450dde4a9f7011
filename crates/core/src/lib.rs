//! huffc-core: Static Huffman coder.
//!
//! Given a byte stream, this library builds a frequency-minimal
//! prefix-free binary code over the observed byte alphabet, serializes a
//! self-describing compressed container, and losslessly reconstructs the
//! original bytes from that container.
//!
//! # Architecture
//!
//! The codec is a pipeline of small, single-owner stages:
//! - `freq`: byte frequency counting
//! - `heap`: binary min-heap with a deterministic composite ordering key
//! - `tree`: Huffman tree construction
//! - `code`: symbol-to-code table derivation
//! - `bitio`: MSB-first bit packing/unpacking
//! - `container`: container serialization and parsing
//! - `stats`: diagnostics and human-readable summaries
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **Deterministic**: the container transmits only the frequency table;
//!   the decoder rebuilds the identical tree by rerunning the same
//!   tie-broken construction, so two runs over the same input produce
//!   byte-identical containers
//! - **Single owner**: each table, heap, and tree belongs to exactly one
//!   encode or decode invocation and is dropped when its stage completes

pub mod bitio;
pub mod code;
pub mod container;
pub mod error;
pub mod freq;
pub mod heap;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use container::{compress, decompress};
pub use error::{Error, Result};
