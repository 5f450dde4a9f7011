//! Error types for the huffc codec.
//!
//! All operations return structured errors rather than panicking.
//! Algorithmic errors (empty queue, degenerate tree) indicate a programming
//! defect and are never expected in correct operation; container errors are
//! the normal failure mode when decoding untrusted bytes.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Tree: priority queue or tree construction/traversal failures
/// - Container: malformed or corrupt container bytes
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past the valid bit limit)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Tree construction or traversal error
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Container serialization/deserialization error
    #[error("container error: {0}")]
    Container(#[from] ContainerError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the declared valid bit count
    #[error("unexpected end of bit stream")]
    EndOfStream,

    /// Invalid bit count for a multi-bit read/write (more than 64 bits)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Priority queue and Huffman tree errors.
///
/// These indicate internal invariant violations, not bad input.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Extracted from an empty priority queue
    #[error("extract from empty priority queue")]
    EmptyQueue,

    /// Traversal encountered a node missing a child
    #[error("degenerate tree: internal node missing a child")]
    DegenerateTree,

    /// Code depth exceeded the supported maximum (128 bits)
    #[error("code length {0} exceeds maximum 128")]
    CodeTooLong(usize),

    /// Combined subtree weight exceeded the u64 range
    #[error("combined node weight overflows u64")]
    WeightOverflow,
}

/// Container format and payload errors.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Unsupported format version
    #[error("unsupported format version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u8, actual: u8 },

    /// Container is too short for the declared contents
    #[error("container too short: need at least {required} bytes, got {actual}")]
    ContainerTooShort { required: usize, actual: usize },

    /// Symbol table violates the format (count out of range, symbols not
    /// strictly ascending, or totals inconsistent with the header)
    #[error("invalid symbol table: {0}")]
    InvalidSymbolTable(String),

    /// Bytes remain after the declared payload
    #[error("trailing data: {0} unexpected bytes after payload")]
    TrailingData(usize),

    /// Payload bytes end before the declared bit count is satisfied
    #[error("truncated payload: {declared_bits} bits declared, {available_bytes} bytes present")]
    TruncatedPayload {
        declared_bits: u64,
        available_bytes: usize,
    },

    /// Payload does not decode to the declared original length,
    /// or the bit stream ran out mid-symbol
    #[error("corrupt payload: expected {expected} symbols, got {actual}")]
    CorruptPayload { expected: u64, actual: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
