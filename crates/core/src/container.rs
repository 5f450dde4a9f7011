//! Container serialization and parsing.
//!
//! A container is self-describing: it carries the frequency table instead
//! of the tree, and the decoder reconstructs the identical tree by
//! rerunning the deterministic builder on the parsed table.
//!
//! # Container Format
//!
//! All integers are little-endian.
//!
//! ```text
//! +----------------------+
//! | Magic (4 bytes)      |  0x48 0x55 0x46 0x31 ("HUF1")
//! +----------------------+
//! | version (1)          |  u8, currently 1
//! +----------------------+
//! | original_length (8)  |  u64 count of original input bytes
//! +----------------------+
//! | symbol_count (2)     |  u16 number of distinct symbols (0-256)
//! +----------------------+
//! | symbols[]            |  symbol_count x (u8 value + u64 frequency),
//! | (9 bytes each)       |  strictly ascending by symbol value
//! +----------------------+
//! | payload_bit_count(8) |  u64 number of valid bits in payload
//! +----------------------+
//! | payload              |  ceil(payload_bit_count / 8) bytes,
//! | (variable)           |  packed codes, MSB-first
//! +----------------------+
//! ```
//!
//! # Error Mapping
//!
//! Malformed headers and symbol tables fail with the format-error family
//! (`InvalidMagic`, `UnsupportedVersion`, `ContainerTooShort`,
//! `InvalidSymbolTable`, `TrailingData`); payloads that cannot reproduce
//! the declared original bytes fail with `TruncatedPayload` or
//! `CorruptPayload`. A bit-stream underrun mid-symbol is always reported
//! as `CorruptPayload`, never as a raw bit I/O error. No partial output is
//! ever returned.

use crate::bitio::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::error::{BitIoError, ContainerError, Error, Result, TreeError};
use crate::freq::FrequencyTable;
use crate::tree::{build_tree, Node};

/// Magic number for containers: "HUF1"
pub const MAGIC: [u8; 4] = *b"HUF1";

/// Current format version
pub const VERSION: u8 = 1;

/// Fixed header size: magic + version + original_length + symbol_count
const HEADER_SIZE: usize = 4 + 1 + 8 + 2;

/// Bytes per symbol table entry: u8 value + u64 frequency
const SYMBOL_ENTRY_SIZE: usize = 1 + 8;

/// Compress `input` into a self-describing container.
///
/// Never fails for any input; the `Result` only surfaces internal
/// invariant violations, which indicate a defect.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let freqs = FrequencyTable::from_bytes(input);
    let symbol_count = freqs.distinct_symbols() as u16;

    let mut out = Vec::with_capacity(
        HEADER_SIZE + symbol_count as usize * SYMBOL_ENTRY_SIZE + 8 + input.len() / 2,
    );
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&(input.len() as u64).to_le_bytes());
    out.extend_from_slice(&symbol_count.to_le_bytes());
    for (symbol, count) in freqs.iter() {
        out.push(symbol);
        out.extend_from_slice(&count.to_le_bytes());
    }

    let root = match build_tree(&freqs)? {
        Some(root) => root,
        None => {
            // Empty input: zero payload bits, no payload bytes.
            out.extend_from_slice(&0u64.to_le_bytes());
            return Ok(out);
        }
    };
    let codes = CodeTable::from_tree(&root)?;

    // An in-memory input is orders of magnitude below the u64 bit limit.
    let payload_bits = codes
        .payload_bits(&freqs)
        .ok_or(TreeError::WeightOverflow)?;
    out.extend_from_slice(&payload_bits.to_le_bytes());

    let mut writer = BitWriter::new();
    for &byte in input {
        let code = codes.get(byte).ok_or(TreeError::DegenerateTree)?;
        writer.write_code(&code);
    }
    let (payload, written_bits) = writer.finish();
    debug_assert_eq!(written_bits, payload_bits);
    out.extend_from_slice(&payload);

    Ok(out)
}

/// Container header fields, available without decoding the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Declared count of original input bytes
    pub original_length: u64,
    /// Number of distinct symbols in the table
    pub symbol_count: u16,
    /// Declared number of valid bits in the payload
    pub payload_bit_count: u64,
}

/// Parse and validate the fixed header fields of a container.
///
/// Checks magic, version, symbol count range, and that the symbol table
/// and the payload bit count field are present. Does not parse the symbol
/// table entries or touch the payload.
///
/// # Errors
/// Format-error family (`InvalidMagic`, `UnsupportedVersion`,
/// `ContainerTooShort`, `InvalidSymbolTable`).
pub fn inspect(container: &[u8]) -> Result<ContainerInfo> {
    if container.len() < HEADER_SIZE {
        return Err(ContainerError::ContainerTooShort {
            required: HEADER_SIZE,
            actual: container.len(),
        }
        .into());
    }

    let magic: [u8; 4] = container[0..4].try_into().unwrap();
    if magic != MAGIC {
        return Err(ContainerError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let version = container[4];
    if version != VERSION {
        return Err(ContainerError::UnsupportedVersion {
            expected: VERSION,
            actual: version,
        }
        .into());
    }

    let original_length = u64::from_le_bytes(container[5..13].try_into().unwrap());
    let symbol_count = u16::from_le_bytes(container[13..15].try_into().unwrap());
    if symbol_count > 256 {
        return Err(ContainerError::InvalidSymbolTable(format!(
            "symbol count {symbol_count} exceeds 256"
        ))
        .into());
    }

    let table_end = HEADER_SIZE + symbol_count as usize * SYMBOL_ENTRY_SIZE;
    // Symbol table plus the payload_bit_count field must be present.
    if container.len() < table_end + 8 {
        return Err(ContainerError::ContainerTooShort {
            required: table_end + 8,
            actual: container.len(),
        }
        .into());
    }

    let payload_bit_count =
        u64::from_le_bytes(container[table_end..table_end + 8].try_into().unwrap());

    Ok(ContainerInfo {
        original_length,
        symbol_count,
        payload_bit_count,
    })
}

/// Decompress a container back into the original bytes.
///
/// # Errors
/// Format-error family for malformed headers/symbol tables,
/// `TruncatedPayload`/`CorruptPayload` when the payload cannot reproduce
/// the declared original bytes. See the module docs for the mapping.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    let info = inspect(container)?;
    let original_length = info.original_length;
    let symbol_count = info.symbol_count;
    let payload_bit_count = info.payload_bit_count;
    let table_end = HEADER_SIZE + symbol_count as usize * SYMBOL_ENTRY_SIZE;

    let freqs = parse_symbol_table(&container[HEADER_SIZE..table_end], symbol_count)?;
    // The counts are attacker-controlled; the sum must be computed
    // checked or two huge frequencies wrap to a small "valid" total.
    let total = freqs.total_bytes().ok_or_else(|| {
        ContainerError::InvalidSymbolTable("frequency total overflows u64".to_string())
    })?;
    if total != original_length {
        return Err(ContainerError::InvalidSymbolTable(format!(
            "frequency total {total} does not match original length {original_length}"
        ))
        .into());
    }

    let payload = &container[table_end + 8..];

    let payload_len = payload_bit_count.div_ceil(8) as usize;
    if payload.len() < payload_len {
        return Err(ContainerError::TruncatedPayload {
            declared_bits: payload_bit_count,
            available_bytes: payload.len(),
        }
        .into());
    }
    if payload.len() > payload_len {
        return Err(ContainerError::TrailingData(payload.len() - payload_len).into());
    }

    if symbol_count == 0 {
        // Nothing was encoded; the header must agree.
        if original_length != 0 || payload_bit_count != 0 {
            return Err(ContainerError::CorruptPayload {
                expected: original_length,
                actual: 0,
            }
            .into());
        }
        return Ok(Vec::new());
    }

    // Rebuild the tree with the same deterministic algorithm the encoder
    // ran, then re-derive the code table and cross-check the declared bit
    // count against what the codes imply. Decoding only needs the tree,
    // but the cross-check catches containers whose frequency table and
    // payload disagree.
    let root = match build_tree(&freqs)? {
        Some(root) => root,
        None => {
            return Err(ContainerError::InvalidSymbolTable(
                "non-empty symbol table built no tree".to_string(),
            )
            .into())
        }
    };
    let codes = CodeTable::from_tree(&root)?;
    let expected_bits = codes.payload_bits(&freqs).ok_or_else(|| {
        ContainerError::InvalidSymbolTable("payload bit count overflows u64".to_string())
    })?;
    if expected_bits != payload_bit_count {
        return Err(ContainerError::InvalidSymbolTable(format!(
            "declared payload bits {payload_bit_count}, code table implies {expected_bits}"
        ))
        .into());
    }

    decode_payload(&root, payload, payload_bit_count, original_length)
}

/// Parse `symbol_count` (value, frequency) entries, enforcing strictly
/// ascending symbol order and non-zero frequencies.
fn parse_symbol_table(bytes: &[u8], symbol_count: u16) -> Result<FrequencyTable> {
    let mut freqs = FrequencyTable::new();
    let mut previous: Option<u8> = None;

    for entry in 0..symbol_count as usize {
        let offset = entry * SYMBOL_ENTRY_SIZE;
        let symbol = bytes[offset];
        let count = u64::from_le_bytes(bytes[offset + 1..offset + 9].try_into().unwrap());

        if let Some(prev) = previous {
            if symbol <= prev {
                return Err(ContainerError::InvalidSymbolTable(format!(
                    "symbol {symbol} after {prev}: entries must be strictly ascending"
                ))
                .into());
            }
        }
        if count == 0 {
            return Err(ContainerError::InvalidSymbolTable(format!(
                "symbol {symbol} has zero frequency"
            ))
            .into());
        }

        freqs.set_count(symbol, count);
        previous = Some(symbol);
    }

    Ok(freqs)
}

/// Walk the tree over the payload bits, emitting one symbol per leaf,
/// until the declared bit count is exhausted.
fn decode_payload(
    root: &Node,
    payload: &[u8],
    payload_bit_count: u64,
    original_length: u64,
) -> Result<Vec<u8>> {
    let corrupt = |actual: u64| -> Error {
        ContainerError::CorruptPayload {
            expected: original_length,
            actual,
        }
        .into()
    };

    let mut reader =
        BitReader::new(payload, payload_bit_count).map_err(|_| corrupt(0))?;
    let mut out = Vec::with_capacity(original_length as usize);

    while !reader.is_empty() {
        let mut node = root;
        loop {
            match node {
                Node::Leaf { symbol, .. } => {
                    out.push(*symbol);
                    break;
                }
                Node::Internal { left, right, .. } => {
                    let bit = match reader.read_bit() {
                        Ok(bit) => bit,
                        // Ran out of valid bits mid-symbol.
                        Err(Error::BitIo(BitIoError::EndOfStream)) => {
                            return Err(corrupt(out.len() as u64))
                        }
                        Err(err) => return Err(err),
                    };
                    node = if bit { right.as_ref() } else { left.as_ref() };
                }
            }
        }
        if out.len() as u64 > original_length {
            return Err(corrupt(out.len() as u64));
        }
    }

    if out.len() as u64 != original_length {
        return Err(corrupt(out.len() as u64));
    }
    Ok(out)
}
