//! Fixed-width little-endian table layout.
//!
//! Each signed entry is reduced modulo `2^W` (its two's complement bit
//! pattern at width `W`) and written as `ceil(W / 8)` little-endian bytes.
//! Entries are concatenated in table order with no header.
//!
//! ```
//! use wavelut::serialize::pack;
//!
//! assert_eq!(pack(&[1, -1], 16).unwrap(), vec![0x01, 0x00, 0xff, 0xff]);
//! assert_eq!(pack(&[-2], 12).unwrap(), vec![0xfe, 0x0f]);
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{LutError, Result};

/// Bytes per entry at `width_bits`, `ceil(W / 8)`.
///
/// # Errors
///
/// Returns [`LutError::OutputWidth`] unless `1 <= width_bits <= 64`.
pub fn entry_bytes(width_bits: u32) -> Result<usize> {
    if width_bits == 0 || width_bits > 64 {
        return Err(LutError::OutputWidth(width_bits));
    }
    Ok(width_bits.div_ceil(8) as usize)
}

/// Packs `table` into its byte layout.
///
/// # Errors
///
/// Returns [`LutError::OutputWidth`] unless `1 <= width_bits <= 64`.
pub fn pack(table: &[i64], width_bits: u32) -> Result<Vec<u8>> {
    let size = entry_bytes(width_bits)?;
    let modulus = 1i128 << width_bits;
    let mut bytes = Vec::with_capacity(table.len() * size);
    for &entry in table {
        let wrapped = i128::from(entry).rem_euclid(modulus) as u64;
        bytes.extend_from_slice(&wrapped.to_le_bytes()[..size]);
    }
    Ok(bytes)
}

/// Reverses [`pack`], reading entries as two's complement at `width_bits`.
///
/// Values in `[-2^(W-1), 2^(W-1))` survive a pack/unpack round trip.
///
/// # Errors
///
/// Returns [`LutError::OutputWidth`] for an invalid width, or
/// [`LutError::TruncatedTable`] if `bytes` is not a whole number of entries.
pub fn unpack(bytes: &[u8], width_bits: u32) -> Result<Vec<i64>> {
    let size = entry_bytes(width_bits)?;
    if bytes.len() % size != 0 {
        return Err(LutError::TruncatedTable {
            len: bytes.len(),
            entry_bytes: size,
        });
    }
    let modulus = 1i128 << width_bits;
    let half = modulus >> 1;
    Ok(bytes
        .chunks_exact(size)
        .map(|chunk| {
            let mut le = [0u8; 8];
            le[..size].copy_from_slice(chunk);
            let v = i128::from(u64::from_le_bytes(le)) % modulus;
            (if v >= half { v - modulus } else { v }) as i64
        })
        .collect())
}

/// Packs `table` and writes it to `path`, returning the byte count.
///
/// The table is packed before the file is opened, so a width error leaves
/// no partial file behind.
///
/// # Errors
///
/// Returns [`LutError::OutputWidth`] for an invalid width or an I/O error if
/// the file cannot be written.
pub fn write_lut(path: &Path, table: &[i64], width_bits: u32) -> Result<usize> {
    let bytes = pack(table, width_bits)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(bytes.len())
}
