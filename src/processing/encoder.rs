//! # Encoder
//!
//! Writes `UTF8(text) || UTF8(delimiter)` into the blue-channel LSBs of a
//! carrier, one bit per pixel in [`RasterOrder`], most significant bit of
//! each byte first. Pixels past the payload get random padding bits.
//!
//! Embedding is all-or-nothing: capacity is checked before the first pixel
//! is written, so a failed call leaves the carrier untouched.

use log::debug;
use serde::Serialize;

use super::bits::BitSource;
use super::carrier::{with_lsb, Carrier};
use super::traversal::RasterOrder;
use crate::error::{Result, StegoError};

/// Delimiter used when the caller does not configure one.
pub const DEFAULT_DELIMITER: &str = "END";

/// Summary of a successful embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmbedReport {
    /// Bits occupied by text and delimiter.
    pub payload_bits: usize,
    /// Bits filled from the padding source.
    pub padding_bits: usize,
    /// Total bits the carrier can hold (one per pixel).
    pub capacity_bits: usize,
}

/// Capacity of `carrier` in bits.
pub fn capacity<C: Carrier + ?Sized>(carrier: &C) -> usize {
    RasterOrder::of(carrier).len()
}

/// Largest payload, in bytes, that fits in `carrier` (delimiter included).
pub fn max_payload_bytes<C: Carrier + ?Sized>(carrier: &C) -> usize {
    capacity(carrier) / 8
}

/// Bytes actually written into the carrier.
pub fn payload_bytes(text: &str, delimiter: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(text.len() + delimiter.len());
    payload.extend_from_slice(text.as_bytes());
    payload.extend_from_slice(delimiter.as_bytes());
    payload
}

/// Number of bits `text` plus `delimiter` occupies.
pub fn payload_bits(text: &str, delimiter: &str) -> usize {
    (text.len() + delimiter.len()).saturating_mul(8)
}

/// Bit `index` of `payload`, MSB-first within each byte.
#[inline]
fn payload_bit(payload: &[u8], index: usize) -> u8 {
    (payload[index / 8] >> (7 - index % 8)) & 1
}

/// Hide `text` followed by `delimiter` in `carrier`.
///
/// # Arguments
/// - `carrier`: image to modify in place
/// - `text`: message to hide
/// - `delimiter`: end-of-message marker appended to `text`
/// - `padding`: source of the bits written after the payload
///
/// # Errors
/// - [`StegoError::EmptyDelimiter`] if `delimiter` is empty
/// - [`StegoError::CapacityExceeded`] if the payload has more bits than the
///   carrier has pixels; the carrier is not modified
pub fn embed<C, B>(
    carrier: &mut C,
    text: &str,
    delimiter: &str,
    padding: &mut B,
) -> Result<EmbedReport>
where
    C: Carrier + ?Sized,
    B: BitSource + ?Sized,
{
    if delimiter.is_empty() {
        return Err(StegoError::EmptyDelimiter);
    }

    let order = RasterOrder::of(carrier);
    let needed = payload_bits(text, delimiter);
    let available = order.len();

    if needed > available {
        return Err(StegoError::CapacityExceeded { needed, available });
    }

    let payload = payload_bytes(text, delimiter);

    for (index, (x, y)) in order.positions().enumerate() {
        let bit = if index < needed {
            payload_bit(&payload, index)
        } else {
            padding.next_bit()
        };

        let value = carrier.channel_value(x, y);
        carrier.set_channel_value(x, y, with_lsb(value, bit));
    }

    let report = EmbedReport {
        payload_bits: needed,
        padding_bits: available - needed,
        capacity_bits: available,
    };

    debug!(
        "Embedded {} payload bits, {} padding bits ({}x{} carrier)",
        report.payload_bits,
        report.padding_bits,
        carrier.width(),
        carrier.height()
    );

    Ok(report)
}
