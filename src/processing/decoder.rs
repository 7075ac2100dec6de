//! # Decoder
//!
//! Reads blue-channel LSBs in [`RasterOrder`], packs them MSB-first into
//! bytes, decodes the bytes as UTF-8 and cuts the result at the first
//! delimiter.
//!
//! Decoding is lenient on purpose. Everything after the delimiter is random
//! padding, so invalid UTF-8 is replaced with U+FFFD instead of failing, and
//! a trailing group of fewer than eight bits is dropped.

use log::debug;

use super::carrier::{lsb, Carrier};
use super::traversal::RasterOrder;
use crate::error::{Result, StegoError};

/// Outcome of an extraction.
///
/// `NotFound` is a successful read of a carrier that holds no delimited
/// message. It is kept apart from `Found(String::new())`, which means an
/// empty message was embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(String),
    NotFound,
}

impl Extraction {
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Extraction::Found(text) => Some(text),
            Extraction::NotFound => None,
        }
    }

    /// Collapse to a plain string; `NotFound` becomes the empty string.
    pub fn into_text(self) -> String {
        match self {
            Extraction::Found(text) => text,
            Extraction::NotFound => String::new(),
        }
    }
}

impl From<Extraction> for Option<String> {
    fn from(extraction: Extraction) -> Self {
        match extraction {
            Extraction::Found(text) => Some(text),
            Extraction::NotFound => None,
        }
    }
}

/// Every complete byte hidden in `carrier`, in traversal order.
pub fn read_bytes<C: Carrier + ?Sized>(carrier: &C) -> Vec<u8> {
    let order = RasterOrder::of(carrier);
    let mut bytes = Vec::with_capacity(order.len() / 8);
    let mut current = 0u8;
    let mut filled = 0;

    for (x, y) in order.positions() {
        current = (current << 1) | lsb(carrier.channel_value(x, y));
        filled += 1;

        if filled == 8 {
            bytes.push(current);
            current = 0;
            filled = 0;
        }
    }

    bytes
}

/// Recover the text hidden in `carrier` up to the first `delimiter`.
///
/// # Errors
/// - [`StegoError::EmptyDelimiter`] if `delimiter` is empty
pub fn extract<C: Carrier + ?Sized>(carrier: &C, delimiter: &str) -> Result<Extraction> {
    if delimiter.is_empty() {
        return Err(StegoError::EmptyDelimiter);
    }

    let bytes = read_bytes(carrier);
    let decoded = String::from_utf8_lossy(&bytes);

    match decoded.find(delimiter) {
        Some(end) => {
            debug!("Delimiter found after {} characters", decoded[..end].chars().count());
            Ok(Extraction::Found(decoded[..end].to_string()))
        }
        None => {
            debug!("Delimiter not found in {} decoded bytes", bytes.len());
            Ok(Extraction::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Grid whose blue LSBs spell out `bits` in raster order, zero after.
    fn image_with_bits(width: u32, height: u32, bits: &[u8]) -> RgbImage {
        let order = RasterOrder::new(width, height);
        let mut img = RgbImage::from_pixel(width, height, Rgb([255, 255, 254]));
        for (i, &bit) in bits.iter().enumerate().take(order.len()) {
            let (x, y) = order.position(i);
            img.get_pixel_mut(x, y)[2] |= bit;
        }
        img
    }

    fn bits_of(bytes: &[u8]) -> Vec<u8> {
        bytes
            .iter()
            .flat_map(|b| (0..8).rev().map(move |i| (b >> i) & 1))
            .collect()
    }

    #[test]
    fn test_read_bytes_drops_partial_byte() {
        // 5x5 = 25 bits: three bytes and one stray bit
        let img = image_with_bits(5, 5, &bits_of(b"xyz\x80"));
        assert_eq!(read_bytes(&img), b"xyz".to_vec());
    }

    #[test]
    fn test_extract_stops_at_first_delimiter() {
        let img = image_with_bits(16, 16, &bits_of(b"oneENDtwoEND"));
        assert_eq!(extract(&img, "END").unwrap(), Extraction::Found("one".to_string()));
    }

    #[test]
    fn test_blank_image_is_not_found() {
        let img = RgbImage::from_pixel(40, 40, Rgb([255, 255, 255]));
        let extraction = extract(&img, "END").unwrap();

        assert_eq!(extraction, Extraction::NotFound);
        assert_eq!(extraction.into_text(), "");
    }

    #[test]
    fn test_empty_message_is_found() {
        let img = image_with_bits(8, 8, &bits_of(b"END"));
        let extraction = extract(&img, "END").unwrap();

        assert!(extraction.is_found());
        assert_eq!(extraction.text(), Some(""));
    }

    #[test]
    fn test_invalid_utf8_after_delimiter_is_tolerated() {
        let mut bytes = b"ok|".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE, 0xC3]);
        let img = image_with_bits(8, 6, &bits_of(&bytes));

        assert_eq!(extract(&img, "|").unwrap(), Extraction::Found("ok".to_string()));
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let img = RgbImage::new(8, 8);
        assert!(matches!(extract(&img, ""), Err(StegoError::EmptyDelimiter)));
    }

    #[test]
    fn test_extraction_into_option() {
        let found: Option<String> = Extraction::Found("hi".into()).into();
        let missing: Option<String> = Extraction::NotFound.into();

        assert_eq!(found.as_deref(), Some("hi"));
        assert_eq!(missing, None);
    }
}
