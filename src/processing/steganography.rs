//! # LSB Steganography Operations
//!
//! File- and byte-level entry points that combine the image store with the
//! codec. Front ends (CLI, web API) call these; the codec itself lives in
//! [`encoder`](super::encoder), [`decoder`](super::decoder) and
//! [`visualize`](super::visualize).
//!
//! ## Algorithm
//!
//! One bit is hidden per pixel, in the least significant bit of the blue
//! channel. Pixels are visited row by row, left to right.
//!
//! ### Encoding Process
//! 1. Append the delimiter to the text and take the UTF-8 bytes
//! 2. Check that `bytes * 8 <= width * height` before touching any pixel
//! 3. Write the payload bits MSB-first, one per pixel
//! 4. Fill every remaining pixel's LSB with a random bit
//! 5. Save the carrier in a lossless format (BMP by default)
//!
//! ### Decoding Process
//! 1. Read every pixel's blue LSB and pack groups of 8 into bytes
//! 2. Decode the bytes as UTF-8, replacing invalid sequences
//! 3. Return everything before the first delimiter, or "not found"
//!
//! ### Capacity
//! An image can store `(width * height) / 8` bytes, delimiter included.
//!
//! Example: an 800x600 image can store 60,000 bytes.

use std::path::Path;

use log::{info, warn};

use super::bits::BitSource;
use super::decoder::{extract, Extraction};
use super::encoder::{capacity, embed, payload_bits, EmbedReport};
use super::store::{
    check_layout, decode_carrier, encode_bit_plane, encode_carrier, load_carrier,
    lossless_format_for_path, save_bit_plane, save_carrier, CarrierFormat,
};
use super::visualize::bit_plane;
use crate::error::{Result, StegoError};

/// Embed text into an image held in memory.
///
/// # Arguments
/// - `image_bytes`: Raw bytes of the cover image (any format the `image` crate reads)
/// - `text`: UTF-8 text to embed
/// - `delimiter`: End-of-message marker
/// - `format`: Lossless format of the returned carrier
/// - `padding`: Source of the bits written after the payload
///
/// # Returns
/// - `Ok((bytes, report))`: Encoded carrier and embed summary
/// - `Err`: If the image can't be decoded, is too small, or encoding fails
///
/// # Example
/// ```ignore
/// let image_data = std::fs::read("cover.png")?;
/// let mut padding = RandomBits::from_entropy();
/// let (carrier, _) =
///     embed_text_bytes(&image_data, "Secret", "END", CarrierFormat::Bmp, &mut padding)?;
/// std::fs::write("carrier.bmp", carrier)?;
/// ```
pub fn embed_text_bytes<B: BitSource + ?Sized>(
    image_bytes: &[u8],
    text: &str,
    delimiter: &str,
    format: CarrierFormat,
    padding: &mut B,
) -> Result<(Vec<u8>, EmbedReport)> {
    let mut carrier = decode_carrier(image_bytes)?;
    let report = embed(&mut carrier, text, delimiter, padding)?;
    let output_bytes = encode_carrier(&carrier, format)?;

    Ok((output_bytes, report))
}

/// Extract text from an image held in memory.
pub fn extract_text_bytes(image_bytes: &[u8], delimiter: &str) -> Result<Extraction> {
    let carrier = decode_carrier(image_bytes)?;
    extract(&carrier, delimiter)
}

/// Render the LSB plane of an image held in memory, returned as PNG bytes.
pub fn visualize_bytes(image_bytes: &[u8]) -> Result<Vec<u8>> {
    let carrier = decode_carrier(image_bytes)?;
    encode_bit_plane(&bit_plane(&carrier))
}

/// Embed text into the image at `input_path` and save the carrier to `output_path`.
///
/// The output format is checked before the input is read, so a lossy target
/// fails without doing any work, and the pixel layout is checked against it
/// before embedding. `input_path` is never modified unless it is also
/// `output_path`, and a failed save leaves `output_path` as it was.
///
/// # Errors
/// - Output extension names a lossy or unknown format
/// - Input can't be loaded
/// - Output format can't store the input's pixel layout (RGBA into PPM)
/// - Payload exceeds the carrier's capacity (nothing is written)
/// - Output can't be saved
pub fn embed_text_file<B: BitSource + ?Sized>(
    input_path: impl AsRef<Path>,
    text: &str,
    output_path: impl AsRef<Path>,
    delimiter: &str,
    padding: &mut B,
) -> Result<EmbedReport> {
    let (input_path, output_path) = (input_path.as_ref(), output_path.as_ref());
    let format = lossless_format_for_path(output_path)?;

    let mut carrier = load_carrier(input_path)?;
    check_layout(&carrier, format, output_path)?;
    let report = embed(&mut carrier, text, delimiter, padding)?;
    save_carrier(&carrier, output_path)?;

    info!(
        "Embedded {} bytes into {} ({} of {} bits used)",
        report.payload_bits / 8,
        output_path.display(),
        report.payload_bits,
        report.capacity_bits
    );

    Ok(report)
}

/// Extract text from the image at `input_path`.
pub fn extract_text_file(input_path: impl AsRef<Path>, delimiter: &str) -> Result<Extraction> {
    let input_path = input_path.as_ref();
    let carrier = load_carrier(input_path)?;
    let extraction = extract(&carrier, delimiter)?;

    match &extraction {
        Extraction::Found(text) => info!(
            "Extracted {} characters from {}",
            text.chars().count(),
            input_path.display()
        ),
        Extraction::NotFound => warn!("No hidden text found in {}", input_path.display()),
    }

    Ok(extraction)
}

/// Render the LSB plane of the image at `input_path` into `output_path`.
pub fn visualize_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let carrier = load_carrier(input_path)?;
    save_bit_plane(&bit_plane(&carrier), output_path)
}

/// Capacity report for the image at `input_path`: `(capacity_bits, needed_bits)`
/// where `needed_bits` is what `text` plus `delimiter` would occupy.
pub fn check_fit(
    input_path: impl AsRef<Path>,
    text: &str,
    delimiter: &str,
) -> Result<(usize, usize)> {
    if delimiter.is_empty() {
        return Err(StegoError::EmptyDelimiter);
    }

    let carrier = load_carrier(input_path)?;
    Ok((capacity(&carrier), payload_bits(text, delimiter)))
}
