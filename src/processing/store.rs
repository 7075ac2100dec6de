//! # Image Store
//!
//! Loading and saving carriers through the `image` crate.
//!
//! Carriers are normalised to 8-bit RGB, or RGBA when the source has an
//! alpha channel, so the blue channel is always at [`BLUE_CHANNEL`]. Only
//! lossless formats may be written: any recompression would scramble the
//! hidden bits.

use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::codecs::pnm::{PnmSubtype, SampleEncoding};
use image::{DynamicImage, GrayImage, ImageFormat, ImageOutputFormat, RgbImage, RgbaImage};
use log::debug;
use serde::{Deserialize, Serialize};

use super::carrier::{Carrier, BLUE_CHANNEL};
use crate::error::{Result, StegoError};

/// An 8-bit image ready to carry hidden text.
#[derive(Debug, Clone, PartialEq)]
pub enum CarrierImage {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl CarrierImage {
    pub fn has_alpha(&self) -> bool {
        matches!(self, CarrierImage::Rgba(_))
    }
}

impl From<DynamicImage> for CarrierImage {
    fn from(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageRgb8(img) => CarrierImage::Rgb(img),
            DynamicImage::ImageRgba8(img) => CarrierImage::Rgba(img),
            other => {
                debug!("Converting {:?} image to 8-bit carrier", other.color());
                if other.color().has_alpha() {
                    CarrierImage::Rgba(other.to_rgba8())
                } else {
                    CarrierImage::Rgb(other.to_rgb8())
                }
            }
        }
    }
}

impl From<RgbImage> for CarrierImage {
    fn from(img: RgbImage) -> Self {
        CarrierImage::Rgb(img)
    }
}

impl From<RgbaImage> for CarrierImage {
    fn from(img: RgbaImage) -> Self {
        CarrierImage::Rgba(img)
    }
}

impl Carrier for CarrierImage {
    fn width(&self) -> u32 {
        match self {
            CarrierImage::Rgb(img) => img.width(),
            CarrierImage::Rgba(img) => img.width(),
        }
    }

    fn height(&self) -> u32 {
        match self {
            CarrierImage::Rgb(img) => img.height(),
            CarrierImage::Rgba(img) => img.height(),
        }
    }

    fn channel_value(&self, x: u32, y: u32) -> u8 {
        match self {
            CarrierImage::Rgb(img) => img.get_pixel(x, y)[BLUE_CHANNEL],
            CarrierImage::Rgba(img) => img.get_pixel(x, y)[BLUE_CHANNEL],
        }
    }

    fn set_channel_value(&mut self, x: u32, y: u32, value: u8) {
        match self {
            CarrierImage::Rgb(img) => img.get_pixel_mut(x, y)[BLUE_CHANNEL] = value,
            CarrierImage::Rgba(img) => img.get_pixel_mut(x, y)[BLUE_CHANNEL] = value,
        }
    }
}

/// Lossless formats carriers are encoded to in memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarrierFormat {
    #[default]
    Bmp,
    Png,
}

impl CarrierFormat {
    pub fn image_format(self) -> ImageFormat {
        match self {
            CarrierFormat::Bmp => ImageFormat::Bmp,
            CarrierFormat::Png => ImageFormat::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            CarrierFormat::Bmp => "bmp",
            CarrierFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            CarrierFormat::Bmp => "image/bmp",
            CarrierFormat::Png => "image/png",
        }
    }
}

impl FromStr for CarrierFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bmp" => Ok(CarrierFormat::Bmp),
            "png" => Ok(CarrierFormat::Png),
            other => Err(format!("unknown carrier format '{other}' (expected bmp or png)")),
        }
    }
}

impl fmt::Display for CarrierFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Format implied by the extension of `path`, if it preserves pixels exactly.
///
/// # Errors
/// - [`StegoError::LossyFormat`] for JPEG, WebP, AVIF and GIF (palette quantisation)
/// - [`StegoError::UnsupportedFormat`] for unknown extensions and formats
///   whose encoder takes no 8-bit layout (Farbfeld)
pub fn lossless_format_for_path(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path).map_err(|_| StegoError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    match format {
        ImageFormat::Bmp
        | ImageFormat::Png
        | ImageFormat::Tiff
        | ImageFormat::Tga
        | ImageFormat::Pnm => Ok(format),
        ImageFormat::Jpeg | ImageFormat::WebP | ImageFormat::Avif | ImageFormat::Gif => {
            Err(StegoError::LossyFormat {
                path: path.to_path_buf(),
                format,
            })
        }
        _ => Err(StegoError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a carrier from disk.
pub fn load_carrier<P: AsRef<Path>>(path: P) -> Result<CarrierImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| StegoError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(img.into())
}

/// Decode a carrier from encoded image bytes (format sniffed from the content).
pub fn decode_carrier(bytes: &[u8]) -> Result<CarrierImage> {
    let img = image::load_from_memory(bytes).map_err(StegoError::ImageDecode)?;
    Ok(img.into())
}

/// Check that `format` can store the pixel layout of `carrier`.
///
/// PPM has no alpha channel, so RGBA carriers are refused.
pub fn check_layout(carrier: &CarrierImage, format: ImageFormat, path: &Path) -> Result<()> {
    if format == ImageFormat::Pnm && carrier.has_alpha() {
        return Err(StegoError::UnsupportedLayout {
            path: path.to_path_buf(),
            format,
        });
    }
    Ok(())
}

fn output_format(format: ImageFormat) -> ImageOutputFormat {
    match format {
        ImageFormat::Pnm => ImageOutputFormat::Pnm(PnmSubtype::Pixmap(SampleEncoding::Binary)),
        other => other.into(),
    }
}

/// Save a carrier to disk in the lossless format named by the extension.
///
/// The image is encoded in memory first; the file at `path` is only
/// written once encoding has succeeded.
pub fn save_carrier<P: AsRef<Path>>(carrier: &CarrierImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = lossless_format_for_path(path)?;
    check_layout(carrier, format, path)?;

    let mut output_bytes = Vec::new();
    let mut cursor = Cursor::new(&mut output_bytes);

    let written = match carrier {
        CarrierImage::Rgb(img) => img.write_to(&mut cursor, output_format(format)),
        CarrierImage::Rgba(img) => img.write_to(&mut cursor, output_format(format)),
    };
    written.map_err(|source| StegoError::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, output_bytes)?;
    Ok(())
}

/// Encode a carrier into memory.
pub fn encode_carrier(carrier: &CarrierImage, format: CarrierFormat) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    let mut cursor = Cursor::new(&mut output_bytes);

    let written = match carrier {
        CarrierImage::Rgb(img) => img.write_to(&mut cursor, format.image_format()),
        CarrierImage::Rgba(img) => img.write_to(&mut cursor, format.image_format()),
    };
    written.map_err(StegoError::ImageEncode)?;

    Ok(output_bytes)
}

/// Save a bit-plane rendering. The plane is diagnostic output, any writable format is accepted.
pub fn save_bit_plane<P: AsRef<Path>>(plane: &GrayImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(|_| StegoError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let mut output_bytes = Vec::new();
    plane
        .write_to(&mut Cursor::new(&mut output_bytes), format)
        .map_err(|source| StegoError::ImageSave {
            path: path.to_path_buf(),
            source,
        })?;

    fs::write(path, output_bytes)?;
    Ok(())
}

/// Encode a bit-plane rendering as PNG.
pub fn encode_bit_plane(plane: &GrayImage) -> Result<Vec<u8>> {
    let mut output_bytes = Vec::new();
    plane
        .write_to(&mut Cursor::new(&mut output_bytes), ImageFormat::Png)
        .map_err(StegoError::ImageEncode)?;
    Ok(output_bytes)
}
