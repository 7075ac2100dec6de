//! # Carrier Abstraction
//!
//! The codec never touches an image type directly. It only needs the grid
//! dimensions and read/write access to the designated channel of each pixel,
//! which is what [`Carrier`] exposes.

use image::{RgbImage, RgbaImage};

/// Index of the blue channel in RGB and RGBA pixels. All hidden bits live here.
pub const BLUE_CHANNEL: usize = 2;

/// Pixel-addressable image exposing only the designated (blue) channel.
pub trait Carrier {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Value of the designated channel at `(x, y)`.
    fn channel_value(&self, x: u32, y: u32) -> u8;

    /// Overwrite the designated channel at `(x, y)`. Other channels are left alone.
    fn set_channel_value(&mut self, x: u32, y: u32, value: u8);
}

/// Lowest bit of a channel value.
#[inline]
pub fn lsb(value: u8) -> u8 {
    value & 1
}

/// `value` with its lowest bit replaced by `bit`; bits 1..=7 are preserved.
#[inline]
pub fn with_lsb(value: u8, bit: u8) -> u8 {
    (value & 0xFE) | (bit & 1)
}

impl Carrier for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn channel_value(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y)[BLUE_CHANNEL]
    }

    fn set_channel_value(&mut self, x: u32, y: u32, value: u8) {
        self.get_pixel_mut(x, y)[BLUE_CHANNEL] = value;
    }
}

impl Carrier for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn channel_value(&self, x: u32, y: u32) -> u8 {
        self.get_pixel(x, y)[BLUE_CHANNEL]
    }

    fn set_channel_value(&mut self, x: u32, y: u32, value: u8) {
        self.get_pixel_mut(x, y)[BLUE_CHANNEL] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    #[test]
    fn test_with_lsb_keeps_upper_bits() {
        assert_eq!(with_lsb(0b1010_1010, 1), 0b1010_1011);
        assert_eq!(with_lsb(0b1111_1111, 0), 0b1111_1110);
        assert_eq!(with_lsb(0, 1), 1);
        assert_eq!(with_lsb(0x80, 3), 0x81);
    }

    #[test]
    fn test_rgb_only_blue_changes() {
        let mut img = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        img.set_channel_value(1, 0, 31);

        assert_eq!(img.get_pixel(1, 0), &Rgb([10, 20, 31]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([10, 20, 30]));
        assert_eq!(img.channel_value(1, 0), 31);
    }

    #[test]
    fn test_rgba_alpha_untouched() {
        let mut img = RgbaImage::from_pixel(3, 1, Rgba([1, 2, 3, 128]));
        img.set_channel_value(2, 0, 0);

        assert_eq!(img.get_pixel(2, 0), &Rgba([1, 2, 0, 128]));
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 1);
    }
}
