//! # Bit-Plane Visualizer
//!
//! Renders the blue-channel LSB of every pixel as black (0) or white (255).
//! A cover image usually shows structure here; a carrier filled with payload
//! and random padding shows noise.

use image::{GrayImage, Luma};

use super::carrier::{lsb, Carrier};
use super::traversal::RasterOrder;

/// Grayscale image of the LSB plane, same dimensions as `carrier`.
pub fn bit_plane<C: Carrier + ?Sized>(carrier: &C) -> GrayImage {
    let mut plane = GrayImage::new(carrier.width(), carrier.height());

    for (x, y) in RasterOrder::of(carrier).positions() {
        let intensity = lsb(carrier.channel_value(x, y)) * 255;
        plane.put_pixel(x, y, Luma([intensity]));
    }

    plane
}

/// Optional-input form of [`bit_plane`]: no image in, no image out.
pub fn visualize<C: Carrier + ?Sized>(carrier: Option<&C>) -> Option<GrayImage> {
    carrier.map(|c| bit_plane(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_shape_and_values() {
        let img = RgbImage::from_fn(13, 7, |x, y| Rgb([0, 0, (x * 3 + y) as u8]));
        let plane = bit_plane(&img);

        assert_eq!(plane.dimensions(), (13, 7));
        for (x, y, pixel) in plane.enumerate_pixels() {
            let expected = if (x * 3 + y) % 2 == 1 { 255 } else { 0 };
            assert_eq!(pixel[0], expected);
        }
    }

    #[test]
    fn test_white_image_is_all_white() {
        let img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        let plane = visualize(Some(&img)).unwrap();

        assert_eq!(plane.dimensions(), (100, 100));
        assert!(plane.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_absent_input() {
        assert!(visualize::<RgbImage>(None).is_none());
    }
}
