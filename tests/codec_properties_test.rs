use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lsb_stego::processing::carrier::lsb;
use lsb_stego::processing::{
    bit_plane, capacity, embed, extract, visualize, BitSource, Carrier, ConstantBits, Extraction,
    RandomBits, RasterOrder,
};
use lsb_stego::StegoError;

/// Cover with varied pixel values so LSB writes are visible against noise.
fn noisy_cover(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]))
}

/// Replays a fixed sequence of bits, then zeros.
struct Scripted {
    bits: Vec<u8>,
    next: usize,
}

impl BitSource for Scripted {
    fn next_bit(&mut self) -> u8 {
        let bit = self.bits.get(self.next).copied().unwrap_or(0);
        self.next += 1;
        bit
    }
}

#[test]
fn test_roundtrip_random_texts() {
    let mut rng = StdRng::seed_from_u64(1234);
    let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz ÄÖÜßжщ中文😀\n\t,.!?".chars().collect();

    for round in 0..50 {
        let len = rng.gen_range(0..40);
        let text: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        let mut cover = noisy_cover(rng.gen_range(40..80), rng.gen_range(40..80), round);

        embed(&mut cover, &text, "END", &mut RandomBits::seeded(round)).unwrap();

        assert_eq!(
            extract(&cover, "END").unwrap(),
            Extraction::Found(text.clone()),
            "round {round}"
        );
    }
}

#[test]
fn test_capacity_boundary_for_many_shapes() {
    let delimiter = "END";

    for width in 1..=12u32 {
        for height in 1..=12u32 {
            let bytes_available = (width * height / 8) as usize;
            if bytes_available < delimiter.len() {
                let mut cover = RgbImage::new(width, height);
                let before = cover.clone();
                assert!(embed(&mut cover, "", delimiter, &mut ConstantBits::new(1)).is_err());
                assert_eq!(cover, before);
                continue;
            }

            let fitting = "x".repeat(bytes_available - delimiter.len());
            let mut cover = noisy_cover(width, height, (width * 100 + height) as u64);
            embed(&mut cover, &fitting, delimiter, &mut ConstantBits::new(1))
                .unwrap_or_else(|e| panic!("{width}x{height}: {e}"));
            assert_eq!(extract(&cover, delimiter).unwrap().into_text(), fitting);

            let overflowing = format!("{fitting}x");
            let mut cover = noisy_cover(width, height, 0);
            let before = cover.clone();
            let err = embed(&mut cover, &overflowing, delimiter, &mut ConstantBits::new(1))
                .unwrap_err();

            match err {
                StegoError::CapacityExceeded { needed, available } => {
                    assert_eq!(available, (width * height) as usize);
                    assert_eq!(needed, (bytes_available + 1) * 8);
                }
                other => panic!("unexpected error {other}"),
            }
            assert_eq!(cover, before, "{width}x{height} modified on failure");
        }
    }
}

#[test]
fn test_exact_bit_capacity() {
    // 12x2 = 24 bits = exactly "END"
    let mut cover = noisy_cover(12, 2, 3);
    let report = embed(&mut cover, "", "END", &mut ConstantBits::new(0)).unwrap();

    assert_eq!(report.payload_bits, capacity(&cover));
    assert_eq!(report.padding_bits, 0);
    assert_eq!(extract(&cover, "END").unwrap(), Extraction::Found(String::new()));
}

#[test]
fn test_padding_bits_come_from_source_in_order() {
    let mut cover = noisy_cover(10, 3, 9);
    let padding: Vec<u8> = (0..30).map(|i| ((i * 7) % 3 == 0) as u8).collect();
    let mut source = Scripted {
        bits: padding.clone(),
        next: 0,
    };

    // "Z" alone: 8 payload bits, 22 padding bits
    embed(&mut cover, "", "Z", &mut source).unwrap();

    let order = RasterOrder::of(&cover);
    let written: Vec<u8> = order
        .positions()
        .map(|(x, y)| lsb(cover.channel_value(x, y)))
        .collect();

    assert_eq!(&written[..8], &[0, 1, 0, 1, 1, 0, 1, 0]);
    assert_eq!(&written[8..], &padding[..22]);
    assert_eq!(source.next, 22);
}

#[test]
fn test_seeded_embeds_are_identical() {
    let mut a = noisy_cover(30, 30, 4);
    let mut b = a.clone();

    embed(&mut a, "same", "END", &mut RandomBits::seeded(77)).unwrap();
    embed(&mut b, "same", "END", &mut RandomBits::seeded(77)).unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_delimiter_inside_text_truncates() {
    let mut cover = noisy_cover(50, 50, 6);
    embed(&mut cover, "before END after", "END", &mut RandomBits::seeded(1)).unwrap();

    assert_eq!(extract(&cover, "END").unwrap().into_text(), "before ");
}

#[test]
fn test_visualization_matches_lsbs() {
    let mut cover = noisy_cover(25, 17, 12);
    embed(&mut cover, "plane", "END", &mut RandomBits::seeded(12)).unwrap();

    let plane = visualize(Some(&cover)).unwrap();
    assert_eq!(plane.dimensions(), (25, 17));

    for (x, y, pixel) in plane.enumerate_pixels() {
        let expected = if cover.get_pixel(x, y)[2] & 1 == 1 { 255 } else { 0 };
        assert_eq!(pixel[0], expected);
    }
    assert_eq!(bit_plane(&cover), plane);
    assert!(visualize::<RgbImage>(None).is_none());
}
