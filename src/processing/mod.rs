//! # Image Processing and Steganography
//!
//! LSB text steganography over the blue channel.
//!
//! ## Modules
//!
//! - [`carrier`]: the pixel-access contract the codec works against
//! - [`traversal`]: the shared row-major pixel order
//! - [`bits`]: injectable padding bit sources
//! - [`encoder`] / [`decoder`]: embed and extract
//! - [`visualize`]: LSB bit-plane rendering
//! - [`store`]: loading and saving carriers
//! - [`steganography`]: file- and byte-level operations

pub mod bits;
pub mod carrier;
pub mod decoder;
pub mod encoder;
pub mod steganography;
pub mod store;
pub mod traversal;
pub mod visualize;

// Re-export main functions for convenience
pub use bits::{BitSource, ConstantBits, RandomBits};
pub use carrier::{Carrier, BLUE_CHANNEL};
pub use decoder::{extract, Extraction};
pub use encoder::{capacity, embed, max_payload_bytes, EmbedReport, DEFAULT_DELIMITER};
pub use steganography::{
    check_fit, embed_text_bytes, embed_text_file, extract_text_bytes, extract_text_file,
    visualize_bytes, visualize_file,
};
pub use store::{CarrierFormat, CarrierImage};
pub use traversal::RasterOrder;
pub use visualize::{bit_plane, visualize};
