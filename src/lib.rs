//! # lsb-stego
//!
//! Hides UTF-8 text in the least significant bit of the blue channel of a
//! raster image, recovers it, and renders the LSB plane for inspection.
//!
//! ## Example
//!
//! ```no_run
//! use lsb_stego::processing::{embed_text_file, extract_text_file, RandomBits};
//!
//! # fn main() -> lsb_stego::Result<()> {
//! let mut padding = RandomBits::from_entropy();
//! embed_text_file("cover.bmp", "meet at noon", "carrier.bmp", "END", &mut padding)?;
//! let text = extract_text_file("carrier.bmp", "END")?.into_text();
//! assert_eq!(text, "meet at noon");
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod error;
pub mod processing;

pub use error::{Result, StegoError};
pub use processing::{bit_plane, embed, extract, visualize, Carrier, EmbedReport, Extraction};
