//! Conversion between indexed-color images and the 8x8 tile graphics
//! formats used by retro consoles.
//!
//! The library works on color indexes rather than colors. A [`Codec`]
//! encodes or decodes a single tile in one layout; the [`encode`] and
//! [`decode`] drivers apply a codec across a whole image.
//!
//! ```
//! use tileconv::{decode, encode, BitDepth, IndexedImage, RowPlanar, TilePlanar};
//!
//! let mut tile = IndexedImage::new(8, 8);
//! decode(b"12345678abcdefgh", &mut tile, &TilePlanar::new(BitDepth::Two));
//!
//! let mut out = Vec::new();
//! encode(&tile, &mut out, &RowPlanar::new(BitDepth::Two)).unwrap();
//! assert_eq!(out, b"1a2b3c4d5e6f7g8h");
//! ```
//!
//! The codecs often support more bit depths than any real console does,
//! so checking that a depth makes sense for a target system is up to the
//! caller.

pub mod coding;
pub mod container;
pub mod conversion;
pub mod indexed;

pub use coding::{Packed, RowPlanar, TilePlanar, TileRowPairPlanar};
pub use conversion::{
    decode, encode, BitDepth, Bounded, Bounds, Codec, DestImage, Format, SourceImage, TileCodec,
    BYTES_PER_PLANE,
};
pub use indexed::IndexedImage;
