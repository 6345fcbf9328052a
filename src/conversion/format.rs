use super::bit_depth::BitDepth;
use super::error::ParseFormatError;
use super::traits::{Codec, DestImage, SourceImage};
use crate::coding::{Packed, RowPlanar, TilePlanar, TileRowPairPlanar};
use std::fmt;
use std::str::FromStr;

/// The tile layouts supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Packed-pixel, see [`Packed`].
    Packed,
    /// Planar per tile, see [`TilePlanar`].
    TilePlanar,
    /// Planar per row, see [`RowPlanar`].
    RowPlanar,
    /// Planar pairs per row, pairs per tile, see [`TileRowPairPlanar`].
    TileRowPairPlanar,
}

impl Format {
    pub const ALL: [Format; 4] = [
        Format::Packed,
        Format::TilePlanar,
        Format::RowPlanar,
        Format::TileRowPairPlanar,
    ];

    /// The full name, as accepted by `parse`.
    pub fn name(self) -> &'static str {
        match self {
            Format::Packed => "packed",
            Format::TilePlanar => "tileplanar",
            Format::RowPlanar => "rowplanar",
            Format::TileRowPairPlanar => "tilerowpairplanar",
        }
    }

    /// The short alias, as accepted by `parse`.
    pub fn alias(self) -> &'static str {
        match self {
            Format::Packed => "p",
            Format::TilePlanar => "tp",
            Format::RowPlanar => "rp",
            Format::TileRowPairPlanar => "trpp",
        }
    }

    /// Builds the codec for this layout at the given depth.
    pub fn codec(self, bit_depth: BitDepth) -> TileCodec {
        match self {
            Format::Packed => TileCodec::Packed(Packed::new(bit_depth)),
            Format::TilePlanar => TileCodec::TilePlanar(TilePlanar::new(bit_depth)),
            Format::RowPlanar => TileCodec::RowPlanar(RowPlanar::new(bit_depth)),
            Format::TileRowPairPlanar => {
                TileCodec::TileRowPairPlanar(TileRowPairPlanar::new(bit_depth))
            }
        }
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|f| s == f.name() || s == f.alias())
            .ok_or_else(|| ParseFormatError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the codecs in this crate, chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileCodec {
    Packed(Packed),
    TilePlanar(TilePlanar),
    RowPlanar(RowPlanar),
    TileRowPairPlanar(TileRowPairPlanar),
}

impl TileCodec {
    pub fn format(&self) -> Format {
        match self {
            TileCodec::Packed(_) => Format::Packed,
            TileCodec::TilePlanar(_) => Format::TilePlanar,
            TileCodec::RowPlanar(_) => Format::RowPlanar,
            TileCodec::TileRowPairPlanar(_) => Format::TileRowPairPlanar,
        }
    }

    pub fn bit_depth(&self) -> BitDepth {
        match self {
            TileCodec::Packed(c) => c.bit_depth,
            TileCodec::TilePlanar(c) => c.bit_depth,
            TileCodec::RowPlanar(c) => c.bit_depth,
            TileCodec::TileRowPairPlanar(c) => c.bit_depth,
        }
    }
}

impl Codec for TileCodec {
    fn encode<S>(&self, src: &S, x: i32, y: i32, dst: &mut [u8])
    where
        S: SourceImage + ?Sized,
    {
        match self {
            TileCodec::Packed(c) => c.encode(src, x, y, dst),
            TileCodec::TilePlanar(c) => c.encode(src, x, y, dst),
            TileCodec::RowPlanar(c) => c.encode(src, x, y, dst),
            TileCodec::TileRowPairPlanar(c) => c.encode(src, x, y, dst),
        }
    }

    fn decode<D>(&self, src: &[u8], dst: &mut D, x: i32, y: i32)
    where
        D: DestImage + ?Sized,
    {
        match self {
            TileCodec::Packed(c) => c.decode(src, dst, x, y),
            TileCodec::TilePlanar(c) => c.decode(src, dst, x, y),
            TileCodec::RowPlanar(c) => c.decode(src, dst, x, y),
            TileCodec::TileRowPairPlanar(c) => c.decode(src, dst, x, y),
        }
    }

    fn size(&self) -> usize {
        match self {
            TileCodec::Packed(c) => c.size(),
            TileCodec::TilePlanar(c) => c.size(),
            TileCodec::RowPlanar(c) => c.size(),
            TileCodec::TileRowPairPlanar(c) => c.size(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Format, TileCodec};
    use crate::coding::{Packed, TileRowPairPlanar};
    use crate::conversion::{BitDepth, Codec, ParseFormatError};

    #[test]
    fn test_parse_names_and_aliases() {
        let cases = [
            ("p", Format::Packed),
            ("packed", Format::Packed),
            ("tp", Format::TilePlanar),
            ("tileplanar", Format::TilePlanar),
            ("rp", Format::RowPlanar),
            ("rowplanar", Format::RowPlanar),
            ("trpp", Format::TileRowPairPlanar),
            ("tilerowpairplanar", Format::TileRowPairPlanar),
        ];
        for (text, format) in cases {
            assert_eq!(text.parse::<Format>(), Ok(format));
        }
    }

    #[test]
    fn test_parse_unknown() {
        for text in ["", "P", "planar", " p", "trp"] {
            assert_eq!(
                text.parse::<Format>(),
                Err(ParseFormatError {
                    input: text.to_string()
                })
            );
        }
        let err = "chr".parse::<Format>().unwrap_err();
        assert_eq!(err.to_string(), "unknown tile format \"chr\"");
    }

    #[test]
    fn test_display_round_trip() {
        for format in Format::ALL {
            assert_eq!(format.to_string().parse::<Format>(), Ok(format));
        }
    }

    #[test]
    fn test_codec_dispatch() {
        let codec = Format::Packed.codec(BitDepth::Three);
        assert_eq!(codec, TileCodec::Packed(Packed::new(BitDepth::Three)));
        assert_eq!(codec.size(), 24);
        assert_eq!(codec.format(), Format::Packed);
        assert_eq!(codec.bit_depth(), BitDepth::Three);

        let codec = Format::TileRowPairPlanar.codec(BitDepth::Three);
        assert_eq!(codec.size(), TileRowPairPlanar::new(BitDepth::Three).size());
        assert_eq!(codec.size(), 32);

        for format in Format::ALL {
            for depth in BitDepth::ALL {
                assert_eq!(format.codec(depth).format(), format);
                assert_eq!(format.codec(depth).bit_depth(), depth);
            }
        }
    }
}
