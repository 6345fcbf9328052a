use super::error::ParseBitDepthError;
use std::fmt;
use std::str::FromStr;

/// The number of bytes taken up by each bit plane of a single tile.
///
/// A tile is 8x8 pixels and a plane stores 1 bit per pixel, so each row
/// of a plane fits in one byte. A lot of the codec arithmetic depends on
/// this being 8.
pub const BYTES_PER_PLANE: usize = 8;

/// The number of bits used for the color index of each pixel of a tile.
///
/// E.g. a 4-color palette needs 2 bits per pixel, so `BitDepth::Two`.
///
/// The derived quantities assume tiles of 8x8 pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BitDepth {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
}

impl BitDepth {
    /// Every bit depth, from 1 to 8.
    pub const ALL: [BitDepth; 8] = [
        BitDepth::One,
        BitDepth::Two,
        BitDepth::Three,
        BitDepth::Four,
        BitDepth::Five,
        BitDepth::Six,
        BitDepth::Seven,
        BitDepth::Eight,
    ];

    /// Returns the number of bit planes needed for this bit depth.
    pub fn planes(self) -> usize {
        self as usize
    }

    /// Returns the number of colors available at this bit depth.
    pub fn colors(self) -> usize {
        1 << self as usize
    }

    /// Returns a mask with a 1 for each bit of a color index that is
    /// actually used at this bit depth.
    pub fn color_mask(self) -> u8 {
        ((1u16 << self as u16) - 1) as u8
    }

    /// Returns the number of bytes needed to store one tile with one
    /// plane per bit.
    pub fn bytes_per_tile(self) -> usize {
        self.planes() * BYTES_PER_PLANE
    }

    /// Rounds an odd bit depth up to the next even one.
    pub(crate) fn round_up_even(self) -> BitDepth {
        let even = (self as u8 + 1) & !1;
        // 8 is the largest depth and is even, so this never leaves 1..=8.
        BitDepth::ALL[usize::from(even) - 1]
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = ParseBitDepthError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=8 => Ok(BitDepth::ALL[usize::from(value) - 1]),
            _ => Err(ParseBitDepthError),
        }
    }
}

impl FromStr for BitDepth {
    type Err = ParseBitDepthError;

    /// Accepts exactly one ASCII digit from `1` to `8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.as_bytes() {
            [digit @ b'1'..=b'8'] => BitDepth::try_from(digit - b'0'),
            _ => Err(ParseBitDepthError),
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
