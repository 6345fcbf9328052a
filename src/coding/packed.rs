use crate::conversion::{BitDepth, Codec, DestImage, SourceImage};

/// A codec storing each tile as a packed-pixel image: the bits of each
/// pixel are stored contiguously, most significant first, so that at
/// depth 8 every byte is one pixel.
///
/// Since a row of 8 pixels always takes a whole number of bytes, rows
/// never share a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packed {
    pub bit_depth: BitDepth,
}

impl Packed {
    pub fn new(bit_depth: BitDepth) -> Packed {
        Packed { bit_depth }
    }
}

impl Codec for Packed {
    fn encode<S>(&self, src: &S, x: i32, y: i32, dst: &mut [u8])
    where
        S: SourceImage + ?Sized,
    {
        let dst = &mut dst[..self.size()];
        let (bpp, mask) = (self.bit_depth.planes() as u32, self.bit_depth.color_mask());

        // Holds less than 8 pending bits between pixels.
        let mut data: u16 = 0;
        let mut bits: u32 = 0;
        let mut di = 0;
        for iy in 0..8 {
            let py = y.wrapping_add(iy as i32);
            for ix in 0..8 {
                let color = mask & src.color_index_at(x.wrapping_add(ix), py);
                data = (data << bpp) | u16::from(color);
                bits += bpp;
                if bits >= 8 {
                    bits -= 8;
                    dst[di] = (data >> bits) as u8;
                    di += 1;
                    data &= (1 << bits) - 1;
                }
            }
        }
    }

    fn decode<D>(&self, src: &[u8], dst: &mut D, x: i32, y: i32)
    where
        D: DestImage + ?Sized,
    {
        let src = &src[..self.size()];
        let bpp = self.bit_depth.planes() as u32;

        let mut data: u16 = 0;
        let mut bits: u32 = 0;
        let mut si = 0;
        for iy in 0..8 {
            let py = y.wrapping_add(iy as i32);
            for ix in 0..8 {
                if bits < bpp {
                    // Carry in the next byte for the bits still missing.
                    data = (data << 8) | u16::from(src[si]);
                    si += 1;
                    bits += 8;
                }
                bits -= bpp;
                let color = (data >> bits) as u8;
                data &= (1 << bits) - 1;

                dst.set_color_index(x.wrapping_add(ix), py, color);
            }
        }
    }

    fn size(&self) -> usize {
        self.bit_depth.bytes_per_tile()
    }
}
