use crate::conversion::{BitDepth, Codec, DestImage, SourceImage, BYTES_PER_PLANE};

/// A codec storing each tile as a planar image, with the planes stored in
/// pairs (as if it was a sequence of 2bpp tiles), and each pair stored in
/// a row-planar manner.
///
/// Thus: r0p0, r0p1, r1p0, r1p1, ..., r7p1, r0p2, r0p3, r1p2, ..., r7pN.
///
/// Only even bit depths really fit this layout. Odd depths are rounded up
/// to the next even depth, with the extra plane always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRowPairPlanar {
    pub bit_depth: BitDepth,
}

impl TileRowPairPlanar {
    pub fn new(bit_depth: BitDepth) -> TileRowPairPlanar {
        TileRowPairPlanar { bit_depth }
    }
}

impl Codec for TileRowPairPlanar {
    fn encode<S>(&self, src: &S, x: i32, y: i32, dst: &mut [u8])
    where
        S: SourceImage + ?Sized,
    {
        let dst = &mut dst[..self.size()];
        let planes = self.bit_depth.planes();
        let mask = self.bit_depth.color_mask();
        for iy in 0..8 {
            let py = y.wrapping_add(iy as i32);
            for ix in 0..8 {
                let mut color = mask & src.color_index_at(x.wrapping_add(ix), py);
                for p in (0..planes).step_by(2) {
                    let i = iy * 2 + p * BYTES_PER_PLANE;
                    dst[i] = (dst[i] << 1) | (color & 1);
                    dst[i + 1] = (dst[i + 1] << 1) | ((color >> 1) & 1);
                    color >>= 2;
                }
            }
        }
    }

    fn decode<D>(&self, src: &[u8], dst: &mut D, x: i32, y: i32)
    where
        D: DestImage + ?Sized,
    {
        let src = &src[..self.size()];
        let planes = self.bit_depth.planes();
        let mask = self.bit_depth.color_mask();
        for iy in 0..8 {
            let mut row = [0u8; 8];
            for p in (0..planes).step_by(2) {
                let i = iy * 2 + p * BYTES_PER_PLANE;
                let (low, high) = (src[i], src[i + 1]);
                for (ix, pixel) in row.iter_mut().enumerate() {
                    let shift = 7 - ix;
                    *pixel |= ((low >> shift) & 1) << p;
                    *pixel |= ((high >> shift) & 1) << (p + 1);
                }
            }
            let py = y.wrapping_add(iy as i32);
            for (ix, &color) in row.iter().enumerate() {
                dst.set_color_index(x.wrapping_add(ix as i32), py, color & mask);
            }
        }
    }

    fn size(&self) -> usize {
        self.bit_depth.round_up_even().bytes_per_tile()
    }
}
