use crate::conversion::{BitDepth, Codec, DestImage, SourceImage, BYTES_PER_PLANE};

/// A codec storing each tile as a planar image, with each plane of the
/// tile stored contiguously.
///
/// A tile at depth N is thus extended to N+1 bits by appending a zeroed
/// plane, and truncated by dropping the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlanar {
    pub bit_depth: BitDepth,
}

impl TilePlanar {
    pub fn new(bit_depth: BitDepth) -> TilePlanar {
        TilePlanar { bit_depth }
    }
}

impl Codec for TilePlanar {
    fn encode<S>(&self, src: &S, x: i32, y: i32, dst: &mut [u8])
    where
        S: SourceImage + ?Sized,
    {
        let dst = &mut dst[..self.size()];
        dst.fill(0);

        let planes = self.bit_depth.planes();
        for iy in 0..8 {
            let py = y.wrapping_add(iy as i32);
            for ix in 0..8 {
                let mut color = src.color_index_at(x.wrapping_add(ix), py);
                for p in 0..planes {
                    let i = iy + p * BYTES_PER_PLANE;
                    dst[i] = (dst[i] << 1) | (color & 1);
                    color >>= 1;
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
        for iy in 0..8 {
            let mut row = [0u8; 8];
            for p in 0..planes {
                let mut d = src[iy + p * BYTES_PER_PLANE];
                for pixel in row.iter_mut().rev() {
                    *pixel |= (d & 1) << p;
                    d >>= 1;
                }
            }
            let py = y.wrapping_add(iy as i32);
            for (ix, &color) in row.iter().enumerate() {
                dst.set_color_index(x.wrapping_add(ix as i32), py, color);
            }
        }
    }

    fn size(&self) -> usize {
        self.bit_depth.bytes_per_tile()
    }
}
