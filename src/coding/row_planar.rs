use crate::conversion::{BitDepth, Codec, DestImage, SourceImage};

/// A codec storing each tile as a planar image, with the planes of each
/// row stored contiguously: all the data of the first row comes before
/// the data of the second, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPlanar {
    pub bit_depth: BitDepth,
}

impl RowPlanar {
    pub fn new(bit_depth: BitDepth) -> RowPlanar {
        RowPlanar { bit_depth }
    }
}

impl Codec for RowPlanar {
    fn encode<S>(&self, src: &S, x: i32, y: i32, dst: &mut [u8])
    where
        S: SourceImage + ?Sized,
    {
        let dst = &mut dst[..self.size()];
        let planes = self.bit_depth.planes();
        // Every byte gets shifted 8 times, so no clearing is needed.
        for iy in 0..8 {
            let py = y.wrapping_add(iy as i32);
            for ix in 0..8 {
                let mut color = src.color_index_at(x.wrapping_add(ix), py);
                for p in 0..planes {
                    let i = iy * planes + p;
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
        for (iy, plane_bytes) in src.chunks_exact(planes).enumerate() {
            let mut row = [0u8; 8];
            for (p, &byte) in plane_bytes.iter().enumerate() {
                for (ix, pixel) in row.iter_mut().enumerate() {
                    *pixel |= ((byte >> (7 - ix)) & 1) << p;
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
