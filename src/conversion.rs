pub use bit_depth::{BitDepth, BYTES_PER_PLANE};
pub use error::{ParseBitDepthError, ParseFormatError};
pub use format::{Format, TileCodec};
use log::{debug, trace};
use std::io::{self, Write};
pub use traits::{Bounded, Bounds, Codec, DestImage, SourceImage};

mod bit_depth;
mod error;
mod format;
mod traits;

/// Encodes all the tiles of `src` into `dst`, using `codec` for each tile.
///
/// Tiles are written in row-major order: left to right, then top to
/// bottom, starting from the top-left corner of the image bounds.
///
/// If the image size is not a multiple of the tile size, the covered area
/// is rounded up to the right and bottom. The codec then asks `src` for
/// pixels outside of its bounds, which it must answer with a default
/// index (usually 0).
///
/// The first error returned by `dst` is passed on as is, and no further
/// tiles are encoded. Tiles written before the error stay written.
pub fn encode<S, W, C>(src: &S, mut dst: W, codec: &C) -> io::Result<()>
where
    S: SourceImage + Bounded + ?Sized,
    W: Write,
    C: Codec,
{
    let bounds = src.bounds();
    let mut buf = vec![0; codec.size()];
    debug!(
        "Encoding {}x{} image as tiles of {} bytes",
        bounds.width(),
        bounds.height(),
        buf.len()
    );

    let mut tiles = 0;
    for (x, y) in bounds.tile_origins() {
        codec.encode(src, x, y, &mut buf);
        dst.write_all(&buf)?;
        tiles += 1;
    }
    trace!("Encoded {} tiles", tiles);
    Ok(())
}

/// Decodes the tiles in `src` into `dst`, using `codec` for each tile,
/// and returns the number of tiles decoded.
///
/// Tiles are placed in row-major order: left to right, then top to
/// bottom, starting from the top-left corner of the image bounds.
///
/// Decoding stops at the first incomplete tile in `src` or when the
/// image is full, whichever comes first. Leftover data is ignored, and
/// pixels not covered by a decoded tile keep their value. Tiles sticking
/// out of the image lose their pixels outside of it, unless `dst` keeps
/// them.
///
/// The color indexes written go up to `codec`'s bit depth, so the image
/// palette must have room for that many colors.
pub fn decode<D, C>(src: &[u8], dst: &mut D, codec: &C) -> usize
where
    D: DestImage + Bounded + ?Sized,
    C: Codec,
{
    let bounds = dst.bounds();
    let size = codec.size();
    debug!(
        "Decoding {} bytes as tiles of {} bytes into {}x{} image",
        src.len(),
        size,
        bounds.width(),
        bounds.height()
    );

    let mut tiles = 0;
    for ((x, y), chunk) in bounds.tile_origins().zip(src.chunks_exact(size)) {
        codec.decode(chunk, dst, x, y);
        tiles += 1;
    }

    let unused = src.len() - tiles * size;
    if unused > 0 {
        trace!("Decoded {} tiles, {} bytes left over", tiles, unused);
    } else {
        trace!("Decoded {} tiles", tiles);
    }
    tiles
}
