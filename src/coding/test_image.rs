use crate::conversion::{BitDepth, Bounded, Bounds, Codec, DestImage, SourceImage};
use bitstream_io::{BigEndian, BitWrite, BitWriter};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::cell::RefCell;

/// The pixels of one tile, `tile[row][column]`.
pub type Tile = [[u8; 8]; 8];

/// Mock image used to test the codecs.
///
/// It covers 16x16 pixels from (-4, -4), holding every value 0-255 once,
/// so that any 8x8 tile inside it has distinct planes to get wrong.
#[derive(Clone, Debug, PartialEq)]
pub struct TestImage {
    pix: Vec<u8>,
}

impl TestImage {
    pub const BOUNDS: Bounds = Bounds {
        min_x: -4,
        min_y: -4,
        max_x: 12,
        max_y: 12,
    };

    /// Pixels counting up from 0 in raster order.
    pub fn sequential() -> TestImage {
        TestImage {
            pix: (0..=255).collect(),
        }
    }

    /// The same pixels in a fixed random order.
    pub fn shuffled() -> TestImage {
        let mut pix: Vec<u8> = (0..=255).collect();
        pix.shuffle(&mut StdRng::seed_from_u64(0));
        TestImage { pix }
    }

    /// Both variants, named for assertion messages.
    pub fn variants() -> Vec<(&'static str, TestImage)> {
        vec![("seq", TestImage::sequential()), ("rng", TestImage::shuffled())]
    }

    /// An image where every pixel differs from this one, to decode into.
    pub fn inverted(&self) -> TestImage {
        TestImage {
            pix: self.pix.iter().map(|v| !v).collect(),
        }
    }

    fn offset(x: i32, y: i32) -> Option<usize> {
        if TestImage::BOUNDS.contains(x, y) {
            Some(((y + 4) * 16 + (x + 4)) as usize)
        } else {
            None
        }
    }

    /// Reads the tile at `x`, `y`, with pixels outside the image as 0.
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        let mut tile = [[0; 8]; 8];
        for (iy, row) in tile.iter_mut().enumerate() {
            for (ix, pixel) in row.iter_mut().enumerate() {
                let (px, py) = (x.wrapping_add(ix as i32), y.wrapping_add(iy as i32));
                *pixel = self.color_index_at(px, py);
            }
        }
        tile
    }
}

impl SourceImage for TestImage {
    fn color_index_at(&self, x: i32, y: i32) -> u8 {
        TestImage::offset(x, y).map_or(0, |i| self.pix[i])
    }
}

impl DestImage for TestImage {
    fn set_color_index(&mut self, x: i32, y: i32, index: u8) {
        let i = TestImage::offset(x, y).expect("write outside of the test image");
        self.pix[i] = index;
    }
}

impl Bounded for TestImage {
    fn bounds(&self) -> Bounds {
        TestImage::BOUNDS
    }
}

/// Wraps a source image and logs every coordinate read from it.
pub struct RecordingSource<'a> {
    inner: &'a TestImage,
    pub reads: RefCell<Vec<(i32, i32)>>,
}

impl<'a> RecordingSource<'a> {
    pub fn new(inner: &'a TestImage) -> RecordingSource<'a> {
        RecordingSource {
            inner,
            reads: RefCell::new(Vec::new()),
        }
    }
}

impl SourceImage for RecordingSource<'_> {
    fn color_index_at(&self, x: i32, y: i32) -> u8 {
        self.reads.borrow_mut().push((x, y));
        self.inner.color_index_at(x, y)
    }
}

/// The row byte of one plane, with the leftmost pixel in the top bit.
pub fn plane_byte(tile: &Tile, row: usize, plane: usize) -> u8 {
    tile[row]
        .iter()
        .enumerate()
        .map(|(ix, &c)| ((c >> plane) & 1) << (7 - ix))
        .sum()
}

pub fn tile_planar_reference(tile: &Tile, depth: BitDepth) -> Vec<u8> {
    (0..depth.planes())
        .flat_map(|plane| (0..8).map(move |row| plane_byte(tile, row, plane)))
        .collect()
}

pub fn row_planar_reference(tile: &Tile, depth: BitDepth) -> Vec<u8> {
    (0..8)
        .flat_map(|row| (0..depth.planes()).map(move |plane| plane_byte(tile, row, plane)))
        .collect()
}

pub fn tile_row_pair_planar_reference(tile: &Tile, depth: BitDepth) -> Vec<u8> {
    let mask = depth.color_mask();
    let mut masked = *tile;
    masked.iter_mut().flatten().for_each(|c| *c &= mask);

    let planes = depth.round_up_even().planes();
    (0..planes)
        .step_by(2)
        .flat_map(|pair| {
            (0..8).flat_map(move |row| [pair, pair + 1].map(|plane| plane_byte(&masked, row, plane)))
        })
        .collect()
}

/// Packs the pixels with an independent MSB-first bit writer.
pub fn packed_reference(tile: &Tile, depth: BitDepth) -> Vec<u8> {
    let mut writer = BitWriter::endian(Vec::new(), BigEndian);
    for &color in tile.iter().flatten() {
        writer
            .write(depth.planes() as u32, color & depth.color_mask())
            .unwrap();
    }
    assert!(writer.byte_aligned());
    writer.into_writer()
}

/// Encodes every tile position overlapping the test images and compares
/// against `reference`, checking that nothing outside the tile is read
/// and that nothing past `size()` is written.
pub fn check_encode<C, F>(codec: &C, depth: BitDepth, reference: F)
where
    C: Codec,
    F: Fn(&Tile, BitDepth) -> Vec<u8>,
{
    const SENTINEL: u8 = 0xa5;
    let size = codec.size();

    for (name, image) in TestImage::variants() {
        let pristine = image.clone();
        for y in -4..4 {
            for x in -4..4 {
                let source = RecordingSource::new(&image);
                let mut got = vec![SENTINEL; size + 4];
                codec.encode(&source, x, y, &mut got);

                let want = reference(&image.tile(x, y), depth);
                assert_eq!(
                    &got[..size],
                    &want[..],
                    "{} depth {} at {},{}",
                    name,
                    depth,
                    x,
                    y
                );
                assert_eq!(&got[size..], &[SENTINEL; 4], "wrote past the tile");
                assert!(
                    source
                        .reads
                        .borrow()
                        .iter()
                        .all(|&(rx, ry)| rx >= x && rx < x + 8 && ry >= y && ry < y + 8),
                    "read outside the tile at {},{}",
                    x,
                    y
                );
                assert_eq!(image, pristine, "source image was corrupted");
            }
        }
    }
}

/// Decodes reference data into every tile position of an inverted test
/// image, checking the tile area and that nothing else changed.
pub fn check_decode<C, F>(codec: &C, depth: BitDepth, reference: F)
where
    C: Codec,
    F: Fn(&Tile, BitDepth) -> Vec<u8>,
{
    let mask = depth.color_mask();

    for (name, full) in TestImage::variants() {
        let base = full.inverted();
        for y in -4..4 {
            for x in -4..4 {
                // Trailing bytes must be ignored.
                let mut src = reference(&full.tile(x, y), depth);
                src.extend_from_slice(&[0xff; 3]);
                let pristine = src.clone();

                let mut got = base.clone();
                codec.decode(&src, &mut got, x, y);
                assert_eq!(src, pristine, "source data was corrupted");

                let b = TestImage::BOUNDS;
                for ty in b.min_y..b.max_y {
                    for tx in b.min_x..b.max_x {
                        let inside = tx >= x && tx < x + 8 && ty >= y && ty < y + 8;
                        let want = if inside {
                            full.color_index_at(tx, ty) & mask
                        } else {
                            base.color_index_at(tx, ty)
                        };
                        assert_eq!(
                            got.color_index_at(tx, ty),
                            want,
                            "{} depth {} tile {},{} pixel {},{}",
                            name,
                            depth,
                            x,
                            y,
                            tx,
                            ty
                        );
                    }
                }
            }
        }
    }
}
