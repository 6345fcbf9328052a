use crate::conversion::{Bounded, Bounds, DestImage, SourceImage};
use image::GrayImage;

/// An in-memory indexed-color image: one color index per pixel, stored
/// in raster order.
///
/// The bounds may start anywhere, including negative coordinates. Reads
/// outside the bounds return 0 and writes outside them are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    bounds: Bounds,
    pix: Vec<u8>,
}

impl IndexedImage {
    /// Creates an image at the origin, with every pixel set to 0.
    pub fn new(width: u32, height: u32) -> IndexedImage {
        IndexedImage::with_bounds(Bounds::from_size(width, height))
    }

    /// Creates an image covering `bounds`, with every pixel set to 0.
    pub fn with_bounds(bounds: Bounds) -> IndexedImage {
        let len = bounds.width() as usize * bounds.height() as usize;
        IndexedImage {
            bounds,
            pix: vec![0; len],
        }
    }

    /// Wraps raster-order pixels, or returns `None` if their count does
    /// not match the size.
    pub fn from_raw(width: u32, height: u32, pix: Vec<u8>) -> Option<IndexedImage> {
        let bounds = Bounds::from_size(width, height);
        if pix.len() != width as usize * height as usize {
            return None;
        }
        Some(IndexedImage { bounds, pix })
    }

    pub fn width(&self) -> u32 {
        self.bounds.width()
    }

    pub fn height(&self) -> u32 {
        self.bounds.height()
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pix
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.pix
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let (dx, dy) = (
            (i64::from(x) - i64::from(self.bounds.min_x)) as usize,
            (i64::from(y) - i64::from(self.bounds.min_y)) as usize,
        );
        Some(dy * self.width() as usize + dx)
    }
}

/// Takes the luma values as color indexes.
impl From<GrayImage> for IndexedImage {
    fn from(image: GrayImage) -> IndexedImage {
        IndexedImage {
            bounds: Bounds::from_size(image.width(), image.height()),
            pix: image.into_raw(),
        }
    }
}

impl SourceImage for IndexedImage {
    fn color_index_at(&self, x: i32, y: i32) -> u8 {
        self.offset(x, y).map_or(0, |i| self.pix[i])
    }
}

impl DestImage for IndexedImage {
    fn set_color_index(&mut self, x: i32, y: i32, index: u8) {
        if let Some(i) = self.offset(x, y) {
            self.pix[i] = index;
        }
    }
}

impl Bounded for IndexedImage {
    fn bounds(&self) -> Bounds {
        self.bounds
    }
}
