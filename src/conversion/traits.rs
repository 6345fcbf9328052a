use image::{GrayImage, Luma};

/// A tile graphics format: a way to encode and decode a single 8x8 tile.
///
/// Each system picks the codec matching how it stores its tile or sprite
/// graphics, while reusing everything around it.
///
/// Implementations hold no mutable state, so one codec can be shared by
/// any number of conversions and threads.
pub trait Codec {
    /// Encodes the 8x8 tile of `src` whose top-left corner is at `x`, `y`
    /// into the first [`size`](Codec::size) bytes of `dst`.
    ///
    /// `src` is never modified, nor is any byte of `dst` past `size()`.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than `size()` bytes.
    fn encode<S>(&self, src: &S, x: i32, y: i32, dst: &mut [u8])
    where
        S: SourceImage + ?Sized;

    /// Decodes the first [`size`](Codec::size) bytes of `src` into the
    /// 8x8 tile of `dst` whose top-left corner is at `x`, `y`.
    ///
    /// Any data in `src` after `size()` bytes is ignored, and no pixel of
    /// `dst` outside the target tile is changed.
    ///
    /// # Panics
    ///
    /// Panics if `src` is shorter than `size()` bytes.
    fn decode<D>(&self, src: &[u8], dst: &mut D, x: i32, y: i32)
    where
        D: DestImage + ?Sized;

    /// Returns the size of one encoded tile, which is also the minimum
    /// size of the buffers given to `encode` and `decode`.
    fn size(&self) -> usize;
}

/// An indexed-color image whose pixels can be read.
///
/// Reads outside the image must still return a defined value; the
/// adapters in this crate return 0.
pub trait SourceImage {
    fn color_index_at(&self, x: i32, y: i32) -> u8;
}

/// An indexed-color image whose pixels can be changed.
pub trait DestImage {
    fn set_color_index(&mut self, x: i32, y: i32, index: u8);
}

/// An image with a known rectangular area, used by the drivers to lay
/// out tiles.
pub trait Bounded {
    fn bounds(&self) -> Bounds;
}

/// A half-open rectangle: `min` is inside, `max` is not.
///
/// Any `i32` corners are allowed. Tiles at the far right or bottom of the
/// coordinate space may reach past `i32::MAX`; the codecs wrap those
/// coordinates around, so they land outside the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Bounds {
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// A rectangle at the origin with the given size.
    pub fn from_size(width: u32, height: u32) -> Bounds {
        Bounds::new(0, 0, width as i32, height as i32)
    }

    pub fn width(&self) -> u32 {
        (i64::from(self.max_x) - i64::from(self.min_x)).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (i64::from(self.max_y) - i64::from(self.min_y)).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    /// The top-left corners of the 8x8 tiles covering this rectangle, in
    /// row-major order. Partial tiles at the right and bottom edges are
    /// included.
    pub fn tile_origins(&self) -> impl Iterator<Item = (i32, i32)> {
        let Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        } = *self;
        (min_y..max_y)
            .step_by(8)
            .flat_map(move |y| (min_x..max_x).step_by(8).map(move |x| (x, y)))
    }
}

/// Converts image-space coordinates to buffer coordinates, if inside.
fn gray_position(image: &GrayImage, x: i32, y: i32) -> Option<(u32, u32)> {
    let (x, y) = (u32::try_from(x).ok()?, u32::try_from(y).ok()?);
    if x < image.width() && y < image.height() {
        Some((x, y))
    } else {
        None
    }
}

/// Luma values of a grayscale image are used directly as color indexes.
impl SourceImage for GrayImage {
    fn color_index_at(&self, x: i32, y: i32) -> u8 {
        match gray_position(self, x, y) {
            Some((x, y)) => self.get_pixel(x, y)[0],
            None => 0,
        }
    }
}

impl DestImage for GrayImage {
    fn set_color_index(&mut self, x: i32, y: i32, index: u8) {
        if let Some((x, y)) = gray_position(self, x, y) {
            self.put_pixel(x, y, Luma([index]));
        }
    }
}

impl Bounded for GrayImage {
    fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width(), self.height())
    }
}

#[cfg(test)]
mod test {
    use super::{Bounded, Bounds, DestImage, SourceImage};
    use image::{GrayImage, Luma};

    #[test]
    fn test_tile_origins_row_major() {
        let origins: Vec<(i32, i32)> = Bounds::new(-4, -4, 12, 12).tile_origins().collect();
        assert_eq!(origins, vec![(-4, -4), (4, -4), (-4, 4), (4, 4)]);
    }

    #[test]
    fn test_tile_origins_partial() {
        let origins: Vec<(i32, i32)> = Bounds::from_size(9, 9).tile_origins().collect();
        assert_eq!(origins, vec![(0, 0), (8, 0), (0, 8), (8, 8)]);

        assert_eq!(Bounds::from_size(0, 16).tile_origins().count(), 0);
        assert_eq!(Bounds::new(3, 3, 1, 1).tile_origins().count(), 0);
    }

    #[test]
    fn test_bounds_size() {
        let bounds = Bounds::new(-4, 2, 12, 10);
        assert_eq!((bounds.width(), bounds.height()), (16, 8));
        assert!(bounds.contains(-4, 2));
        assert!(!bounds.contains(12, 2));
        assert!(!bounds.contains(0, 10));
        assert!(Bounds::new(5, 5, 1, 9).is_empty());
    }

    #[test]
    fn test_bounds_size_at_limits() {
        let bounds = Bounds::new(i32::MIN, i32::MIN, i32::MAX, i32::MIN + 1);
        assert_eq!((bounds.width(), bounds.height()), (u32::MAX, 1));
        assert_eq!(Bounds::new(i32::MAX, 0, i32::MIN, 1).width(), 0);

        let origins: Vec<(i32, i32)> = Bounds::new(i32::MAX - 9, 0, i32::MAX, 1)
            .tile_origins()
            .collect();
        assert_eq!(origins, vec![(i32::MAX - 9, 0), (i32::MAX - 1, 0)]);
    }

    #[test]
    fn test_gray_image_adapter() {
        let mut image = GrayImage::new(3, 2);
        image.put_pixel(2, 1, Luma([77]));

        assert_eq!(image.bounds(), Bounds::from_size(3, 2));
        assert_eq!(image.color_index_at(2, 1), 77);
        assert_eq!(image.color_index_at(3, 1), 0);
        assert_eq!(image.color_index_at(-1, 0), 0);

        image.set_color_index(0, 0, 5);
        image.set_color_index(-1, 0, 9);
        image.set_color_index(0, 2, 9);
        assert_eq!(image.as_raw(), &vec![5, 0, 0, 0, 0, 77]);
    }
}
