//! Reading and writing indexed images from and to image files.
//!
//! PNG and GIF files go through the `png` and `gif` crates directly, since
//! they give access to the raw palette indexes. Everything else goes
//! through `image`, which only keeps indexes when the file decodes to 8-bit
//! grayscale.

use crate::conversion::{BitDepth, Bounded, DestImage, SourceImage};
use crate::indexed::IndexedImage;
use image::{DynamicImage, GrayImage, ImageError, Luma};
use log::debug;
use png::{ColorType, Decoder, Encoder, Transformations};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug)]
pub enum ContainerError {
    IoError(io::Error),
    PngDecoding(png::DecodingError),
    PngEncoding(png::EncodingError),
    GifDecoding(gif::DecodingError),
    GifEncoding(gif::EncodingError),
    Image(ImageError),
    /// The file holds colors rather than color indexes.
    NotIndexed,
    /// The samples of the file are wider than 8 bits.
    UnsupportedDepth(u8),
    /// The image is too large for the file format.
    TooLarge(u32, u32),
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::IoError(e) => write!(f, "{}", e),
            ContainerError::PngDecoding(e) => write!(f, "cannot decode png: {}", e),
            ContainerError::PngEncoding(e) => write!(f, "cannot encode png: {}", e),
            ContainerError::GifDecoding(e) => write!(f, "cannot decode gif: {}", e),
            ContainerError::GifEncoding(e) => write!(f, "cannot encode gif: {}", e),
            ContainerError::Image(e) => write!(f, "{}", e),
            ContainerError::NotIndexed => write!(f, "not a paletted image"),
            ContainerError::UnsupportedDepth(bits) => {
                write!(f, "unsupported sample depth: {} bits", bits)
            }
            ContainerError::TooLarge(width, height) => {
                write!(f, "image too large: {}x{}", width, height)
            }
        }
    }
}

impl Error for ContainerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ContainerError::IoError(e) => Some(e),
            ContainerError::PngDecoding(e) => Some(e),
            ContainerError::PngEncoding(e) => Some(e),
            ContainerError::GifDecoding(e) => Some(e),
            ContainerError::GifEncoding(e) => Some(e),
            ContainerError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ContainerError {
    fn from(err: io::Error) -> ContainerError {
        ContainerError::IoError(err)
    }
}

impl From<png::DecodingError> for ContainerError {
    fn from(err: png::DecodingError) -> ContainerError {
        ContainerError::PngDecoding(err)
    }
}

impl From<png::EncodingError> for ContainerError {
    fn from(err: png::EncodingError) -> ContainerError {
        ContainerError::PngEncoding(err)
    }
}

impl From<gif::DecodingError> for ContainerError {
    fn from(err: gif::DecodingError) -> ContainerError {
        ContainerError::GifDecoding(err)
    }
}

impl From<gif::EncodingError> for ContainerError {
    fn from(err: gif::EncodingError) -> ContainerError {
        ContainerError::GifEncoding(err)
    }
}

impl From<ImageError> for ContainerError {
    fn from(err: ImageError) -> ContainerError {
        ContainerError::Image(err)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case(extension))
}

/// Loads the color indexes of an image file.
///
/// Indexed and grayscale PNGs of up to 8 bits per sample are accepted, as
/// is the first frame of a GIF. Other formats are accepted when they decode
/// to 8-bit grayscale.
pub fn load_indexed<P>(path: P) -> Result<IndexedImage, ContainerError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if has_extension(path, "png") {
        return load_png(path);
    }
    if has_extension(path, "gif") {
        return load_gif(path);
    }

    debug!("Loading {:?} through the image crate", path);
    match image::open(path)? {
        DynamicImage::ImageLuma8(gray) => Ok(gray.into()),
        other => {
            debug!("Decoded {:?} as {:?}", path, other.color());
            Err(ContainerError::NotIndexed)
        }
    }
}

fn load_png(path: &Path) -> Result<IndexedImage, ContainerError> {
    let mut decoder = Decoder::new(BufReader::new(File::open(path)?));
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    debug!(
        "Loaded {:?}: {}x{} {:?} at {:?}",
        path, info.width, info.height, info.color_type, info.bit_depth
    );

    match info.color_type {
        ColorType::Indexed | ColorType::Grayscale => (),
        _ => return Err(ContainerError::NotIndexed),
    }
    let bits = info.bit_depth as u8;
    if bits > 8 {
        return Err(ContainerError::UnsupportedDepth(bits));
    }

    let mut pix = Vec::with_capacity(info.width as usize * info.height as usize);
    for row in buf.chunks_exact(info.line_size).take(info.height as usize) {
        pix.extend(unpack_row(row, bits, info.width as usize));
    }
    IndexedImage::from_raw(info.width, info.height, pix).ok_or(ContainerError::NotIndexed)
}

/// Pixels of the logical screen not covered by the first frame are 0.
fn load_gif(path: &Path) -> Result<IndexedImage, ContainerError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(BufReader::new(File::open(path)?))?;

    let mut image = IndexedImage::new(u32::from(decoder.width()), u32::from(decoder.height()));
    let frame = match decoder.read_next_frame()? {
        Some(frame) => frame,
        None => return Ok(image),
    };
    debug!(
        "Loaded {:?}: {}x{} frame at {},{} on a {}x{} screen",
        path,
        frame.width,
        frame.height,
        frame.left,
        frame.top,
        image.width(),
        image.height()
    );

    let (left, top) = (i32::from(frame.left), i32::from(frame.top));
    let frame_width = usize::from(frame.width);
    for (i, &index) in frame.buffer.iter().enumerate() {
        let (x, y) = ((i % frame_width) as i32, (i / frame_width) as i32);
        image.set_color_index(left + x, top + y, index);
    }
    Ok(image)
}

/// Splits a row of MSB-first samples of `bits` bits each.
fn unpack_row(row: &[u8], bits: u8, width: usize) -> impl Iterator<Item = u8> + '_ {
    let bits = usize::from(bits);
    let mask = ((1u16 << bits) - 1) as u8;
    (0..width).map(move |x| {
        let bit = x * bits;
        (row[bit / 8] >> (8 - bits - bit % 8)) & mask
    })
}

/// Packs samples of `bits` bits each into a row of MSB-first bytes.
fn pack_row(samples: impl Iterator<Item = u8>, bits: u8, width: usize) -> Vec<u8> {
    let bits = usize::from(bits);
    let mask = ((1u16 << bits) - 1) as u8;
    let mut row = vec![0; (width * bits + 7) / 8];
    for (x, sample) in samples.enumerate() {
        let bit = x * bits;
        row[bit / 8] |= (sample & mask) << (8 - bits - bit % 8);
    }
    row
}

/// Returns evenly spaced gray levels, one per color of `depth`, as RGB
/// triples from black to white.
pub fn grayscale_palette(depth: BitDepth) -> Vec<u8> {
    (0..depth.colors())
        .flat_map(|i| [gray_level(depth, i as u8); 3])
        .collect()
}

fn gray_level(depth: BitDepth, index: u8) -> u8 {
    let max = depth.colors() - 1;
    (255 * usize::from(index & depth.color_mask()) / max) as u8
}

/// The smallest PNG sample depth that holds every index of `depth`.
fn png_depth(depth: BitDepth) -> png::BitDepth {
    match depth.planes() {
        1 => png::BitDepth::One,
        2 => png::BitDepth::Two,
        3 | 4 => png::BitDepth::Four,
        _ => png::BitDepth::Eight,
    }
}

/// Saves an indexed image, rendered with [`grayscale_palette`].
///
/// A `.png` or `.gif` path gets an indexed image with that palette. Any
/// other format is picked by `image` from the extension and gets the gray
/// levels.
pub fn save_indexed<P>(
    image: &IndexedImage,
    depth: BitDepth,
    path: P,
) -> Result<(), ContainerError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bounds = image.bounds();
    let (width, height) = (image.width(), image.height());

    if has_extension(path, "gif") {
        return save_gif(image, depth, path);
    }
    if !has_extension(path, "png") {
        debug!("Saving {:?} through the image crate", path);
        let gray = GrayImage::from_fn(width, height, |x, y| {
            let index = image.color_index_at(bounds.min_x + x as i32, bounds.min_y + y as i32);
            Luma([gray_level(depth, index)])
        });
        gray.save(path)?;
        return Ok(());
    }

    let mut encoder = Encoder::new(BufWriter::new(File::create(path)?), width, height);
    encoder.set_color(ColorType::Indexed);
    encoder.set_depth(png_depth(depth));
    encoder.set_palette(grayscale_palette(depth));
    debug!(
        "Saving {:?}: {}x{} with {} colors at {:?}",
        path,
        width,
        height,
        depth.colors(),
        png_depth(depth)
    );

    let bits = png_depth(depth) as u8;
    let mut data = Vec::new();
    for y in bounds.min_y..bounds.max_y {
        let samples = (bounds.min_x..bounds.max_x)
            .map(|x| image.color_index_at(x, y) & depth.color_mask());
        data.extend(pack_row(samples, bits, width as usize));
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    writer.finish()?;
    Ok(())
}

fn save_gif(image: &IndexedImage, depth: BitDepth, path: &Path) -> Result<(), ContainerError> {
    let (width, height) = (image.width(), image.height());
    let (gif_width, gif_height) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(ContainerError::TooLarge(width, height)),
    };

    let bounds = image.bounds();
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in bounds.min_y..bounds.max_y {
        for x in bounds.min_x..bounds.max_x {
            pixels.push(image.color_index_at(x, y) & depth.color_mask());
        }
    }
    let frame = gif::Frame::from_indexed_pixels(gif_width, gif_height, pixels, None);
    debug!(
        "Saving {:?}: {}x{} with {} colors",
        path,
        width,
        height,
        depth.colors()
    );

    let writer = BufWriter::new(File::create(path)?);
    let mut encoder = gif::Encoder::new(writer, gif_width, gif_height, &grayscale_palette(depth))?;
    encoder.write_frame(&frame)?;
    encoder.into_inner()?.flush()?;
    Ok(())
}
