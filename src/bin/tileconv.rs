use clap::{ArgAction, Parser};
use log::{debug, error, info, log_enabled, Level};
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use tileconv::container::{load_indexed, save_indexed};
use tileconv::{decode, encode, BitDepth, Codec, Format, IndexedImage, TileCodec};

/// Number of tiles per row of a decoded image.
const TILES_PER_ROW: usize = 16;

const FORMATS_HELP: &str = "Tile data formats:
    p, packed               : packed-pixel
    tp, tileplanar          : planar, per tile
    rp, rowplanar           : planar, per row
    trpp, tilerowpairplanar : planar, pairs per row, rest per tile";

#[derive(Parser, Debug)]
#[command(about = "Converts between indexed images and 8x8 tile graphics data", long_about = None)]
#[command(version, after_help = FORMATS_HELP)]
struct Args {
    /// The input file.
    input: PathBuf,

    /// The output file. When decoding, the image format is determined
    /// using the extension of the output file.
    output: PathBuf,

    /// Decode tile data into an image, instead of encoding an image.
    #[arg(short, long)]
    decode: bool,

    /// Tile data format; see below.
    #[arg(short, long)]
    format: Format,

    /// Bits per pixel; 1-8.
    #[arg(short, long)]
    bpp: BitDepth,

    /// Log more details; repeat for even more.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn setup_logger(verbose: u8) {
    let level = match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Cannot set up logging: {}", e);
    }
}

/// Reports a fatal error through the logger, or straight to stderr when no
/// logger took it. Returns whether the logger was used.
fn report_error(message: &str) -> bool {
    if log_enabled!(Level::Error) {
        error!("{}", message);
        true
    } else {
        eprintln!("{}", message);
        false
    }
}

fn run_encode(args: &Args, codec: &TileCodec) -> Result<(), Box<dyn Error>> {
    let image = load_indexed(&args.input)?;
    info!(
        "Encoding {}x{} image as {} at {} bpp",
        image.width(),
        image.height(),
        args.format,
        args.bpp
    );

    let mut writer = BufWriter::new(File::create(&args.output)?);
    encode(&image, &mut writer, codec)?;
    writer.flush()?;
    Ok(())
}

/// Returns the image size in pixels that fits `tiles` tiles.
fn decoded_size(tiles: usize) -> (u32, u32) {
    let rows = (tiles + TILES_PER_ROW - 1) / TILES_PER_ROW;
    let columns = if rows < 2 { tiles } else { TILES_PER_ROW };
    ((columns * 8) as u32, (rows * 8) as u32)
}

fn run_decode(args: &Args, codec: &TileCodec) -> Result<(), Box<dyn Error>> {
    let src = fs::read(&args.input)?;
    if src.is_empty() {
        return Err("input holds no tiles".into());
    }
    if src.len() % codec.size() != 0 {
        return Err("input is not a whole number of tiles".into());
    }

    let tiles = src.len() / codec.size();
    let (width, height) = decoded_size(tiles);
    info!(
        "Decoding {} tiles of {} at {} bpp into {}x{} image",
        tiles, args.format, args.bpp, width, height
    );

    let mut image = IndexedImage::new(width, height);
    let decoded = decode(&src, &mut image, codec);
    debug!("Decoded {} of {} tiles", decoded, tiles);

    save_indexed(&image, args.bpp, &args.output)?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    setup_logger(args.verbose);

    let codec = args.format.codec(args.bpp);
    let result = if args.decode {
        run_decode(&args, &codec)
    } else {
        run_encode(&args, &codec)
    };

    if let Err(e) = result {
        let action = if args.decode { "decode" } else { "encode" };
        report_error(&format!("Cannot {} {:?}: {}", action, args.input, e));
        process::exit(1)
    }
}
