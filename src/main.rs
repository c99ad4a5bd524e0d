use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use image::ImageFormat;
use log::{error, info};
use ntsc_frame::ntsc::{ACTIVE_LINE_SAMPLES, IMAGE_HEIGHT};
use ntsc_frame::{
    sink, NtscDecoder, NtscEncoder, NtscError, NtscResult, RasterImage, SyncTables,
};

/// Render a grayscale picture as the voltage samples of one interlaced NTSC frame.
///
/// The picture must be 210x480 (binary PGM, or any format the image crate decodes). Samples are
/// written as 32-bit little-endian floats at 4 MS/s, odd field first.
#[derive(Parser, Debug)]
#[command(name = "ntsc-frame", version)]
struct Cli {
    /// Input picture.
    input: PathBuf,

    /// Output sample file, `-` for stdout.
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Also decode the frame back into a PNG at this path.
    #[arg(long)]
    preview: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Initialize logging.
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            if matches!(err, NtscError::Width { .. } | NtscError::Height { .. }) {
                eprintln!(
                    "image must be a {ACTIVE_LINE_SAMPLES}x{IMAGE_HEIGHT} grayscale picture"
                );
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: &Cli) -> NtscResult<()> {
    let image = RasterImage::load(&cli.input)?;

    let tables = SyncTables::new()?;
    let encoder = NtscEncoder::new(&tables);
    let frame = encoder.frame(&image.raster())?;

    info!(
        "{:.2}% of samples at sync level",
        NtscDecoder::sync_level_fraction(&frame) * 100.0
    );

    // Nothing is opened for writing until the frame exists and the preview format is known.
    let preview = match &cli.preview {
        Some(path) => Some((path, ImageFormat::from_path(path)?)),
        None => None,
    };

    // Unbuffered: `write_samples` chunks its own writes and counts what the file accepted.
    if cli.output.as_os_str() == "-" {
        sink::write_samples(io::stdout().lock(), &frame)?;
    } else {
        let file = File::create(&cli.output)?;
        sink::write_samples(file, &frame)?;
    }

    if let Some((path, format)) = preview {
        NtscDecoder::decode_frame(&frame)?.save_with_format(path, format)?;
        info!("wrote preview to {}", path.display());
    }

    Ok(())
}
