use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ParallelProgressIterator;
use movie_lib::{encode_images, verify, Image, Params, Source, Stats, DEFAULT_THRESHOLD};
use rayon::iter::ParallelIterator;
use std::path::PathBuf;

/// Frames previewed after writing.
const PREVIEW_FRAMES: usize = 2;

/// Turn a directory of images into an ASCII movie.
#[derive(Debug, Parser)]
#[command(name = "encode", version, about)]
struct Cli {
    /// Directory holding the frames (.jpg, .jpeg, .png), in file name order
    image_directory: PathBuf,

    /// Movie file to write
    #[arg(default_value = "output.txt")]
    output_path: PathBuf,

    /// Brightness (0-255) at or above which a pixel becomes '#'
    #[arg(default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let params = Params::new(cli.threshold);

    let source = Source::from_dir(&cli.image_directory).with_context(|| {
        format!("Couldn't load frames from {}", cli.image_directory.display())
    })?;

    println!("Found {} images", source.len());

    log::info!(
        "Binarizing {} with threshold {}",
        cli.image_directory.display(),
        params.threshold()
    );

    let images = perform_binarization(&source, &params);

    let stats = encode_images(images, &cli.output_path)
        .with_context(|| format!("Couldn't encode {}", cli.output_path.display()))?;

    print_stats(&stats);

    if let Some(header) = stats.header {
        println!();
        println!("Verifying {}...", cli.output_path.display());
        log::debug!("Expecting {}x{} frames", header.width, header.height);

        let report = verify::verify(&cli.output_path, header)
            .with_context(|| format!("Couldn't read back {}", cli.output_path.display()))?;

        report.write_to(PREVIEW_FRAMES, &mut std::io::stdout())?;
    }

    Ok(())
}

fn perform_binarization(source: &Source, params: &Params) -> Vec<movie_lib::Result<Image>> {
    source
        .images(params)
        .progress_count(source.len() as u64)
        .collect()
}

fn print_stats(stats: &Stats) {
    if let Some(header) = stats.header {
        println!("Frame size: {}x{} characters", header.width, header.height);
    }

    println!("Processed {} images ({} skipped)", stats.frames, stats.skipped);
    println!("Expected characters: {}", stats.expected_chars());
    println!("Actual characters: {}", stats.chars);

    if stats.verified() {
        println!("Length check passed");
    } else {
        println!("Length check failed");
    }
}
