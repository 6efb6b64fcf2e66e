use anyhow::{Context, Result};
use clap::Parser;
use movie_lib::{FrameStream, Session, DEFAULT_MAX_ROWS};
use signal_hook::consts::SIGINT;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Step through or play an ASCII movie in the terminal.
#[derive(Debug, Parser)]
#[command(name = "play", version, about)]
struct Cli {
    /// Movie file written by `encode`
    file_path: PathBuf,

    /// Rows shown when stepping through frames
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    rows: usize,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let stream = FrameStream::load(&cli.file_path)
        .with_context(|| format!("Couldn't load {}", cli.file_path.display()))?;

    println!(
        "Loaded {}x{}, {} frames",
        stream.width(),
        stream.height(),
        stream.frame_count()
    );

    if stream.frame_count() == 0 {
        log::warn!(
            "{} holds no complete frame of {}x{}",
            cli.file_path.display(),
            stream.width(),
            stream.height()
        );
    }

    let cancel = Arc::new(AtomicBool::new(false));

    // Ctrl+C stops playback; a second one while nothing is playing exits.
    signal_hook::flag::register_conditional_shutdown(SIGINT, 1, Arc::clone(&cancel))
        .context("Couldn't install the interrupt handler")?;
    signal_hook::flag::register(SIGINT, Arc::clone(&cancel))
        .context("Couldn't install the interrupt handler")?;

    log::debug!("Interrupt handler installed, showing up to {} rows", cli.rows);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    Session::new(&stream, cancel)
        .with_max_rows(cli.rows)
        .run(stdin.lock(), &mut stdout)?;

    Ok(())
}
