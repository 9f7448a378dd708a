//! letter-lens command-line tool.
//!
//! Reduces an image file with the quadrant reduction and prints the quantized
//! grid; with `--model`, also classifies it.
//!
//! Run with:
//!   cargo run --bin letter-lens -- drawing.png --model trained_models/letters.json

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use letter_lens::{decode_image_bytes, Classifier, GridSize, IntensityGrid, Reducer};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Reduce a drawing to the classifier grid and optionally classify it")]
struct Args {
    /// Image file to reduce (PNG, JPEG, BMP or GIF)
    input: PathBuf,

    /// JSON model file; when given, the reduced grid is classified
    #[arg(long)]
    model: Option<PathBuf>,

    /// Side of the square source image the reduction accepts
    #[arg(long, default_value_t = 448)]
    source_size: usize,

    /// Side of the square grid the reduction produces
    #[arg(long, default_value_t = 28)]
    target_size: usize,

    /// Log reduction steps
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Trace } else { log::LevelFilter::Info };
    env_logger::Builder::from_default_env()
        .filter_module("letter_lens", level)
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let reducer = Reducer::new(
        GridSize::square(args.source_size),
        GridSize::square(args.target_size),
    )?;

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let grid = decode_image_bytes(&bytes)
        .with_context(|| format!("cannot decode {}", args.input.display()))?;
    let reduced = reducer.reduce_image(&grid)?.quantize_u8();
    print_grid(&reduced);

    if let Some(path) = &args.model {
        let classifier = Classifier::load(path, reducer.target())
            .with_context(|| format!("cannot load model {}", path.display()))?;
        let prediction = classifier.predict(&reduced)?;
        println!("prediction: {} (confidence {:.4})", prediction.label, prediction.confidence);
    }
    Ok(())
}

fn print_grid(grid: &IntensityGrid) {
    for r in 0..grid.height() {
        let line: Vec<String> = grid.row(r).iter().map(|v| format!("{:>3}", *v as u8)).collect();
        println!("{}", line.join(" "));
    }
}
