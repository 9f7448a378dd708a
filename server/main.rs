//! letter-lens server
//!
//! Serves the drawing page and the `/process_image` endpoint from a
//! synchronous tiny_http server.
//!
//! Run with:
//!   cargo run --bin letter-lens-server --release -- --model trained_models/letters.json
//! Then open http://127.0.0.1:5000

mod handlers;
mod routes;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use tiny_http::Server;

use letter_lens::{Classifier, GridSize, Recognizer, Reducer};
use state::AppState;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Handwritten letter recognition server")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "LETTER_LENS_ADDR", default_value = "127.0.0.1:5000")]
    addr: String,

    /// JSON model file, loaded once at start-up
    #[arg(
        long,
        env = "LETTER_LENS_MODEL",
        default_value = "trained_models/letter_recognition_model.json"
    )]
    model: PathBuf,

    /// Side of the square image the endpoint accepts
    #[arg(long, default_value_t = 448)]
    source_size: usize,

    /// Side of the square grid fed to the model
    #[arg(long, default_value_t = 28)]
    target_size: usize,

    /// Largest accepted request body, in bytes
    #[arg(long, default_value_t = 8 * 1024 * 1024)]
    max_body_bytes: usize,

    /// Debug logging for the service and library
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .filter_module("letter_lens", level)
        .filter_module("letter_lens_server", level)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let reducer = match Reducer::new(
        GridSize::square(args.source_size),
        GridSize::square(args.target_size),
    ) {
        Ok(r) => r,
        Err(e) => {
            error!("invalid reduction sizes: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("loading model from {}", args.model.display());
    let classifier = match Classifier::load(&args.model, reducer.target()) {
        Ok(c) => c,
        Err(e) => {
            error!("cannot load model {}: {}", args.model.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let server = match Server::http(&args.addr) {
        Ok(s) => s,
        Err(e) => {
            error!("cannot bind {}: {}", args.addr, e);
            return ExitCode::FAILURE;
        }
    };

    let shared_state = Arc::new(AppState::new(
        Recognizer::new(reducer, classifier),
        args.max_body_bytes,
    ));

    info!(
        "listening on http://{} ({} -> {})",
        args.addr,
        reducer.source(),
        reducer.target()
    );

    // One thread per request; the state is read-only so no lock is taken.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }

    ExitCode::SUCCESS
}
