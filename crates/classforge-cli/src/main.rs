//! Classforge CLI - Generate Java sources from draw.io class diagrams

mod cli;
mod colorizer;

use clap::Parser;
use classforge::core::logging::init_logging;

fn main() {
    let cli_args = cli::Cli::parse();

    // Early logging for argument handling; the app reinitializes from flags
    if let Err(e) = init_logging(None, None) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let app = cli::ClassforgeApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
