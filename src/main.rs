//! libris entry point
//!
//! Parses CLI arguments, dispatches to the CLI module, and exits non-zero
//! on failure. All setup lives behind `cli::run`.

use libris::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
