//! Command-line interface.
//!
//! `libris serve` boots the HTTP server; main.rs only dispatches here.

use clap::{Parser, Subcommand};

use crate::http::{HttpServer, HttpServerConfig};

#[derive(Debug, Parser)]
#[command(name = "libris", about = "A small self-hostable library catalog service", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 8090)]
        port: u16,

        /// Allowed CORS origin, repeatable; permissive when omitted
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,
    },
}

/// Parse arguments and run the selected command.
pub async fn run() -> Result<(), std::io::Error> {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            host,
            port,
            cors_origins,
        } => {
            let config = HttpServerConfig {
                host,
                port,
                cors_origins,
            };
            HttpServer::with_config(config).start().await
        }
    }
}
