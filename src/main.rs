//! Kobmand CLI

use std::process;

use clap::Parser;
use kobmand::{config, observability};

use crate::cli::Cli;

mod cli;

#[tokio::main]
async fn main() {
    config::load_dotenv();

    let cli = Cli::parse();

    if let Err(error) = observability::init(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized, must use eprintln for setup errors"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        #[expect(
            clippy::print_stderr,
            reason = "command errors are reported to the terminal, not the log"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
