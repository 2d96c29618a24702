use clap::{Args, Subcommand};
use kobmand::config::ClientConfig;

use super::say;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Store a bearer token
    Set(SetTokenArgs),

    /// Remove the stored token
    Clear,
}

#[derive(Debug, Args)]
struct SetTokenArgs {
    /// Raw bearer token
    token: String,
}

pub(crate) fn run(command: TokenCommand, config: &ClientConfig) -> Result<(), String> {
    let store = config.token_store();

    match command.command {
        TokenSubcommand::Set(args) => {
            if args.token.trim().is_empty() {
                return Err("token cannot be empty".to_string());
            }

            store
                .save(&args.token)
                .map_err(|error| format!("failed to store token: {error}"))?;

            say(&format!("token stored in {}", store.path().display()))
        }
        TokenSubcommand::Clear => {
            store
                .clear()
                .map_err(|error| format!("failed to clear token: {error}"))?;

            say("token cleared")
        }
    }
}
