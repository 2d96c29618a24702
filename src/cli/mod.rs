use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use clap::{Args, Parser, Subcommand};
use kobmand::{
    api::{HttpInventoryApi, InventoryApi},
    config::{ClientConfig, LoggingConfig},
    pages::{Confirm, ListView},
    projection::Tabular,
    render::{self, RenderError},
};

mod deliveries;
mod orders;
mod products;
mod shell;
mod token;

#[derive(Debug, Parser)]
#[command(name = "kobmand", about = "købmandsapp inventory client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    client: ClientConfig,

    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Product list and product mutations
    Products(products::ProductsCommand),

    /// Delivery list and delivery mutations
    Deliveries(deliveries::DeliveriesCommand),

    /// Product orders available to deliveries
    Orders(orders::OrdersCommand),

    /// Persisted bearer token
    Token(token::TokenCommand),

    /// Interactive session
    Shell,
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let api: Arc<dyn InventoryApi> =
            Arc::new(HttpInventoryApi::new(self.client.api_config()));

        match self.command {
            Commands::Products(command) => products::run(command, api).await,
            Commands::Deliveries(command) => deliveries::run(command, api).await,
            Commands::Orders(command) => orders::run(command, api).await,
            Commands::Token(command) => token::run(command, &self.client),
            Commands::Shell => shell::run(api).await,
        }
    }
}

/// Search and sort flags shared by the list commands.
#[derive(Debug, Args)]
struct ListArgs {
    /// Case-insensitive substring filter
    #[arg(long)]
    search: Option<String>,

    /// Field to sort by, e.g. `price`
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    descending: bool,
}

impl ListArgs {
    fn apply<T: Tabular>(&self, view: &mut ListView<T>) {
        if let Some(search) = &self.search {
            view.set_search(search.clone());
        }

        if let Some(field) = &self.sort {
            view.click_header(field);

            if self.descending {
                view.click_header(field);
            }
        }
    }
}

/// Id plus confirmation override for the delete commands.
#[derive(Debug, Args)]
struct DeleteArgs {
    /// Id of the row to delete
    id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

/// Asks on the terminal and reads one line from stdin.
#[derive(Debug, Clone, Copy, Default)]
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        let mut out = io::stdout().lock();

        if write!(out, "{message} [y/N] ").and_then(|()| out.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();

        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }

        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn write_rows<T: Tabular>(view: &ListView<T>) -> Result<(), String> {
    render::write_table(io::stdout().lock(), &view.rows(), view.sort()).map_err(rendering)
}

fn say(message: &str) -> Result<(), String> {
    writeln!(io::stdout().lock(), "{message}").map_err(|error| rendering(error.into()))
}

fn rendering(error: RenderError) -> String {
    format!("failed to render output: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_accepts_y_and_yes_only() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn descending_needs_sort_field() {
        assert!(Cli::try_parse_from(["kobmand", "products", "list", "--descending"]).is_err());
        assert!(
            Cli::try_parse_from([
                "kobmand",
                "products",
                "list",
                "--sort",
                "price",
                "--descending"
            ])
            .is_ok()
        );
    }
}
