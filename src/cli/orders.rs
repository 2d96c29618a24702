use std::{io, sync::Arc};

use clap::{Args, Subcommand};
use kobmand::{api::InventoryApi, pages::AddDeliveryPage, render};

use super::rendering;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// Show product orders with running totals for a selection
    List(ListOrdersArgs),
}

#[derive(Debug, Args)]
struct ListOrdersArgs {
    /// Order id to mark as selected; repeat for more
    #[arg(long = "select")]
    selected: Vec<i64>,
}

pub(crate) async fn run(command: OrdersCommand, api: Arc<dyn InventoryApi>) -> Result<(), String> {
    let OrdersSubcommand::List(args) = command.command;

    let mut page = AddDeliveryPage::new(api);

    if !page.load().await {
        return Err(page.error().unwrap_or_default().to_string());
    }

    for order_id in args.selected {
        page.selection_mut().set(order_id, true);
    }

    render::write_order_picker(io::stdout().lock(), page.orders(), page.selection())
        .map_err(rendering)
}
