use std::sync::Arc;

use clap::{Args, Subcommand};
use jiff::Zoned;
use kobmand::{
    api::InventoryApi,
    pages::{AddDeliveryPage, AssumeYes, Confirm, DeliveriesPage, DeliveryForm, Outcome},
};

use super::{DeleteArgs, ListArgs, StdinConfirm, say, write_rows};

#[derive(Debug, Args)]
pub(crate) struct DeliveriesCommand {
    #[command(subcommand)]
    command: DeliveriesSubcommand,
}

#[derive(Debug, Subcommand)]
enum DeliveriesSubcommand {
    /// Show the delivery list
    List(ListArgs),

    /// Create a delivery
    Add(AddDeliveryArgs),

    /// Replace a delivery's fields
    Edit(EditDeliveryArgs),

    /// Delete a delivery and its product orders
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct AddDeliveryArgs {
    /// Delivery date (YYYY-MM-DD); today when omitted
    #[arg(long)]
    date: Option<String>,

    /// Destination address
    #[arg(long)]
    destination: String,

    /// Warehouse the delivery leaves from
    #[arg(long)]
    warehouse: String,

    /// Product order to include; repeat for more
    #[arg(long = "order")]
    orders: Vec<i64>,
}

#[derive(Debug, Args)]
struct EditDeliveryArgs {
    /// Id of the delivery to edit
    id: i64,

    /// New delivery date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// New destination address
    #[arg(long)]
    destination: Option<String>,

    /// New warehouse
    #[arg(long)]
    warehouse: Option<String>,
}

impl EditDeliveryArgs {
    fn apply(self, form: &mut DeliveryForm) {
        if let Some(date) = self.date {
            form.delivery_date = date;
        }
        if let Some(destination) = self.destination {
            form.destination = destination;
        }
        if let Some(warehouse) = self.warehouse {
            form.from_warehouse = warehouse;
        }
    }
}

pub(crate) async fn run(
    command: DeliveriesCommand,
    api: Arc<dyn InventoryApi>,
) -> Result<(), String> {
    match command.command {
        DeliveriesSubcommand::List(args) => list(&args, api).await,
        DeliveriesSubcommand::Add(args) => add(args, api).await,
        DeliveriesSubcommand::Edit(args) => edit(args, api).await,
        DeliveriesSubcommand::Delete(args) => delete(&args, api).await,
    }
}

async fn loaded(api: Arc<dyn InventoryApi>) -> Result<DeliveriesPage, String> {
    let mut page = DeliveriesPage::new(api);

    if !page.refresh().await {
        return Err(page.error().unwrap_or_default().to_string());
    }

    Ok(page)
}

async fn list(args: &ListArgs, api: Arc<dyn InventoryApi>) -> Result<(), String> {
    let mut page = loaded(api).await?;

    args.apply(page.view_mut());

    write_rows(page.view())
}

async fn add(args: AddDeliveryArgs, api: Arc<dyn InventoryApi>) -> Result<(), String> {
    let mut page = AddDeliveryPage::new(Arc::clone(&api));

    if !args.orders.is_empty() && !page.load().await {
        return Err(page.error().unwrap_or_default().to_string());
    }

    for order_id in args.orders {
        page.selection_mut().set(order_id, true);
    }

    *page.form_mut() = DeliveryForm {
        delivery_date: args.date.unwrap_or_default(),
        destination: args.destination,
        from_warehouse: args.warehouse,
    };

    let outcome = page
        .submit(Zoned::now().date())
        .await
        .map_err(|error| error.to_string())?;

    say("Delivery created.")?;

    if let Outcome::Navigate(_) = outcome {
        write_rows(loaded(api).await?.view())?;
    }

    Ok(())
}

async fn edit(args: EditDeliveryArgs, api: Arc<dyn InventoryApi>) -> Result<(), String> {
    let mut page = loaded(api).await?;
    let id = args.id;

    let mut form = page.edit_form(id).map_err(|error| error.to_string())?;
    args.apply(&mut form);

    page.submit_edit(id, &mut form)
        .await
        .map_err(|error| error.to_string())?;

    write_rows(page.view())
}

async fn delete(args: &DeleteArgs, api: Arc<dyn InventoryApi>) -> Result<(), String> {
    let mut page = loaded(api).await?;

    let confirm: &dyn Confirm = if args.yes { &AssumeYes } else { &StdinConfirm };

    match page
        .delete(args.id, confirm)
        .await
        .map_err(|error| error.to_string())?
    {
        Outcome::Cancelled => say("Cancelled."),
        Outcome::Completed | Outcome::Navigate(_) => write_rows(page.view()),
    }
}
