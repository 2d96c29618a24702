use std::sync::Arc;

use clap::{Args, Subcommand};
use kobmand::{
    api::InventoryApi,
    pages::{AddProductPage, AssumeYes, Confirm, Outcome, ProductForm, ProductsPage},
};

use super::{DeleteArgs, ListArgs, StdinConfirm, say, write_rows};

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    /// Show the product list
    List(ListArgs),

    /// Create a product
    Add(AddProductArgs),

    /// Replace a product's fields
    Edit(EditProductArgs),

    /// Delete a product and its product orders
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct AddProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in DKK
    #[arg(long, allow_hyphen_values = true)]
    price: String,

    /// Unit weight in grams
    #[arg(long, allow_hyphen_values = true)]
    weight: String,
}

#[derive(Debug, Args)]
struct EditProductArgs {
    /// Id of the product to edit
    id: i64,

    /// New product name
    #[arg(long)]
    name: Option<String>,

    /// New unit price in DKK
    #[arg(long, allow_hyphen_values = true)]
    price: Option<String>,

    /// New unit weight in grams
    #[arg(long, allow_hyphen_values = true)]
    weight: Option<String>,
}

impl EditProductArgs {
    fn apply(self, form: &mut ProductForm) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(weight) = self.weight {
            form.weight = weight;
        }
    }
}

pub(crate) async fn run(command: ProductsCommand, api: Arc<dyn InventoryApi>) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::List(args) => list(&args, api).await,
        ProductsSubcommand::Add(args) => add(args, api).await,
        ProductsSubcommand::Edit(args) => edit(args, api).await,
        ProductsSubcommand::Delete(args) => delete(&args, api).await,
    }
}

async fn loaded(api: Arc<dyn InventoryApi>) -> Result<ProductsPage, String> {
    let mut page = ProductsPage::new(api);

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

async fn add(args: AddProductArgs, api: Arc<dyn InventoryApi>) -> Result<(), String> {
    let mut page = AddProductPage::new(Arc::clone(&api));

    *page.form_mut() = ProductForm {
        name: args.name,
        price: args.price,
        weight: args.weight,
    };

    let outcome = page.submit().await.map_err(|error| error.to_string())?;

    say("Product created.")?;

    if let Outcome::Navigate(_) = outcome {
        write_rows(loaded(api).await?.view())?;
    }

    Ok(())
}

async fn edit(args: EditProductArgs, api: Arc<dyn InventoryApi>) -> Result<(), String> {
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
