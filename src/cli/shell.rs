//! Interactive session over the client-side routes.

use std::{
    io::{self, Write},
    mem,
    sync::Arc,
};

use jiff::Zoned;
use kobmand::{
    api::InventoryApi,
    pages::{
        AddDeliveryPage, AddProductPage, Confirm, DeliveriesPage, DeliveryForm, FlowError,
        Outcome, ProductForm, ProductsPage,
    },
    render::{self, RenderError},
    routes::Route,
};

use super::{StdinConfirm, rendering};

const HELP: &str = "\
go PATH              open a page: /, /deliveries, /add-product, /add-delivery
nav                  show the navigation header
search [TEXT]        filter the current list
sort FIELD           click a column header, e.g. `sort price`
refresh              refetch the current page
delete ID            delete a row from the current list
edit ID key=value..  edit a row, e.g. `edit 3 price=12.50`
add key=value..      fill in and submit the add form for the current list
toggle ORDER_ID      pick or drop a product order on /add-delivery
help                 show this text
quit                 leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Go(String),
    Nav,
    Search(String),
    Sort(String),
    Refresh,
    Delete(i64),
    Edit { id: i64, fields: Vec<(String, String)> },
    Add(Vec<(String, String)>),
    Toggle(i64),
    Help,
    Quit,
}

/// Split on whitespace, keeping single- or double-quoted text together.
fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for ch in line.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err("unterminated quote".to_string());
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

fn parse_id(raw: &str) -> Result<i64, String> {
    raw.parse()
        .map_err(|_err| format!("`{raw}` is not a valid id"))
}

fn parse_fields(tokens: &[String]) -> Result<Vec<(String, String)>, String> {
    tokens
        .iter()
        .map(|token| {
            token
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| format!("expected key=value, got `{token}`"))
        })
        .collect()
}

fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);

    // Search text is taken verbatim so leading and inner spaces survive.
    if let Some(rest) = line.trim_start().strip_prefix("search")
        && (rest.is_empty() || rest.starts_with(' '))
    {
        let text = rest.strip_prefix(' ').unwrap_or(rest);
        return Ok(Some(Command::Search(text.to_string())));
    }

    let tokens = tokenize(line)?;

    let Some((name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match (name.as_str(), args) {
        ("go", [path]) => Command::Go(path.clone()),
        ("nav", []) => Command::Nav,
        ("sort", [field]) => Command::Sort(field.clone()),
        ("refresh", []) => Command::Refresh,
        ("delete", [id]) => Command::Delete(parse_id(id)?),
        ("edit", [id, fields @ ..]) => Command::Edit {
            id: parse_id(id)?,
            fields: parse_fields(fields)?,
        },
        ("add", fields) => Command::Add(parse_fields(fields)?),
        ("toggle", [id]) => Command::Toggle(parse_id(id)?),
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("unknown command `{}`, try `help`", line.trim())),
    };

    Ok(Some(command))
}

fn apply_product_fields(
    form: &mut ProductForm,
    fields: Vec<(String, String)>,
) -> Result<(), String> {
    for (key, value) in fields {
        match key.as_str() {
            "name" | "productName" => form.name = value,
            "price" => form.price = value,
            "weight" => form.weight = value,
            _ => return Err(format!("unknown product field `{key}`")),
        }
    }

    Ok(())
}

fn apply_delivery_fields(
    form: &mut DeliveryForm,
    fields: Vec<(String, String)>,
) -> Result<(), String> {
    for (key, value) in fields {
        match key.as_str() {
            "date" | "deliveryDate" => form.delivery_date = value,
            "destination" => form.destination = value,
            "warehouse" | "fromWarehouse" => form.from_warehouse = value,
            _ => return Err(format!("unknown delivery field `{key}`")),
        }
    }

    Ok(())
}

struct Shell<W> {
    out: W,
    confirm: Box<dyn Confirm>,
    route: Route,
    products: ProductsPage,
    deliveries: DeliveriesPage,
    add_product: AddProductPage,
    add_delivery: AddDeliveryPage,
}

impl<W: Write> Shell<W> {
    fn new(api: &Arc<dyn InventoryApi>, out: W, confirm: Box<dyn Confirm>) -> Self {
        Self {
            out,
            confirm,
            route: Route::Products,
            products: ProductsPage::new(Arc::clone(api)),
            deliveries: DeliveriesPage::new(Arc::clone(api)),
            add_product: AddProductPage::new(Arc::clone(api)),
            add_delivery: AddDeliveryPage::new(Arc::clone(api)),
        }
    }

    /// Switch to `route`, fetch what it shows and draw it.
    async fn enter(&mut self, route: Route) -> Result<(), RenderError> {
        self.route = route;

        match route {
            Route::Products => {
                self.products.refresh().await;
            }
            Route::Deliveries => {
                self.deliveries.refresh().await;
            }
            Route::AddDelivery => {
                self.add_delivery.load().await;
            }
            Route::AddProduct => {}
        }

        self.show()
    }

    fn show(&mut self) -> Result<(), RenderError> {
        render::write_nav(&mut self.out, self.route.path())?;

        let error = match self.route {
            Route::Products => {
                let view = self.products.view();
                render::write_table(&mut self.out, &view.rows(), view.sort())?;
                self.products.error()
            }
            Route::Deliveries => {
                let view = self.deliveries.view();
                render::write_table(&mut self.out, &view.rows(), view.sort())?;
                self.deliveries.error()
            }
            Route::AddProduct => {
                let form = self.add_product.form();
                writeln!(
                    self.out,
                    "name: {}\nprice: {}\nweight: {}",
                    form.name, form.price, form.weight
                )?;
                self.add_product.error()
            }
            Route::AddDelivery => {
                let form = self.add_delivery.form();
                writeln!(
                    self.out,
                    "date: {}\ndestination: {}\nwarehouse: {}",
                    form.delivery_date, form.destination, form.from_warehouse
                )?;
                render::write_order_picker(
                    &mut self.out,
                    self.add_delivery.orders(),
                    self.add_delivery.selection(),
                )?;
                self.add_delivery.error()
            }
        };

        if let Some(message) = error {
            render::write_error(&mut self.out, message)?;
        }

        Ok(())
    }

    fn say(&mut self, message: &str) -> Result<(), String> {
        writeln!(self.out, "{message}").map_err(|error| rendering(error.into()))
    }

    async fn navigate(&mut self, outcome: Result<Outcome, FlowError>) -> Result<(), String> {
        match outcome {
            Ok(Outcome::Navigate(route)) => self.enter(route).await.map_err(rendering),
            Ok(Outcome::Cancelled) => self.say("Cancelled."),
            Ok(Outcome::Completed) | Err(_) => self.show().map_err(rendering),
        }
    }

    fn search(&mut self, text: String) -> Result<(), String> {
        match self.route {
            Route::Products => self.products.view_mut().set_search(text),
            Route::Deliveries => self.deliveries.view_mut().set_search(text),
            Route::AddProduct | Route::AddDelivery => {
                return Err("search only works on list pages".to_string());
            }
        }

        self.show().map_err(rendering)
    }

    fn sort(&mut self, field: &str) -> Result<(), String> {
        match self.route {
            Route::Products => self.products.view_mut().click_header(field),
            Route::Deliveries => self.deliveries.view_mut().click_header(field),
            Route::AddProduct | Route::AddDelivery => {
                return Err("sort only works on list pages".to_string());
            }
        }

        self.show().map_err(rendering)
    }

    async fn delete(&mut self, id: i64) -> Result<(), String> {
        let outcome = match self.route {
            Route::Products => self.products.delete(id, self.confirm.as_ref()).await,
            Route::Deliveries => self.deliveries.delete(id, self.confirm.as_ref()).await,
            Route::AddProduct | Route::AddDelivery => {
                return Err("delete only works on list pages".to_string());
            }
        };

        self.navigate(outcome).await
    }

    async fn edit(&mut self, id: i64, fields: Vec<(String, String)>) -> Result<(), String> {
        let outcome = match self.route {
            Route::Products => {
                let mut form = self
                    .products
                    .edit_form(id)
                    .map_err(|error| error.to_string())?;
                apply_product_fields(&mut form, fields)?;
                self.products.submit_edit(id, &mut form).await
            }
            Route::Deliveries => {
                let mut form = self
                    .deliveries
                    .edit_form(id)
                    .map_err(|error| error.to_string())?;
                apply_delivery_fields(&mut form, fields)?;
                self.deliveries.submit_edit(id, &mut form).await
            }
            Route::AddProduct | Route::AddDelivery => {
                return Err("edit only works on list pages".to_string());
            }
        };

        self.navigate(outcome).await
    }

    /// Fill in the add form matching the current list and submit it.
    async fn add(&mut self, fields: Vec<(String, String)>) -> Result<(), String> {
        let outcome = match self.route {
            Route::Products | Route::AddProduct => {
                self.route = Route::AddProduct;
                apply_product_fields(self.add_product.form_mut(), fields)?;
                self.add_product.submit().await
            }
            Route::Deliveries | Route::AddDelivery => {
                if self.route == Route::Deliveries {
                    self.route = Route::AddDelivery;
                    self.add_delivery.load().await;
                }
                apply_delivery_fields(self.add_delivery.form_mut(), fields)?;
                self.add_delivery.submit(Zoned::now().date()).await
            }
        };

        self.navigate(outcome).await
    }

    fn toggle(&mut self, order_id: i64) -> Result<(), String> {
        if self.route != Route::AddDelivery {
            return Err("toggle only works on /add-delivery".to_string());
        }

        self.add_delivery.selection_mut().toggle(order_id);

        self.show().map_err(rendering)
    }

    /// Run one command. Returns `false` once the session should end.
    async fn execute(&mut self, command: Command) -> Result<bool, String> {
        match command {
            Command::Go(path) => match Route::resolve(&path) {
                Some(route) => self.enter(route).await.map_err(rendering)?,
                None => self.say(&format!("No page at {path}"))?,
            },
            Command::Nav => {
                render::write_nav(&mut self.out, self.route.path()).map_err(rendering)?;
            }
            Command::Search(text) => self.search(text)?,
            Command::Sort(field) => self.sort(&field)?,
            Command::Refresh => self.enter(self.route).await.map_err(rendering)?,
            Command::Delete(id) => self.delete(id).await?,
            Command::Edit { id, fields } => self.edit(id, fields).await?,
            Command::Add(fields) => self.add(fields).await?,
            Command::Toggle(order_id) => self.toggle(order_id)?,
            Command::Help => self.say(HELP)?,
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }
}

pub(crate) async fn run(api: Arc<dyn InventoryApi>) -> Result<(), String> {
    let mut shell = Shell::new(&api, io::stdout(), Box::new(StdinConfirm));
    shell.enter(Route::Products).await.map_err(rendering)?;

    let stdin = io::stdin();

    loop {
        write!(shell.out, "> ")
            .and_then(|()| shell.out.flush())
            .map_err(|error| rendering(error.into()))?;

        let mut line = String::new();

        if stdin
            .read_line(&mut line)
            .map_err(|error| format!("failed to read input: {error}"))?
            == 0
        {
            break;
        }

        let result = match parse(&line) {
            Ok(None) => Ok(true),
            Ok(Some(command)) => shell.execute(command).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(error) => render::write_error(&mut shell.out, &error).map_err(rendering)?,
        }
    }

    Ok(())
}
