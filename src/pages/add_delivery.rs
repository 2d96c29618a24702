//! Add-delivery page
//!
//! Besides the delivery inputs the page lists every product order so the
//! user can pick which ones the delivery carries. Totals are derived from
//! the current selection.

use std::{
    fmt::{self, Debug},
    sync::Arc,
};

use jiff::civil::Date;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::{
    api::InventoryApi,
    entities::ProductOrder,
    pages::{DeliveryForm, FlowError, Outcome},
    routes::Route,
};

/// Inline error shown when `GET /productOrders` fails.
pub const FETCH_ORDERS_ERROR: &str = "Error fetching product orders, is the server running?";

/// Shown in place of an amount that does not fit a decimal.
pub const OVERFLOW: &str = "overflow";

/// Normalized `amount`, or [`OVERFLOW`].
pub fn format_amount(amount: Option<Decimal>) -> String {
    amount.map_or_else(|| OVERFLOW.to_string(), |value| value.normalize().to_string())
}

/// Picker line for one product order.
pub fn order_label(order: &ProductOrder) -> String {
    let weight = order.total_weight();

    format!(
        "{} | {} stk. | {}DKK | {}g ({}kg)",
        order.product.product_name,
        order.quantity,
        format_amount(order.total_price()),
        format_amount(weight),
        format_amount(weight.and_then(|grams| grams.checked_div(Decimal::ONE_THOUSAND))),
    )
}

/// Running totals of the selected orders.
///
/// A field is `None` once its sum overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    /// Σ quantity · price
    pub cost: Option<Decimal>,

    /// Σ quantity · weight, in grams
    pub weight: Option<Decimal>,
}

impl Default for OrderTotals {
    fn default() -> Self {
        Self {
            cost: Some(Decimal::ZERO),
            weight: Some(Decimal::ZERO),
        }
    }
}

/// Selected order ids in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSelection {
    selected: Vec<i64>,
}

impl OrderSelection {
    /// Check or uncheck `order_id`.
    pub fn set(&mut self, order_id: i64, checked: bool) {
        let present = self.is_selected(order_id);

        if checked && !present {
            self.selected.push(order_id);
        } else if !checked && present {
            self.selected.retain(|id| *id != order_id);
        }
    }

    /// Flip `order_id` and return whether it is now selected.
    pub fn toggle(&mut self, order_id: i64) -> bool {
        let checked = !self.is_selected(order_id);
        self.set(order_id, checked);
        checked
    }

    /// Whether `order_id` is selected.
    pub fn is_selected(&self, order_id: i64) -> bool {
        self.selected.contains(&order_id)
    }

    /// Selected ids.
    pub fn ids(&self) -> &[i64] {
        &self.selected
    }

    /// Uncheck everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected orders that exist in `orders`, in selection order.
    pub fn resolve(&self, orders: &[ProductOrder]) -> Vec<ProductOrder> {
        let by_id: FxHashMap<i64, &ProductOrder> =
            orders.iter().map(|order| (order.order_id, order)).collect();

        self.selected
            .iter()
            .filter_map(|id| by_id.get(id).map(|order| (*order).clone()))
            .collect()
    }

    /// Totals over the selected orders that exist in `orders`.
    pub fn totals(&self, orders: &[ProductOrder]) -> OrderTotals {
        orders
            .iter()
            .filter(|order| self.is_selected(order.order_id))
            .fold(OrderTotals::default(), |totals, order| OrderTotals {
                cost: checked_sum(totals.cost, order.total_price()),
                weight: checked_sum(totals.weight, order.total_weight()),
            })
    }
}

fn checked_sum(total: Option<Decimal>, line: Option<Decimal>) -> Option<Decimal> {
    total.zip(line).and_then(|(total, line)| total.checked_add(line))
}

/// The `/add-delivery` page.
pub struct AddDeliveryPage {
    api: Arc<dyn InventoryApi>,
    orders: Vec<ProductOrder>,
    selection: OrderSelection,
    form: DeliveryForm,
    error: Option<String>,
}

impl Debug for AddDeliveryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddDeliveryPage")
            .field("orders", &self.orders)
            .field("selection", &self.selection)
            .field("form", &self.form)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl AddDeliveryPage {
    /// Page with an empty form and no orders loaded.
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self {
            api,
            orders: Vec::new(),
            selection: OrderSelection::default(),
            form: DeliveryForm::default(),
            error: None,
        }
    }

    /// Fetch the product orders to pick from.
    pub async fn load(&mut self) -> bool {
        match self.api.list_product_orders().await {
            Ok(orders) => {
                self.orders = orders;
                self.error = None;
                true
            }
            Err(error) => {
                warn!(%error, "failed to fetch product order list");
                self.error = Some(FETCH_ORDERS_ERROR.to_string());
                false
            }
        }
    }

    /// Fetched product orders.
    pub fn orders(&self) -> &[ProductOrder] {
        &self.orders
    }

    /// Current order selection.
    pub fn selection(&self) -> &OrderSelection {
        &self.selection
    }

    /// Mutable order selection.
    pub fn selection_mut(&mut self) -> &mut OrderSelection {
        &mut self.selection
    }

    /// Totals of the current selection.
    pub fn totals(&self) -> OrderTotals {
        self.selection.totals(&self.orders)
    }

    /// Current inputs.
    pub fn form(&self) -> &DeliveryForm {
        &self.form
    }

    /// Inputs to type into.
    pub fn form_mut(&mut self) -> &mut DeliveryForm {
        &mut self.form
    }

    /// Inline error from the last failed operation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Create the delivery described by the form carrying the selected
    /// orders. An empty date means `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the form is invalid or the request fails.
    pub async fn submit(&mut self, today: Date) -> Result<Outcome, FlowError> {
        let orders = self.selection.resolve(&self.orders);

        let delivery = match self.form.to_new_delivery(orders, today) {
            Ok(delivery) => delivery,
            Err(error) => return Err(self.fail(error.into())),
        };

        self.form.clear();
        self.selection.clear();

        match self.api.create_delivery(&delivery).await {
            Ok(created) => {
                info!(delivery_id = created.delivery_id, "created delivery");
                self.error = None;
                Ok(Outcome::Navigate(Route::Deliveries))
            }
            Err(error) => Err(self.fail(error.into())),
        }
    }

    fn fail(&mut self, error: FlowError) -> FlowError {
        self.error = Some(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use reqwest::StatusCode;
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockInventoryApi},
        entities::{Delivery, Product},
        pages::FormError,
    };

    use super::*;

    fn order(order_id: i64, name: &str, quantity: u32, price: Decimal, weight: i64) -> ProductOrder {
        ProductOrder {
            order_id,
            quantity,
            product: Product {
                product_id: order_id * 10,
                product_name: name.to_string(),
                price,
                weight: Decimal::from(weight),
            },
        }
    }

    fn orders() -> Vec<ProductOrder> {
        vec![
            order(1, "Milk", 3, Decimal::new(1250, 2), 1000),
            order(2, "Rye bread", 2, Decimal::from(28), 750),
            order(3, "Butter", 1, Decimal::new(2195, 2), 250),
        ]
    }

    fn mock() -> MockInventoryApi {
        let mut api = MockInventoryApi::new();
        api.expect_list_product_orders()
            .times(1)
            .returning(|| Ok(orders()));
        api
    }

    #[test]
    fn label_shows_quantity_cost_and_weight() {
        assert_eq!(
            order_label(&order(1, "Milk", 3, Decimal::new(1250, 2), 1000)),
            "Milk | 3 stk. | 37.5DKK | 3000g (3kg)"
        );
        assert_eq!(
            order_label(&order(2, "Rye bread", 2, Decimal::from(28), 750)),
            "Rye bread | 2 stk. | 56DKK | 1500g (1.5kg)"
        );
    }

    #[test]
    fn totals_follow_selection() {
        let orders = orders();
        let mut selection = OrderSelection::default();

        assert!(selection.toggle(1));
        assert!(selection.toggle(3));
        assert_eq!(
            selection.totals(&orders),
            OrderTotals {
                cost: Some(Decimal::new(5945, 2)),
                weight: Some(Decimal::from(3250)),
            }
        );

        assert!(!selection.toggle(1));
        assert_eq!(selection.totals(&orders).weight, Some(Decimal::from(250)));
    }

    #[test]
    fn oversized_order_shows_overflow_instead_of_panicking() -> TestResult {
        let huge: ProductOrder = serde_json::from_value(serde_json::json!({
            "orderId": 9,
            "quantity": 4_000_000_000_u32,
            "product": {
                "productId": 90,
                "productName": "Gold bar",
                "price": 1e20,
                "weight": 1
            }
        }))?;

        assert_eq!(
            order_label(&huge),
            "Gold bar | 4000000000 stk. | overflowDKK | 4000000000g (4000000kg)"
        );

        let orders = vec![huge, order(1, "Milk", 3, Decimal::new(1250, 2), 1000)];
        let mut selection = OrderSelection::default();
        selection.toggle(9);
        selection.toggle(1);

        assert_eq!(
            selection.totals(&orders),
            OrderTotals {
                cost: None,
                weight: Some(Decimal::from(4_000_003_000_u64)),
            }
        );

        Ok(())
    }

    #[test]
    fn overflow_sticks_once_a_sum_overflows() {
        let orders = vec![
            order(1, "Ballast", u32::MAX, Decimal::from(28), 1000),
            order(2, "Ballast", u32::MAX, Decimal::MAX / Decimal::from(u32::MAX), 1000),
        ];
        let mut selection = OrderSelection::default();
        selection.toggle(1);
        selection.toggle(2);

        assert_eq!(selection.totals(&orders).cost, None);
    }

    #[test]
    fn resolve_keeps_selection_order_and_skips_unknown_ids() {
        let orders = orders();
        let mut selection = OrderSelection::default();
        selection.set(3, true);
        selection.set(42, true);
        selection.set(1, true);
        selection.set(3, true);

        let ids: Vec<i64> = selection
            .resolve(&orders)
            .iter()
            .map(|order| order.order_id)
            .collect();

        assert_eq!(ids, [3, 1]);
    }

    #[tokio::test]
    async fn failed_load_shows_orders_error() {
        let mut api = MockInventoryApi::new();
        api.expect_list_product_orders().times(1).returning(|| {
            Err(ApiError::Request {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "boom".to_string(),
            })
        });

        let mut page = AddDeliveryPage::new(Arc::new(api));

        assert!(!page.load().await);
        assert!(page.orders().is_empty());
        assert_eq!(page.error(), Some(FETCH_ORDERS_ERROR));
    }

    #[tokio::test]
    async fn submit_sends_selected_orders_and_navigates() -> TestResult {
        let mut api = mock();
        api.expect_create_delivery()
            .withf(|delivery| {
                delivery.delivery_date == date(2024, 5, 1)
                    && delivery.destination == "Valby"
                    && delivery
                        .product_orders
                        .iter()
                        .map(|order| order.order_id)
                        .eq([2])
            })
            .times(1)
            .returning(|delivery| {
                Ok(Delivery {
                    delivery_id: 8,
                    delivery_date: delivery.delivery_date,
                    destination: delivery.destination.clone(),
                    from_warehouse: delivery.from_warehouse.clone(),
                    product_orders: delivery.product_orders.clone(),
                })
            });

        let mut page = AddDeliveryPage::new(Arc::new(api));
        page.load().await;
        page.selection_mut().toggle(2);
        page.form_mut().destination = "Valby".to_string();
        page.form_mut().from_warehouse = "Glostrup".to_string();

        let outcome = page.submit(date(2024, 5, 1)).await?;

        assert_eq!(outcome, Outcome::Navigate(Route::Deliveries));
        assert_eq!(page.form(), &DeliveryForm::default());
        assert!(page.selection().ids().is_empty());
        assert_eq!(page.totals(), OrderTotals::default());

        Ok(())
    }

    #[tokio::test]
    async fn missing_destination_sends_nothing() {
        let mut api = mock();
        api.expect_create_delivery().never();

        let mut page = AddDeliveryPage::new(Arc::new(api));
        page.load().await;
        page.form_mut().from_warehouse = "Glostrup".to_string();

        let result = page.submit(date(2024, 5, 1)).await;

        assert!(matches!(
            result,
            Err(FlowError::Form(FormError::Required("destination")))
        ));
        assert_eq!(page.error(), Some("destination is required"));
    }
}
