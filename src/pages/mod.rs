//! Pages
//!
//! State and mutation flows behind each route. Pages talk to the server only
//! through [`InventoryApi`](crate::api::InventoryApi), so every flow can be
//! driven against a mock.

mod add_delivery;
mod add_product;
mod confirm;
mod deliveries;
mod errors;
mod forms;
mod list_page;
mod list_view;
mod products;

pub use add_delivery::{
    AddDeliveryPage, FETCH_ORDERS_ERROR, OVERFLOW, OrderSelection, OrderTotals, format_amount,
    order_label,
};
pub use add_product::AddProductPage;
pub use confirm::{AssumeYes, Confirm, MockConfirm};
pub use deliveries::{DeliveriesPage, FETCH_DELIVERIES_ERROR};
pub use errors::FlowError;
pub use forms::{DeliveryForm, FormError, ProductForm};
pub use list_page::{ListPage, Listed};
pub use list_view::ListView;
pub use products::{FETCH_PRODUCTS_ERROR, ProductsPage};

use crate::routes::Route;

/// What a finished flow asks the caller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user declined; nothing was sent.
    Cancelled,

    /// The change was accepted and the list refreshed.
    Completed,

    /// The change was accepted; show `Route` next.
    Navigate(Route),
}
