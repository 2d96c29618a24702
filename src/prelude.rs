//! Kobmand prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{ApiConfig, ApiError, FileTokenStore, HttpInventoryApi, InventoryApi, TokenStore},
    entities::{Delivery, NewDelivery, Product, ProductOrder},
    pages::{
        AddDeliveryPage, AddProductPage, Confirm, DeliveriesPage, DeliveryForm, FlowError,
        FormError, Outcome, ProductForm, ProductsPage,
    },
    projection::{SortDirection, SortDirective, Tabular, project},
    routes::Route,
};
