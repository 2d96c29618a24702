//! Deliveries list page.

use async_trait::async_trait;

use crate::{
    api::{ApiError, InventoryApi},
    entities::Delivery,
    pages::{DeliveryForm, FormError, ListPage, Listed},
};

/// Inline error shown when `GET /deliveries` fails.
pub const FETCH_DELIVERIES_ERROR: &str = "Error fetching deliveries, is the server running?";

/// The `/deliveries` page.
pub type DeliveriesPage = ListPage<Delivery>;

#[async_trait]
impl Listed for Delivery {
    type Form = DeliveryForm;

    const NOUN: &'static str = "delivery";
    const FETCH_ERROR: &'static str = FETCH_DELIVERIES_ERROR;

    fn id(&self) -> i64 {
        self.delivery_id
    }

    fn delete_prompt(&self) -> String {
        format!(
            "Are you sure you want to delete this delivery? This will also remove product orders made for this delivery.{},  {}, destination {}, from warehouse {}?",
            self.delivery_id, self.delivery_date, self.destination, self.from_warehouse,
        )
    }

    fn from_form(form: &DeliveryForm, original: &Self) -> Result<Self, FormError> {
        form.to_delivery(original)
    }

    async fn fetch(api: &dyn InventoryApi) -> Result<Vec<Self>, ApiError> {
        api.list_deliveries().await
    }

    async fn remove(api: &dyn InventoryApi, id: i64) -> Result<(), ApiError> {
        api.delete_delivery(id).await
    }

    async fn replace(api: &dyn InventoryApi, id: i64, entity: &Self) -> Result<Self, ApiError> {
        api.update_delivery(id, entity).await
    }
}
