//! Products list page.

use async_trait::async_trait;

use crate::{
    api::{ApiError, InventoryApi},
    entities::Product,
    pages::{FormError, ListPage, Listed, ProductForm},
};

/// Inline error shown when `GET /products` fails.
pub const FETCH_PRODUCTS_ERROR: &str = "Error fetching products, is the server running?";

/// The `/` page.
pub type ProductsPage = ListPage<Product>;

#[async_trait]
impl Listed for Product {
    type Form = ProductForm;

    const NOUN: &'static str = "product";
    const FETCH_ERROR: &'static str = FETCH_PRODUCTS_ERROR;

    fn id(&self) -> i64 {
        self.product_id
    }

    fn delete_prompt(&self) -> String {
        format!(
            "Are you sure you want to delete this product? This will also remove product orders made for this product.{} {} {} {}?",
            self.product_id,
            self.product_name,
            self.price.normalize(),
            self.weight.normalize(),
        )
    }

    fn from_form(form: &ProductForm, original: &Self) -> Result<Self, FormError> {
        form.to_product(original.product_id)
    }

    async fn fetch(api: &dyn InventoryApi) -> Result<Vec<Self>, ApiError> {
        api.list_products().await
    }

    async fn remove(api: &dyn InventoryApi, id: i64) -> Result<(), ApiError> {
        api.delete_product(id).await
    }

    async fn replace(api: &dyn InventoryApi, id: i64, entity: &Self) -> Result<Self, ApiError> {
        api.update_product(id, entity).await
    }
}
