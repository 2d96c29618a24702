//! Add-product page.

use std::{
    fmt::{self, Debug},
    sync::Arc,
};

use tracing::info;

use crate::{
    api::InventoryApi,
    pages::{FlowError, Outcome, ProductForm},
    routes::Route,
};

/// The `/add-product` page.
pub struct AddProductPage {
    api: Arc<dyn InventoryApi>,
    form: ProductForm,
    error: Option<String>,
}

impl Debug for AddProductPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddProductPage")
            .field("form", &self.form)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl AddProductPage {
    /// Page with an empty form.
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self {
            api,
            form: ProductForm::default(),
            error: None,
        }
    }

    /// Current inputs.
    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    /// Inputs to type into.
    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// Inline error from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Create the product described by the form. The server assigns the id,
    /// so `productId` is sent as `0`.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the form is invalid or the request fails.
    pub async fn submit(&mut self) -> Result<Outcome, FlowError> {
        let product = match self.form.to_product(0) {
            Ok(product) => product,
            Err(error) => return Err(self.fail(error.into())),
        };

        self.form.clear();

        match self.api.create_product(&product).await {
            Ok(created) => {
                info!(product_id = created.product_id, "created product");
                self.error = None;
                Ok(Outcome::Navigate(Route::Products))
            }
            Err(error) => Err(self.fail(error.into())),
        }
    }

    fn fail(&mut self, error: FlowError) -> FlowError {
        self.error = Some(error.to_string());
        error
    }
}
