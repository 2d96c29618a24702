//! Forms
//!
//! Typed records bound to the create and edit inputs. Each field is kept as
//! the raw text the user typed; parsing applies the same constraints the
//! inputs declare (required, non-negative, two decimal places).

use jiff::civil::Date;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::entities::{Delivery, NewDelivery, Product, ProductOrder, parse_iso_date};

/// Input constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required input was left empty.
    #[error("{0} is required")]
    Required(&'static str),

    /// A number input did not hold a number.
    #[error("{field} must be a number, got `{value}`")]
    InvalidNumber {
        /// Input name
        field: &'static str,

        /// Raw input
        value: String,
    },

    /// A number input was below its minimum of zero.
    #[error("{0} must not be negative")]
    Negative(&'static str),

    /// A number input had more than two decimal places.
    #[error("{0} allows at most two decimal places")]
    TooPrecise(&'static str),

    /// A date input did not hold a date.
    #[error("`{0}` is not a valid date")]
    InvalidDate(String),
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    if value.is_empty() {
        return Err(FormError::Required(field));
    }

    Ok(value.to_string())
}

fn amount(field: &'static str, value: &str) -> Result<Decimal, FormError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(FormError::Required(field));
    }

    let parsed = trimmed
        .parse::<Decimal>()
        .map_err(|_err| FormError::InvalidNumber {
            field,
            value: value.to_string(),
        })?;

    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(FormError::Negative(field));
    }

    if parsed.normalize().scale() > 2 {
        return Err(FormError::TooPrecise(field));
    }

    Ok(parsed)
}

fn date(value: &str) -> Result<Date, FormError> {
    parse_iso_date(value.trim()).map_err(|_err| FormError::InvalidDate(value.to_string()))
}

/// Product create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    /// `name` input
    pub name: String,

    /// `price` input
    pub price: String,

    /// `weight` input
    pub weight: String,
}

impl ProductForm {
    /// Build the full product record carrying `product_id`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] for the first violated input constraint.
    pub fn to_product(&self, product_id: i64) -> Result<Product, FormError> {
        Ok(Product {
            product_id,
            product_name: required("name", &self.name)?,
            price: amount("price", &self.price)?,
            weight: amount("weight", &self.weight)?,
        })
    }

    /// Reset every input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.product_name.clone(),
            price: product.price.normalize().to_string(),
            weight: product.weight.normalize().to_string(),
        }
    }
}

/// Delivery create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryForm {
    /// `deliveryDate` input (`YYYY-MM-DD`)
    pub delivery_date: String,

    /// `destination` input
    pub destination: String,

    /// `fromWarehouse` input
    pub from_warehouse: String,
}

impl DeliveryForm {
    /// Build a creation payload. An empty date means `today`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] for the first violated input constraint.
    pub fn to_new_delivery(
        &self,
        product_orders: Vec<ProductOrder>,
        today: Date,
    ) -> Result<NewDelivery, FormError> {
        let delivery_date = if self.delivery_date.trim().is_empty() {
            today
        } else {
            date(&self.delivery_date)?
        };

        Ok(NewDelivery {
            delivery_date,
            destination: required("destination", &self.destination)?,
            from_warehouse: required("fromWarehouse", &self.from_warehouse)?,
            product_orders,
        })
    }

    /// Build the full replacement for `original`, keeping its id and orders.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] for the first violated input constraint.
    pub fn to_delivery(&self, original: &Delivery) -> Result<Delivery, FormError> {
        if self.delivery_date.trim().is_empty() {
            return Err(FormError::Required("deliveryDate"));
        }

        Ok(Delivery {
            delivery_id: original.delivery_id,
            delivery_date: date(&self.delivery_date)?,
            destination: required("destination", &self.destination)?,
            from_warehouse: required("fromWarehouse", &self.from_warehouse)?,
            product_orders: original.product_orders.clone(),
        })
    }

    /// Reset every input.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl From<&Delivery> for DeliveryForm {
    fn from(delivery: &Delivery) -> Self {
        Self {
            delivery_date: delivery.delivery_date.to_string(),
            destination: delivery.destination.clone(),
            from_warehouse: delivery.from_warehouse.clone(),
        }
    }
}
