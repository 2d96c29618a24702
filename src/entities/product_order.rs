//! Product Orders

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::Product;

/// A quantity of one product. The product is embedded, not referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrder {
    /// Server-assigned id
    pub order_id: i64,

    /// Number of units ordered
    pub quantity: u32,

    /// Ordered product
    pub product: Product,
}

impl ProductOrder {
    /// Price of the whole line (`quantity * price`), or `None` on overflow.
    pub fn total_price(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.product.price)
    }

    /// Weight of the whole line in grams (`quantity * weight`), or `None` on
    /// overflow.
    pub fn total_weight(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.product.weight)
    }
}
