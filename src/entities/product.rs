//! Products

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned id; `0` on creation.
    pub product_id: i64,

    /// Product name
    pub product_name: String,

    /// Unit price
    #[serde(serialize_with = "super::amounts::serialize")]
    pub price: Decimal,

    /// Unit weight in grams
    #[serde(serialize_with = "super::amounts::serialize")]
    pub weight: Decimal,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn serialises_camel_case_numbers() -> TestResult {
        let product = Product {
            product_id: 0,
            product_name: "Milk".to_string(),
            price: Decimal::new(1250, 2),
            weight: Decimal::from(1000),
        };

        let value = serde_json::to_value(&product)?;

        assert_eq!(
            value,
            json!({ "productId": 0, "productName": "Milk", "price": 12.5, "weight": 1000 })
        );

        Ok(())
    }

    #[test]
    fn deserialises_integer_and_float_amounts() -> TestResult {
        let product: Product = serde_json::from_value(json!({
            "productId": 7,
            "productName": "Rye bread",
            "price": 24,
            "weight": 750.5,
        }))?;

        assert_eq!(product.product_id, 7);
        assert_eq!(product.price, Decimal::from(24));
        assert_eq!(product.weight, Decimal::new(7505, 1));

        Ok(())
    }
}
