//! Deliveries

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::entities::ProductOrder;

/// Delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    /// Server-assigned id
    pub delivery_id: i64,

    /// Day of delivery
    #[serde(with = "super::dates")]
    pub delivery_date: Date,

    /// Where the delivery goes
    pub destination: String,

    /// Warehouse the delivery leaves from
    pub from_warehouse: String,

    /// Line items, in the order they were chosen
    #[serde(default)]
    pub product_orders: Vec<ProductOrder>,
}

/// Delivery payload for creation; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    /// Day of delivery
    #[serde(with = "super::dates")]
    pub delivery_date: Date,

    /// Where the delivery goes
    pub destination: String,

    /// Warehouse the delivery leaves from
    pub from_warehouse: String,

    /// Line items
    pub product_orders: Vec<ProductOrder>,
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn reads_instant_dates_from_server() -> TestResult {
        let delivery: Delivery = serde_json::from_value(json!({
            "deliveryId": 4,
            "deliveryDate": "2023-11-18T00:00:00.000Z",
            "destination": "MinKøbmand Frederiksberg",
            "fromWarehouse": "Glostrup Industri Lager",
            "productOrders": [],
        }))?;

        assert_eq!(delivery.delivery_date, date(2023, 11, 18));
        assert_eq!(delivery.from_warehouse, "Glostrup Industri Lager");

        Ok(())
    }

    #[test]
    fn missing_product_orders_default_to_empty() -> TestResult {
        let delivery: Delivery = serde_json::from_value(json!({
            "deliveryId": 4,
            "deliveryDate": "2023-11-18",
            "destination": "Valby",
            "fromWarehouse": "Glostrup",
        }))?;

        assert!(delivery.product_orders.is_empty());

        Ok(())
    }

    #[test]
    fn new_delivery_has_no_id_and_iso_date() -> TestResult {
        let delivery = NewDelivery {
            delivery_date: date(2024, 1, 9),
            destination: "Valby".to_string(),
            from_warehouse: "Glostrup".to_string(),
            product_orders: Vec::new(),
        };

        let value = serde_json::to_value(&delivery)?;

        assert_eq!(
            value,
            json!({
                "deliveryDate": "2024-01-09",
                "destination": "Valby",
                "fromWarehouse": "Glostrup",
                "productOrders": [],
            })
        );

        Ok(())
    }
}
