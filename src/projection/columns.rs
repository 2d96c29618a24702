//! Columns
//!
//! Each list-view entity declares its columns once: the field name used by
//! sort directives, the header shown to the user and an accessor. The generic
//! filter and sort code only ever goes through this table.

use std::fmt::{self, Debug};

use crate::{
    entities::{Delivery, Product},
    projection::FieldValue,
};

/// One top-level field of an entity shown in a list view.
pub struct Column<T> {
    /// Field name as it appears on the wire, e.g. `productName`.
    pub name: &'static str,

    /// Table header text.
    pub header: &'static str,

    /// Reads the field from an entity.
    pub value: fn(&T) -> FieldValue<'_>,
}

impl<T> Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

/// Entities that can be filtered and sorted in a list view.
pub trait Tabular: Sized + 'static {
    /// Top-level scalar fields, in display order. Nested lists are never
    /// columns.
    const COLUMNS: &'static [Column<Self>];

    /// Look up a column by field name.
    fn column(name: &str) -> Option<&'static Column<Self>> {
        Self::COLUMNS.iter().find(|column| column.name == name)
    }

    /// Read a field by name, or [`FieldValue::Missing`] for unknown names.
    fn field(&self, name: &str) -> FieldValue<'_> {
        Self::column(name).map_or(FieldValue::Missing, |column| (column.value)(self))
    }
}

impl Tabular for Product {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "productId",
            header: "#",
            value: |product| FieldValue::from(product.product_id),
        },
        Column {
            name: "productName",
            header: "Product Name",
            value: |product| FieldValue::Text(&product.product_name),
        },
        Column {
            name: "price",
            header: "Price",
            value: |product| FieldValue::Number(product.price),
        },
        Column {
            name: "weight",
            header: "Weight",
            value: |product| FieldValue::Number(product.weight),
        },
    ];
}

impl Tabular for Delivery {
    const COLUMNS: &'static [Column<Self>] = &[
        Column {
            name: "deliveryId",
            header: "#",
            value: |delivery| FieldValue::from(delivery.delivery_id),
        },
        Column {
            name: "deliveryDate",
            header: "Delivery Date",
            value: |delivery| FieldValue::Date(delivery.delivery_date),
        },
        Column {
            name: "destination",
            header: "Destination",
            value: |delivery| FieldValue::Text(&delivery.destination),
        },
        Column {
            name: "fromWarehouse",
            header: "Warehouse",
            value: |delivery| FieldValue::Text(&delivery.from_warehouse),
        },
    ];
}
