//! Entities
//!
//! Records exchanged with the inventory API. Field names on the wire are
//! camel-cased; the server owns every id.

mod amounts;
mod dates;
pub mod delivery;
pub mod product;
pub mod product_order;

pub use delivery::{Delivery, NewDelivery};
pub use product::Product;
pub use product_order::ProductOrder;

pub(crate) use dates::parse_iso_date;
