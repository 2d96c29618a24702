//! Kobmand
//!
//! Terminal front-end for the købmandsapp inventory and delivery API: list,
//! filter and sort products and deliveries, and create, edit or delete them
//! through the server's JSON endpoints.

pub mod api;
pub mod config;
pub mod entities;
pub mod observability;
pub mod pages;
pub mod prelude;
pub mod projection;
pub mod render;
pub mod routes;
