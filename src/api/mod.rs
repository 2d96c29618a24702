//! Inventory API transport
//!
//! Builds request descriptors, sends them with `reqwest` and unwraps
//! responses into entities or [`ApiError`]s.

mod client;
mod errors;
mod request;
mod response;
mod token;

pub use client::{ApiConfig, HttpInventoryApi, InventoryApi, MockInventoryApi};
pub use errors::{ApiError, NO_DETAILS};
pub use request::RequestOptions;
pub use response::{decode_response, ensure_success, error_message};
pub use token::{FileTokenStore, MockTokenStore, TOKEN_KEY, TokenStore, TokenStoreError};
