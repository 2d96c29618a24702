//! Flow errors.

use thiserror::Error;

use crate::{api::ApiError, pages::FormError};

/// Why a page flow failed. Displays as the message shown inline.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The submitted form violated an input constraint.
    #[error(transparent)]
    Form(#[from] FormError),

    /// The referenced row is not in the current list.
    #[error("no {entity} with id {id} in the current list")]
    NotListed {
        /// Entity noun, e.g. `product`
        entity: &'static str,

        /// Requested id
        id: i64,
    },
}
