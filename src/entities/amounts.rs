//! Decimal amounts on the wire.
//!
//! Whole amounts go out as JSON integers (`1000`), everything else as a JSON
//! float (`12.5`).

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Serializer, ser::Error as _};

pub(crate) fn serialize<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let amount = amount.normalize();

    if amount.scale() == 0
        && let Some(whole) = amount.to_i64()
    {
        return serializer.serialize_i64(whole);
    }

    let Some(float) = amount.to_f64() else {
        return Err(S::Error::custom(format!(
            "amount {amount} is not representable as a number"
        )));
    };

    serializer.serialize_f64(float)
}
