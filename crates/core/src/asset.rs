//! Asset enumerations, creation defaults and quantity arithmetic.
//!
//! The quantity rules here are the single source of truth for the
//! `qty >= 0` invariant; the database repeats it as a `CHECK` constraint.

use crate::error::CoreError;

text_enum! {
    /// Asset kind.
    pub enum AssetType: "type" {
        It => "it",
        NonIt => "non_it",
    }
}

text_enum! {
    /// Availability of an asset. Any value may replace any other.
    pub enum AssetStatus: "status" {
        Available => "available",
        Booked => "booked",
        Broken => "broken",
        Repair => "repair",
    }
}

impl Default for AssetType {
    fn default() -> Self {
        Self::It
    }
}

impl Default for AssetStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Quantity assigned to a new asset when none (or a non-positive one) is given.
pub const DEFAULT_QUANTITY: i32 = 1;

/// Resolve the quantity of a new asset: anything `<= 0` becomes [`DEFAULT_QUANTITY`].
pub fn initial_quantity(qty: Option<i32>) -> i32 {
    match qty {
        Some(q) if q > 0 => q,
        _ => DEFAULT_QUANTITY,
    }
}

/// Reject zero or negative adjustment amounts.
pub fn validate_adjustment(qty: i32) -> Result<(), CoreError> {
    if qty <= 0 {
        return Err(CoreError::field(
            "qty",
            format!("Quantity adjustment must be positive, got {qty}"),
        ));
    }
    Ok(())
}

/// Quantity left after taking `qty` units out of `current`.
pub fn decreased_quantity(current: i32, qty: i32) -> Result<i32, CoreError> {
    validate_adjustment(qty)?;
    if current < qty {
        return Err(CoreError::InsufficientQuantity {
            requested: qty,
            available: current,
        });
    }
    Ok(current - qty)
}

/// Quantity after returning `qty` units. There is no upper bound other
/// than the column width.
pub fn increased_quantity(current: i32, qty: i32) -> Result<i32, CoreError> {
    validate_adjustment(qty)?;
    current
        .checked_add(qty)
        .ok_or_else(|| CoreError::field("qty", "Quantity would overflow"))
}
