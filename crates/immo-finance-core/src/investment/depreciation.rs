use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Money;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Share of the purchase price treated as building; the land share is not
/// depreciable.
pub const BUILDING_SHARE: Decimal = dec!(0.80);

/// Straight-line annual rate on the building basis (50-year life).
pub const BUILDING_RATE: Decimal = dec!(0.02);

/// Straight-line annual rate on notary fees.
pub const NOTARY_FEES_RATE: Decimal = dec!(0.02);

/// Share of the purchase price treated as furniture.
pub const FURNITURE_SHARE: Decimal = dec!(0.10);

/// Straight-line annual rate on the furniture value (5-year life).
pub const FURNITURE_RATE: Decimal = dec!(0.20);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Annual depreciation (amortissement) components for a furnished rental.
///
/// Deductible only under the regime reel, but computed for every analysis so
/// regime comparisons can show what the deduction would be worth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationProfile {
    /// Depreciable building basis: price net of the land share
    pub building_basis: Money,
    /// Furniture value carved out of the price
    pub furniture_value: Money,
    /// Annual depreciation on the building
    pub building: Money,
    /// Annual depreciation on notary fees
    pub notary_fees: Money,
    /// Annual depreciation on furniture
    pub furniture: Money,
    /// Total annual deduction
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Annual depreciation for a purchase at the standard component split.
pub fn compute_depreciation(purchase_price: Money, notary_fees: Money) -> DepreciationProfile {
    let building_basis = purchase_price * BUILDING_SHARE;
    let furniture_value = purchase_price * FURNITURE_SHARE;

    let building = building_basis * BUILDING_RATE;
    let notary = notary_fees * NOTARY_FEES_RATE;
    let furniture = furniture_value * FURNITURE_RATE;

    DepreciationProfile {
        building_basis,
        furniture_value,
        building,
        notary_fees: notary,
        furniture,
        total: building + notary + furniture,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
