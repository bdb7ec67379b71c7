use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Notary fees rate applied when the caller supplies none. The 8% figure
/// covers transfer duties on existing (ancien) properties; new builds run
/// closer to 2-3% and should be passed explicitly.
pub const DEFAULT_NOTARY_FEES_RATE: Decimal = dec!(0.08);

/// All-in acquisition cost of a property purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseCosts {
    /// Agreed sale price
    pub purchase_price: Money,
    /// Notary fees and transfer duties
    pub notary_fees: Money,
    /// Price plus notary fees: the denominator for all ROI ratios
    pub total_cost: Money,
}

/// Total acquisition cost at the given notary fees rate.
pub fn compute_purchase_costs(purchase_price: Money, notary_fees_rate: Rate) -> PurchaseCosts {
    let notary_fees = purchase_price * notary_fees_rate;
    PurchaseCosts {
        purchase_price,
        notary_fees,
        total_cost: purchase_price + notary_fees,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
