//! Gas pricing policy
//!
//! Turns a single fee quote into slow/standard/fast recommendations and pads
//! a raw gas limit estimate with a safety margin. All arithmetic stays in
//! `U256` and truncates toward zero.

use alloy::primitives::U256;
use serde::Serialize;

/// Standard tier, as a percentage of the quoted gas price
pub const STANDARD_TIER_PERCENT: u64 = 110;

/// Fast tier, as a percentage of the quoted gas price
pub const FAST_TIER_PERCENT: u64 = 120;

/// Buffer applied on top of a raw `eth_estimateGas` result
pub const GAS_LIMIT_BUFFER_PERCENT: u64 = 120;

const HUNDRED: U256 = U256::from_limbs([100, 0, 0, 0]);

/// Tiered gas price recommendation derived from one fee quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GasPriceTiers {
    /// The quoted price, unchanged
    pub slow: U256,
    /// Quote plus 10%
    pub standard: U256,
    /// Quote plus 20%
    pub fast: U256,
}

/// Compute `floor(value * percent / 100)` without overflowing on large values.
///
/// With `value = 100q + r` the product is `q * percent + r * percent / 100`,
/// and only the second term needs truncating. Results past `U256::MAX`
/// saturate.
pub fn apply_percent(value: U256, percent: u64) -> U256 {
    let percent = U256::from(percent);
    let (q, r) = value.div_rem(HUNDRED);
    q.saturating_mul(percent)
        .saturating_add(r * percent / HUNDRED)
}

/// Derive the three price tiers from a base fee rate
pub fn compute_tiers(base_fee_rate: U256) -> GasPriceTiers {
    GasPriceTiers {
        slow: base_fee_rate,
        standard: apply_percent(base_fee_rate, STANDARD_TIER_PERCENT),
        fast: apply_percent(base_fee_rate, FAST_TIER_PERCENT),
    }
}

/// Pad a raw gas limit estimate by [`GAS_LIMIT_BUFFER_PERCENT`]
pub fn buffered_estimate(raw_estimate: U256) -> U256 {
    apply_percent(raw_estimate, GAS_LIMIT_BUFFER_PERCENT)
}
