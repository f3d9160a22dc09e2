//! Sale price waterfall.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CostResult, ensure_finite};

/// Price derived from a total cost, margin and VAT.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SalePrice {
    /// Total cost.
    pub base_price: f64,
    /// Cost plus profit margin.
    pub price_with_margin: f64,
    /// Price with margin plus VAT.
    pub price_with_tax: f64,
    /// `price_with_tax` rounded up to the next half unit.
    pub recommended_price: f64,
}

/// Round up to the next multiple of 0.5.
///
/// Values already on a half unit are kept. The result is never below
/// `value`, so a price that carries floating point noise just above a half
/// unit moves to the next one.
///
/// ```
/// use print_cost::round_up_to_half;
///
/// assert_eq!(round_up_to_half(45.5565), 46.0);
/// assert_eq!(round_up_to_half(45.01), 45.5);
/// assert_eq!(round_up_to_half(45.5), 45.5);
/// assert_eq!(round_up_to_half(0.0), 0.0);
/// ```
#[must_use]
pub fn round_up_to_half(value: f64) -> f64 {
    (value * 2.0).ceil() / 2.0
}

/// Compute the price waterfall for `total_cost`.
///
/// # Errors
///
/// Returns [`CostError::NonFinite`](crate::CostError::NonFinite) if any
/// argument is NaN or infinite.
///
/// # Example
///
/// ```
/// use print_cost::compute_sale_price;
///
/// let price = compute_sale_price(30.12, 21.0, 25.0).unwrap();
/// assert!((price.price_with_margin - 37.65).abs() < 1e-9);
/// assert!((price.price_with_tax - 45.5565).abs() < 1e-9);
/// assert_eq!(price.recommended_price, 46.0);
/// ```
pub fn compute_sale_price(
    total_cost: f64,
    vat_percent: f64,
    profit_margin_percent: f64,
) -> CostResult<SalePrice> {
    let base_price = ensure_finite("total_cost", total_cost)?;
    let vat = ensure_finite("vat_percent", vat_percent)?;
    let margin = ensure_finite("profit_margin_percent", profit_margin_percent)?;

    let price_with_margin = base_price * (1.0 + margin / 100.0);
    let price_with_tax = price_with_margin * (1.0 + vat / 100.0);

    Ok(SalePrice {
        base_price,
        price_with_margin,
        price_with_tax,
        recommended_price: round_up_to_half(price_with_tax),
    })
}
