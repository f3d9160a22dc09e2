//! Printer amortization.
//!
//! A printer's purchase price is spread over a budget of usage hours. Every
//! printed hour recovers `purchase_price / amortization_hours` until the
//! budget is used up.
//!
//! All functions require `amortization_hours > 0`. A zero or negative budget
//! is a caller bug and trips a debug assertion.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A printer whose purchase cost is recovered per printed hour.
///
/// # Example
///
/// ```
/// use print_cost::PrinterAsset;
///
/// let printer = PrinterAsset::new(1000.0, 2000.0, 500.0, 0.2);
/// assert!((printer.cost_per_hour() - 0.5).abs() < 1e-12);
/// assert!((printer.progress_percent() - 25.0).abs() < 1e-12);
/// assert!((printer.remaining_amount() - 750.0).abs() < 1e-12);
/// assert!(!printer.is_fully_amortized());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PrinterAsset {
    /// Purchase price.
    pub purchase_price: f64,
    /// Usage hours over which the price is recovered.
    pub amortization_hours: f64,
    /// Hours already printed.
    pub current_usage_hours: f64,
    /// Power draw while printing, in kW.
    pub power_consumption_kw: f64,
}

impl PrinterAsset {
    /// Create a printer asset.
    #[must_use]
    pub const fn new(
        purchase_price: f64,
        amortization_hours: f64,
        current_usage_hours: f64,
        power_consumption_kw: f64,
    ) -> Self {
        Self {
            purchase_price,
            amortization_hours,
            current_usage_hours,
            power_consumption_kw,
        }
    }

    /// The same printer after `hours` more printing.
    #[must_use]
    pub fn with_usage(mut self, hours: f64) -> Self {
        self.current_usage_hours += hours;
        self
    }

    /// Purchase price recovered per printed hour.
    #[must_use]
    pub fn cost_per_hour(&self) -> f64 {
        cost_per_hour(self)
    }

    /// Usage as a percentage of the amortization budget, unclamped.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self)
    }

    /// Purchase price not yet recovered, never negative.
    #[must_use]
    pub fn remaining_amount(&self) -> f64 {
        remaining_amount(self)
    }

    /// Whether the usage budget is used up.
    #[must_use]
    pub fn is_fully_amortized(&self) -> bool {
        is_fully_amortized(self)
    }

    /// All amortization figures at once.
    #[must_use]
    pub fn status(&self) -> AmortizationStatus {
        AmortizationStatus::of(self)
    }
}

/// Purchase price recovered per printed hour.
#[must_use]
pub fn cost_per_hour(asset: &PrinterAsset) -> f64 {
    debug_assert!(
        asset.amortization_hours > 0.0,
        "amortization_hours must be positive, got {}",
        asset.amortization_hours
    );
    asset.purchase_price / asset.amortization_hours
}

/// Usage as a percentage of the amortization budget.
///
/// The raw ratio is returned; values above 100 are possible once the budget
/// is exceeded and must be clamped by the caller for display.
#[must_use]
pub fn progress_percent(asset: &PrinterAsset) -> f64 {
    debug_assert!(
        asset.amortization_hours > 0.0,
        "amortization_hours must be positive, got {}",
        asset.amortization_hours
    );
    asset.current_usage_hours / asset.amortization_hours * 100.0
}

/// Purchase price not yet recovered.
#[must_use]
pub fn remaining_amount(asset: &PrinterAsset) -> f64 {
    let recovered = asset.current_usage_hours * cost_per_hour(asset);
    (asset.purchase_price - recovered).max(0.0)
}

/// Whether `current_usage_hours` has reached `amortization_hours`.
#[must_use]
pub fn is_fully_amortized(asset: &PrinterAsset) -> bool {
    asset.current_usage_hours >= asset.amortization_hours
}

/// Amortization figures of a printer at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AmortizationStatus {
    /// Purchase price recovered per printed hour.
    pub cost_per_hour: f64,
    /// Unclamped usage percentage.
    pub progress_percent: f64,
    /// Purchase price not yet recovered.
    pub remaining_amount: f64,
    /// Whether the budget is used up.
    pub fully_amortized: bool,
}

impl AmortizationStatus {
    /// Compute the status of `asset`.
    #[must_use]
    pub fn of(asset: &PrinterAsset) -> Self {
        Self {
            cost_per_hour: cost_per_hour(asset),
            progress_percent: progress_percent(asset),
            remaining_amount: remaining_amount(asset),
            fully_amortized: is_fully_amortized(asset),
        }
    }

    /// Progress clamped to `0..=100` for display.
    #[must_use]
    pub fn display_progress(&self) -> f64 {
        self.progress_percent.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn half_unit_per_hour() {
        let printer = PrinterAsset::new(1000.0, 2000.0, 500.0, 0.15);
        let status = printer.status();
        assert_relative_eq!(status.cost_per_hour, 0.5);
        assert_relative_eq!(status.progress_percent, 25.0);
        assert_relative_eq!(status.remaining_amount, 750.0);
        assert!(!status.fully_amortized);
    }

    #[test]
    fn over_budget_progress_is_unclamped() {
        let printer = PrinterAsset::new(600.0, 1000.0, 1500.0, 0.1);
        assert_relative_eq!(printer.progress_percent(), 150.0);
        assert_relative_eq!(printer.status().display_progress(), 100.0);
        assert_relative_eq!(printer.remaining_amount(), 0.0);
        assert!(printer.is_fully_amortized());
    }

    #[test]
    fn exactly_at_budget_is_fully_amortized() {
        let printer = PrinterAsset::new(600.0, 1000.0, 1000.0, 0.1);
        assert!(printer.is_fully_amortized());
        assert_relative_eq!(printer.remaining_amount(), 0.0);
    }

    #[test]
    fn with_usage_accumulates() {
        let printer = PrinterAsset::new(600.0, 1000.0, 100.0, 0.1).with_usage(150.0);
        assert_relative_eq!(printer.current_usage_hours, 250.0);
        assert_relative_eq!(printer.remaining_amount(), 450.0);
    }

    #[test]
    fn free_printer_costs_nothing() {
        let printer = PrinterAsset::new(0.0, 1000.0, 10.0, 0.1);
        assert_relative_eq!(printer.cost_per_hour(), 0.0);
        assert_relative_eq!(printer.remaining_amount(), 0.0);
    }
}
