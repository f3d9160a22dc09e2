//! Pricing parameters supplied alongside the piece list.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::amortization::PrinterAsset;

/// A flat `cost_per_unit × quantity` cost line.
///
/// Used for additional materials (magnets, inserts, packaging) and for
/// post-processing work (sanding, painting).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LineItem {
    /// Display name.
    pub name: String,
    /// Cost of one unit.
    pub cost_per_unit: f64,
    /// Number of units, may be fractional (hours of labour).
    pub quantity: f64,
}

impl LineItem {
    /// Create a line item.
    #[must_use]
    pub fn new(name: impl Into<String>, cost_per_unit: f64, quantity: f64) -> Self {
        Self {
            name: name.into(),
            cost_per_unit,
            quantity,
        }
    }

    /// Line total.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost_per_unit * self.quantity
    }
}

/// Project-level single filament, kept for projects created before pieces
/// carried their own materials.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LegacyFilament {
    /// Filament weight in grams.
    pub weight_g: f64,
    /// Price per kilogram.
    pub price_per_kg: f64,
}

/// Everything besides the pieces that feeds a cost breakdown and a price.
///
/// # Example
///
/// ```
/// use print_cost::{LineItem, PricingInputs, PrinterAsset};
///
/// let inputs = PricingInputs::default()
///     .with_electricity(0.25, 0.12)
///     .with_printer(PrinterAsset::new(800.0, 4000.0, 120.0, 0.15))
///     .with_postprocessing(LineItem::new("Sanding", 12.0, 0.5))
///     .with_vat(21.0)
///     .with_margin(30.0);
///
/// // Selecting a printer uses its power draw and enables amortization.
/// assert!((inputs.printer_power_kw - 0.15).abs() < 1e-12);
/// assert!(inputs.include_amortization);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PricingInputs {
    /// Fallback filament used only when no piece carries material data.
    pub legacy_filament: LegacyFilament,
    /// Electricity price per kWh.
    pub electricity_cost_per_kwh: f64,
    /// Printer power draw in kW.
    pub printer_power_kw: f64,
    /// Additional material line items.
    pub materials: Vec<LineItem>,
    /// Post-processing line items.
    pub postprocessing: Vec<LineItem>,
    /// Printer whose purchase price is amortized.
    pub printer: Option<PrinterAsset>,
    /// Whether to fold amortization into the cost.
    pub include_amortization: bool,
    /// VAT in percent.
    pub vat_percent: f64,
    /// Profit margin in percent.
    pub profit_margin_percent: f64,
}

impl PricingInputs {
    /// Set the electricity price and printer power.
    #[must_use]
    pub fn with_electricity(mut self, cost_per_kwh: f64, printer_power_kw: f64) -> Self {
        self.electricity_cost_per_kwh = cost_per_kwh;
        self.printer_power_kw = printer_power_kw;
        self
    }

    /// Select a printer: uses its power draw and enables amortization.
    #[must_use]
    pub fn with_printer(mut self, printer: PrinterAsset) -> Self {
        self.printer_power_kw = printer.power_consumption_kw;
        self.printer = Some(printer);
        self.include_amortization = true;
        self
    }

    /// Enable or disable amortization.
    #[must_use]
    pub fn with_amortization(mut self, include: bool) -> Self {
        self.include_amortization = include;
        self
    }

    /// Set the project-level fallback filament.
    #[must_use]
    pub fn with_legacy_filament(mut self, weight_g: f64, price_per_kg: f64) -> Self {
        self.legacy_filament = LegacyFilament {
            weight_g,
            price_per_kg,
        };
        self
    }

    /// Add an additional material line.
    #[must_use]
    pub fn with_material(mut self, item: LineItem) -> Self {
        self.materials.push(item);
        self
    }

    /// Add a post-processing line.
    #[must_use]
    pub fn with_postprocessing(mut self, item: LineItem) -> Self {
        self.postprocessing.push(item);
        self
    }

    /// Set VAT.
    #[must_use]
    pub fn with_vat(mut self, percent: f64) -> Self {
        self.vat_percent = percent;
        self
    }

    /// Set the profit margin.
    #[must_use]
    pub fn with_margin(mut self, percent: f64) -> Self {
        self.profit_margin_percent = percent;
        self
    }

    /// Sum of all additional material and post-processing lines.
    #[must_use]
    pub fn line_items_cost(&self) -> f64 {
        self.materials
            .iter()
            .chain(&self.postprocessing)
            .map(LineItem::cost)
            .sum()
    }
}
