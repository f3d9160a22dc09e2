//! Cost aggregation over a piece hierarchy.
//!
//! Turns pieces, their materials and the pricing parameters into a
//! [`CostBreakdown`]. Every call recomputes from scratch; identical inputs
//! give bit-identical output.
//!
//! # Negative values
//!
//! Negative weights, prices and hours are accepted and flow through the
//! arithmetic unchanged. Rejecting them is the job of the form or API layer
//! that builds the inputs. Only NaN and infinities are refused here because
//! they would poison every total, along with a selected printer whose
//! amortization budget is zero or negative.

use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::amortization::PrinterAsset;
use crate::error::{CostError, CostResult, ensure_finite};
use crate::inputs::{LegacyFilament, PricingInputs};
use crate::piece::{MaterialUsage, PieceRecord};

/// Cost split by origin.
///
/// The total is derived on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CostBreakdown {
    /// Filament and resin cost.
    pub filament: f64,
    /// Electricity used while printing.
    pub electricity: f64,
    /// Additional materials and post-processing.
    pub materials: f64,
    /// Printer amortization.
    pub amortization: f64,
}

impl CostBreakdown {
    /// Sum of all four components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.filament + self.electricity + self.materials + self.amortization
    }
}

/// Material quantities and print time summed over all pieces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PieceTotals {
    /// Mass-measured material in grams.
    pub filament_g: f64,
    /// Volume-measured material in millilitres.
    pub resin_ml: f64,
    /// Print hours including quantities.
    pub print_hours: f64,
    /// Filament and resin cost.
    pub material_cost: f64,
    /// Whether the project-level fallback filament was used.
    pub used_project_fallback: bool,
}

impl PieceTotals {
    /// Filament grams plus resin millilitres.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.filament_g + self.resin_ml
    }
}

/// A breakdown together with the totals it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CostEstimate {
    /// Summed quantities.
    pub totals: PieceTotals,
    /// Cost split.
    pub breakdown: CostBreakdown,
}

/// Sum material usage and print time over `pieces`.
///
/// Each piece uses its material list, or its own legacy filament fields when
/// the list is empty. The project-level `legacy` filament replaces the piece
/// contributions only when no piece carries any material data (including an
/// empty piece list).
#[must_use]
pub fn aggregate_pieces(pieces: &[PieceRecord], legacy: &LegacyFilament) -> PieceTotals {
    let used_project_fallback = pieces.iter().all(PieceRecord::has_no_material_data);

    let mut usage = MaterialUsage::default();
    let mut print_hours = 0.0;
    for piece in pieces {
        usage += piece.usage();
        print_hours += piece.total_print_hours();
    }

    if used_project_fallback {
        usage = MaterialUsage::legacy(legacy.weight_g, legacy.price_per_kg);
    }

    PieceTotals {
        filament_g: usage.filament_g,
        resin_ml: usage.resin_ml,
        print_hours,
        material_cost: usage.cost,
        used_project_fallback,
    }
}

/// Electricity cost of printing for `hours` at `power_kw`.
#[must_use]
pub fn electricity_cost(hours: f64, power_kw: f64, cost_per_kwh: f64) -> f64 {
    hours * power_kw * cost_per_kwh
}

/// Amortization share of `hours` of printing.
///
/// Zero unless a printer is selected, amortization is requested, the printer
/// has a purchase price and its usage budget is not exhausted.
#[must_use]
pub fn amortization_cost(printer: Option<&PrinterAsset>, include: bool, hours: f64) -> f64 {
    match printer {
        Some(printer)
            if include && printer.purchase_price > 0.0 && !printer.is_fully_amortized() =>
        {
            printer.cost_per_hour() * hours
        }
        _ => 0.0,
    }
}

/// Check that every numeric input is finite.
///
/// # Errors
///
/// - [`CostError::NonFinite`] naming the first NaN or infinite value.
/// - [`CostError::NotPositive`] if a selected printer has
///   `amortization_hours <= 0`.
pub fn validate_inputs(pieces: &[PieceRecord], inputs: &PricingInputs) -> CostResult<()> {
    for (i, piece) in pieces.iter().enumerate() {
        ensure_finite(&format!("pieces[{i}].print_hours"), piece.print_hours)?;
        ensure_finite(&format!("pieces[{i}].filament_weight"), piece.filament_weight)?;
        ensure_finite(&format!("pieces[{i}].filament_price"), piece.filament_price)?;
        for (j, item) in piece.materials.iter().enumerate() {
            ensure_finite(&format!("pieces[{i}].materials[{j}].weight"), item.weight)?;
            ensure_finite(
                &format!("pieces[{i}].materials[{j}].price_per_kg"),
                item.price_per_kg,
            )?;
        }
    }

    ensure_finite("legacy_filament.weight_g", inputs.legacy_filament.weight_g)?;
    ensure_finite(
        "legacy_filament.price_per_kg",
        inputs.legacy_filament.price_per_kg,
    )?;
    ensure_finite("electricity_cost_per_kwh", inputs.electricity_cost_per_kwh)?;
    ensure_finite("printer_power_kw", inputs.printer_power_kw)?;

    for (list, items) in [
        ("materials", &inputs.materials),
        ("postprocessing", &inputs.postprocessing),
    ] {
        for (i, item) in items.iter().enumerate() {
            ensure_finite(&format!("{list}[{i}].cost_per_unit"), item.cost_per_unit)?;
            ensure_finite(&format!("{list}[{i}].quantity"), item.quantity)?;
        }
    }

    if let Some(printer) = &inputs.printer {
        ensure_finite("printer.purchase_price", printer.purchase_price)?;
        ensure_finite("printer.amortization_hours", printer.amortization_hours)?;
        ensure_finite("printer.current_usage_hours", printer.current_usage_hours)?;
        if printer.amortization_hours <= 0.0 {
            return Err(CostError::not_positive(
                "printer.amortization_hours",
                printer.amortization_hours,
            ));
        }
    }

    Ok(())
}

/// Compute totals and the cost breakdown.
///
/// # Errors
///
/// See [`validate_inputs`].
pub fn estimate_cost(pieces: &[PieceRecord], inputs: &PricingInputs) -> CostResult<CostEstimate> {
    validate_inputs(pieces, inputs)?;

    let totals = aggregate_pieces(pieces, &inputs.legacy_filament);
    let breakdown = CostBreakdown {
        filament: totals.material_cost,
        electricity: electricity_cost(
            totals.print_hours,
            inputs.printer_power_kw,
            inputs.electricity_cost_per_kwh,
        ),
        materials: inputs.line_items_cost(),
        amortization: amortization_cost(
            inputs.printer.as_ref(),
            inputs.include_amortization,
            totals.print_hours,
        ),
    };

    debug!(
        pieces = pieces.len(),
        weight = totals.total_weight(),
        print_hours = totals.print_hours,
        total = breakdown.total(),
        project_fallback = totals.used_project_fallback,
        "Computed cost breakdown"
    );

    Ok(CostEstimate { totals, breakdown })
}

/// Compute the cost breakdown of `pieces`.
///
/// # Errors
///
/// See [`validate_inputs`].
///
/// # Example
///
/// ```
/// use print_cost::{compute_cost_breakdown, MaterialItem, MaterialUnit, PieceRecord, PricingInputs};
///
/// let pieces = vec![
///     PieceRecord::new("a", "A", 2.0, 2)
///         .with_material(MaterialItem::filament("PLA", 100.0, MaterialUnit::G, 25.0)),
///     PieceRecord::new("b", "B", 1.0, 1)
///         .with_material(MaterialItem::filament("PETG", 150.0, MaterialUnit::G, 30.0)),
/// ];
/// let inputs = PricingInputs::default().with_electricity(0.2, 0.1);
///
/// let breakdown = compute_cost_breakdown(&pieces, &inputs).unwrap();
/// assert!((breakdown.filament - 9.5).abs() < 1e-12);
/// assert!((breakdown.electricity - 0.1).abs() < 1e-12);
/// ```
pub fn compute_cost_breakdown(
    pieces: &[PieceRecord],
    inputs: &PricingInputs,
) -> CostResult<CostBreakdown> {
    estimate_cost(pieces, inputs).map(|estimate| estimate.breakdown)
}
