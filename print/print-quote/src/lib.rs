//! Quote 3D prints from slicer archives or hand-entered pieces.
//!
//! This umbrella crate re-exports the print-* crates and adds [`quote`], which
//! runs the whole cost pipeline (totals, breakdown, sale price) in one call.
//!
//! # Quick Start
//!
//! ```no_run
//! use print_quote::prelude::*;
//!
//! let summary = load_print_archive("benchy.gcode.3mf").unwrap();
//! let inputs = PricingInputs::default()
//!     .with_electricity(0.25, 0.15)
//!     .with_vat(21.0)
//!     .with_margin(30.0);
//!
//! let quote = print_quote::quote_archive(&summary, &inputs).unwrap();
//! println!("{:.2} -> {:.2}", quote.breakdown.total(), quote.sale_price.recommended_price);
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Plates, filament usage, vendors and meshes
//! - [`archive`] - ZIP container reading and vendor normalization
//! - [`estimate`] - Weight and time estimates from mesh geometry
//! - [`cost`] - Cost breakdown, pricing and printer amortization
//!
//! # Feature Flags
//!
//! - `serde` - `Serialize`/`Deserialize` on all public data types
//! - `tokio` - Async archive loading via `tokio::fs`

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// Re-exports
// =============================================================================

/// Plates, filament usage, vendors and meshes.
pub use print_types as types;

/// ZIP container reading and vendor normalization.
pub use print_archive as archive;

/// Weight and time estimates from mesh geometry.
pub use print_estimate as estimate;

/// Cost breakdown, pricing and printer amortization.
pub use print_cost as cost;

use print_archive::PrintArchiveSummary;
use print_cost::{
    CostBreakdown, CostResult, PieceRecord, PieceTotals, PricingInputs, SalePrice,
    compute_sale_price, estimate_cost,
};

// =============================================================================
// Quote
// =============================================================================

/// Everything a quote shows: quantities, cost split and sale price.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Quote {
    /// Material quantities and print time.
    pub totals: PieceTotals,
    /// Cost split by origin.
    pub breakdown: CostBreakdown,
    /// Price waterfall from the breakdown total.
    pub sale_price: SalePrice,
}

/// Price `pieces` with the VAT and margin from `inputs`.
///
/// # Errors
///
/// Returns [`CostError::NonFinite`](print_cost::CostError::NonFinite) if any
/// input is NaN or infinite.
///
/// # Example
///
/// ```
/// use print_quote::cost::{MaterialItem, MaterialUnit, PieceRecord, PricingInputs};
/// use print_quote::quote;
///
/// let pieces = vec![PieceRecord::new("p1", "Vase", 4.0, 1)
///     .with_material(MaterialItem::filament("PLA", 500.0, MaterialUnit::G, 25.0))];
/// let inputs = PricingInputs::default().with_vat(21.0).with_margin(25.0);
///
/// let quote = quote(&pieces, &inputs).unwrap();
/// assert!((quote.breakdown.filament - 12.5).abs() < 1e-12);
/// assert!(quote.sale_price.recommended_price >= quote.sale_price.price_with_tax);
/// ```
pub fn quote(pieces: &[PieceRecord], inputs: &PricingInputs) -> CostResult<Quote> {
    let estimate = estimate_cost(pieces, inputs)?;
    let sale_price = compute_sale_price(
        estimate.breakdown.total(),
        inputs.vat_percent,
        inputs.profit_margin_percent,
    )?;

    debug!(
        pieces = pieces.len(),
        total = estimate.breakdown.total(),
        recommended = sale_price.recommended_price,
        "Built quote"
    );

    Ok(Quote {
        totals: estimate.totals,
        breakdown: estimate.breakdown,
        sale_price,
    })
}

/// Price every plate of a parsed archive, one piece per plate.
///
/// # Errors
///
/// See [`quote`].
pub fn quote_archive(summary: &PrintArchiveSummary, inputs: &PricingInputs) -> CostResult<Quote> {
    quote(&summary.to_pieces(), inputs)
}

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for quoting.
///
/// ```
/// use print_quote::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Quote, quote, quote_archive};

    // Types
    pub use print_types::{FilamentUsage, MeshObject, PlateRecord, Vendor};

    // Archive
    pub use print_archive::{
        ArchiveError, ArchiveOptions, MachineRates, PrintArchiveSummary, load_print_archive,
        parse_print_archive, parse_print_archive_with,
    };

    // Estimate
    pub use print_estimate::{EstimateParams, estimate_object};

    // Cost
    pub use print_cost::{
        CostBreakdown, MaterialItem, MaterialUnit, PieceRecord, PricingInputs, PrinterAsset,
        SalePrice, compute_cost_breakdown, compute_sale_price,
    };
}

// =============================================================================
// Tests
// =============================================================================
