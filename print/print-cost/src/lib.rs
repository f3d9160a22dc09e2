//! Cost aggregation, pricing and printer amortization for 3D printed parts.
//!
//! Everything in this crate is a pure function of its inputs: no caching,
//! no hidden state, safe to call from any thread.
//!
//! # Features
//!
//! - **Cost breakdown**: Filament/resin, electricity, extra materials and
//!   printer amortization over a list of [`PieceRecord`]s
//! - **Pricing**: Margin and VAT waterfall with a recommended price rounded
//!   up to the next half unit
//! - **Amortization**: Per-hour cost, progress and remaining amount of a
//!   [`PrinterAsset`]
//! - **Units**: g/kg for filament, ml/L for resin
//!
//! # Example
//!
//! ```
//! use print_cost::{
//!     compute_cost_breakdown, compute_sale_price, MaterialItem, MaterialUnit, PieceRecord,
//!     PricingInputs,
//! };
//!
//! let pieces = vec![PieceRecord::new("p1", "Vase", 4.0, 1)
//!     .with_material(MaterialItem::filament("PLA", 500.0, MaterialUnit::G, 25.0))];
//! let inputs = PricingInputs::default().with_electricity(0.25, 0.12);
//!
//! let breakdown = compute_cost_breakdown(&pieces, &inputs).unwrap();
//! assert!((breakdown.filament - 12.5).abs() < 1e-12);
//!
//! let price = compute_sale_price(breakdown.total(), 21.0, 30.0).unwrap();
//! assert!(price.recommended_price >= price.price_with_tax);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod amortization;
mod breakdown;
mod error;
mod inputs;
mod piece;
mod pricing;
mod units;

pub use amortization::{AmortizationStatus, PrinterAsset};
pub use breakdown::{
    CostBreakdown, CostEstimate, PieceTotals, aggregate_pieces, amortization_cost,
    compute_cost_breakdown, electricity_cost, estimate_cost, validate_inputs,
};
pub use error::{CostError, CostResult};
pub use inputs::{LegacyFilament, LineItem, PricingInputs};
pub use piece::{MaterialCategory, MaterialItem, MaterialUsage, PieceMaterials, PieceRecord};
pub use pricing::{SalePrice, compute_sale_price, round_up_to_half};
pub use units::{BaseUnit, MaterialUnit};
