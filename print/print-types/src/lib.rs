//! Canonical types shared by the print cost crates.
//!
//! Slicers describe the same job in very different dialects. This crate holds
//! the vendor-neutral shapes everything else converts into:
//!
//! - [`PlateRecord`] - One printable plate with its filament usage and time
//! - [`FilamentUsage`] - A filament profile consumed on a plate
//! - [`Vendor`] - The slicer that produced an archive
//! - [`MeshObject`] - A named triangle mesh used by the geometry fallback
//!
//! # Units
//!
//! Weights are grams, lengths are millimetres (filament length in metres),
//! times are hours and costs are in a single, unnamed currency.
//!
//! # Example
//!
//! ```
//! use print_types::{FilamentUsage, PlateRecord};
//!
//! let plate = PlateRecord::sliced(
//!     1,
//!     "Plate 1",
//!     vec![
//!         FilamentUsage::new("Generic PLA", "PLA", 20.0, 12.5),
//!         FilamentUsage::new("Generic PETG", "PETG", 25.0, 7.5),
//!     ],
//!     1.75,
//! );
//!
//! assert!((plate.total_weight_g - 20.0).abs() < 1e-12);
//! assert!((plate.material_cost() - 0.4375).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod mesh;
mod plate;
mod vendor;

pub use mesh::MeshObject;
pub use plate::{FilamentUsage, PlateOrigin, PlateRecord};
pub use vendor::Vendor;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
