//! Approximate print weight and time from raw mesh geometry.
//!
//! When an archive carries meshes but no slicer output, this crate stands in
//! for the slicer: each closed mesh object is turned into a
//! [`PlateRecord`](print_types::PlateRecord) tagged with
//! [`PlateOrigin::Geometry`](print_types::PlateOrigin::Geometry).
//!
//! # Model
//!
//! - Shell: `min(volume, surface area × wall thickness)`
//! - Interior: remaining volume × infill
//! - Weight: deposited cm³ × mass factor (material independent)
//! - Time: deposited volume / throughput + layers × layer change overhead
//!
//! # Example
//!
//! ```
//! use print_estimate::{estimate_plates, EstimateParams};
//! use print_types::MeshObject;
//!
//! let meshes = vec![MeshObject::cube("Cube", 20.0)];
//! let plates = estimate_plates(&meshes, &EstimateParams::draft()).unwrap();
//! assert_eq!(plates.len(), 1);
//! assert!(plates[0].is_estimated());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod estimate;
mod params;

pub use error::{EstimateResult, GeometryError};
pub use estimate::{GeometryEstimate, estimate_object, estimate_plates};
pub use params::{EstimateParams, MIN_LAYER_HEIGHT_MM, MIN_THROUGHPUT_MM3_S};
