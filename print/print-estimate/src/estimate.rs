//! Weight and time approximation from mesh geometry.
//!
//! Used when an archive carries only raw mesh data and no slicer output.

// Layer counts are small and never negative
#![allow(clippy::cast_precision_loss)]

use print_types::{MeshObject, PlateRecord};
use tracing::{debug, info};

use crate::error::{EstimateResult, GeometryError};
use crate::params::EstimateParams;

const MM3_PER_CM3: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Geometry-derived figures for one mesh object.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryEstimate {
    /// Object id from the model file.
    pub object_id: u32,
    /// Object name.
    pub name: String,
    /// Enclosed volume in mm³.
    pub volume_mm3: f64,
    /// Surface area in mm².
    pub surface_area_mm2: f64,
    /// Volume that would actually be deposited (shell plus infill) in mm³.
    pub printed_volume_mm3: f64,
    /// Approximate weight in grams.
    pub weight_g: f64,
    /// Approximate print time in hours.
    pub print_time_hours: f64,
    /// Number of layers at the effective layer height.
    pub layer_count: u64,
    /// Effective (clamped) layer height in mm.
    pub layer_height_mm: f64,
    /// Effective (clamped) infill in percent.
    pub infill_percent: f64,
}

impl GeometryEstimate {
    /// Convert into a plate record tagged with its geometry origin.
    #[must_use]
    pub fn into_plate(self) -> PlateRecord {
        PlateRecord::estimated(
            self.object_id,
            self.name,
            self.weight_g,
            self.print_time_hours,
            self.volume_mm3,
            self.surface_area_mm2,
        )
        .with_layer_height(self.layer_height_mm)
        .with_infill_opt(Some(self.infill_percent))
    }
}

/// Estimate weight and print time for a single mesh object.
///
/// The deposited volume is a solid shell of `wall_thickness_mm` over the
/// surface (never more than the whole volume) plus the remaining interior
/// filled at `infill_percent`. Parameters are clamped before use.
///
/// # Errors
///
/// - [`GeometryError::InvalidFaceIndex`] if a face points past the vertex list.
/// - [`GeometryError::DegenerateMesh`] if the signed volume is zero,
///   negative or not finite.
///
/// # Example
///
/// ```
/// use print_estimate::{estimate_object, EstimateParams};
/// use print_types::MeshObject;
///
/// let cube = MeshObject::cube("Cube", 20.0);
/// let estimate = estimate_object(&cube, &EstimateParams::default()).unwrap();
/// assert!((estimate.volume_mm3 - 8000.0).abs() < 1e-6);
/// assert!(estimate.weight_g > 0.0);
/// ```
pub fn estimate_object(
    mesh: &MeshObject,
    params: &EstimateParams,
) -> EstimateResult<GeometryEstimate> {
    if let Some(face) = mesh.first_invalid_face() {
        return Err(GeometryError::InvalidFaceIndex {
            object: mesh.name.clone(),
            face,
        });
    }

    let volume = mesh.signed_volume();
    if !volume.is_finite() || volume <= 0.0 {
        return Err(GeometryError::degenerate(mesh.name.clone(), volume));
    }

    let params = params.clamped();
    let area = mesh.surface_area();

    let shell = volume.min(area * params.wall_thickness_mm);
    let interior = volume - shell;
    let printed = interior.mul_add(params.infill_percent / 100.0, shell);

    let layer_count = layer_count(mesh.height(), params.layer_height_mm);
    let seconds = (layer_count as f64)
        .mul_add(params.layer_change_s, printed / params.throughput_mm3_s);

    let weight_g = (printed / MM3_PER_CM3 * params.grams_per_cm3).max(0.0);
    let print_time_hours = (seconds / SECONDS_PER_HOUR).max(0.0);

    debug!(
        object = %mesh.name,
        volume = format!("{volume:.1}"),
        area = format!("{area:.1}"),
        printed = format!("{printed:.1}"),
        layers = layer_count,
        "Estimated object from geometry"
    );

    Ok(GeometryEstimate {
        object_id: mesh.id,
        name: mesh.name.clone(),
        volume_mm3: volume,
        surface_area_mm2: area,
        printed_volume_mm3: printed,
        weight_g,
        print_time_hours,
        layer_count,
        layer_height_mm: params.layer_height_mm,
        infill_percent: params.infill_percent,
    })
}

/// Estimate one plate per mesh object.
///
/// # Errors
///
/// Returns [`GeometryError::NoMeshObjects`] for an empty slice, or the first
/// error from [`estimate_object`].
pub fn estimate_plates(
    meshes: &[MeshObject],
    params: &EstimateParams,
) -> EstimateResult<Vec<PlateRecord>> {
    if meshes.is_empty() {
        return Err(GeometryError::NoMeshObjects);
    }

    let plates = meshes
        .iter()
        .map(|mesh| estimate_object(mesh, params).map(GeometryEstimate::into_plate))
        .collect::<EstimateResult<Vec<_>>>()?;

    info!(
        objects = plates.len(),
        weight_g = format!("{:.2}", plates.iter().map(|p| p.total_weight_g).sum::<f64>()),
        "Geometry estimate complete"
    );

    Ok(plates)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn layer_count(height: f64, layer_height: f64) -> u64 {
    if height > 0.0 && layer_height > 0.0 {
        (height / layer_height).ceil() as u64
    } else {
        0
    }
}
