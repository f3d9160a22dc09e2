//! Plate and filament usage records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A filament profile consumed on a plate.
///
/// Two usages refer to the same profile when both `profile_name` and
/// `cost_per_kg` match; see [`FilamentUsage::same_profile`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FilamentUsage {
    /// Profile name as configured in the slicer.
    pub profile_name: String,
    /// Material family (PLA, PETG, ...).
    pub filament_type: String,
    /// Display colour, usually `#RRGGBB`.
    pub color: Option<String>,
    /// Price per kilogram.
    pub cost_per_kg: f64,
    /// Consumed weight in grams.
    pub weight_g: f64,
    /// Extruded length in metres, when the slicer reports it.
    pub length_m: Option<f64>,
}

impl FilamentUsage {
    /// Create a usage without colour or length information.
    #[must_use]
    pub fn new(
        profile_name: impl Into<String>,
        filament_type: impl Into<String>,
        cost_per_kg: f64,
        weight_g: f64,
    ) -> Self {
        Self {
            profile_name: profile_name.into(),
            filament_type: filament_type.into(),
            color: None,
            cost_per_kg,
            weight_g,
            length_m: None,
        }
    }

    /// Set the display colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the extruded length in metres.
    #[must_use]
    pub const fn with_length_m(mut self, length_m: f64) -> Self {
        self.length_m = Some(length_m);
        self
    }

    /// Cost of the consumed filament.
    #[must_use]
    pub fn material_cost(&self) -> f64 {
        self.weight_g / 1000.0 * self.cost_per_kg
    }

    /// Whether `other` is the same profile (same name and price).
    #[must_use]
    #[allow(clippy::float_cmp)] // identity key, compared bit-for-bit on purpose
    pub fn same_profile(&self, other: &Self) -> bool {
        self.profile_name == other.profile_name && self.cost_per_kg == other.cost_per_kg
    }
}

/// Where a plate's figures come from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PlateOrigin {
    /// Figures computed by the slicer.
    #[default]
    Slicer,
    /// Approximation derived from raw mesh geometry.
    Geometry {
        /// Enclosed mesh volume in mm³.
        volume_mm3: f64,
        /// Mesh surface area in mm².
        surface_area_mm2: f64,
    },
}

/// One printable plate (or object) found in an archive.
///
/// For sliced plates `total_weight_g` equals the sum of the filament
/// weights; geometry estimates carry a standalone weight and no filaments.
///
/// # Example
///
/// ```
/// use print_types::{FilamentUsage, PlateRecord};
///
/// let plate = PlateRecord::sliced(2, "Brackets", vec![FilamentUsage::new("PLA", "PLA", 20.0, 40.0)], 2.5)
///     .with_layer_height(0.2);
///
/// assert_eq!(plate.layer_height_mm, Some(0.2));
/// assert_eq!(plate.infill_percent, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlateRecord {
    /// Plate index or object id within the archive.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Filaments consumed on this plate.
    pub filaments: Vec<FilamentUsage>,
    /// Print time in hours.
    pub print_time_hours: f64,
    /// Total weight in grams.
    pub total_weight_g: f64,
    /// Layer height in mm, if known.
    pub layer_height_mm: Option<f64>,
    /// Nozzle diameter in mm, if known.
    pub nozzle_diameter_mm: Option<f64>,
    /// Sparse infill in percent, if known.
    pub infill_percent: Option<f64>,
    /// Slicer figures or geometry approximation.
    pub origin: PlateOrigin,
}

impl PlateRecord {
    /// Create a plate from slicer output. The total weight is the filament sum.
    #[must_use]
    pub fn sliced(
        id: u32,
        name: impl Into<String>,
        filaments: Vec<FilamentUsage>,
        print_time_hours: f64,
    ) -> Self {
        let total_weight_g = filaments.iter().map(|f| f.weight_g).sum();
        Self {
            id,
            name: name.into(),
            filaments,
            print_time_hours,
            total_weight_g,
            layer_height_mm: None,
            nozzle_diameter_mm: None,
            infill_percent: None,
            origin: PlateOrigin::Slicer,
        }
    }

    /// Create a plate from slicer output that reports a weight but no filaments.
    #[must_use]
    pub fn sliced_without_filaments(
        id: u32,
        name: impl Into<String>,
        total_weight_g: f64,
        print_time_hours: f64,
    ) -> Self {
        Self {
            total_weight_g,
            ..Self::sliced(id, name, Vec::new(), print_time_hours)
        }
    }

    /// Create a plate approximated from mesh geometry.
    #[must_use]
    pub fn estimated(
        id: u32,
        name: impl Into<String>,
        total_weight_g: f64,
        print_time_hours: f64,
        volume_mm3: f64,
        surface_area_mm2: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            filaments: Vec::new(),
            print_time_hours,
            total_weight_g,
            layer_height_mm: None,
            nozzle_diameter_mm: None,
            infill_percent: None,
            origin: PlateOrigin::Geometry {
                volume_mm3,
                surface_area_mm2,
            },
        }
    }

    /// Set the layer height.
    #[must_use]
    pub const fn with_layer_height(mut self, mm: f64) -> Self {
        self.layer_height_mm = Some(mm);
        self
    }

    /// Set the layer height if known.
    #[must_use]
    pub const fn with_layer_height_opt(mut self, mm: Option<f64>) -> Self {
        self.layer_height_mm = mm;
        self
    }

    /// Set the nozzle diameter if known.
    #[must_use]
    pub const fn with_nozzle_diameter_opt(mut self, mm: Option<f64>) -> Self {
        self.nozzle_diameter_mm = mm;
        self
    }

    /// Set the infill percentage if known.
    #[must_use]
    pub const fn with_infill_opt(mut self, percent: Option<f64>) -> Self {
        self.infill_percent = percent;
        self
    }

    /// Cost of all filaments on this plate.
    ///
    /// Geometry estimates have no priced filament and return zero.
    #[must_use]
    pub fn material_cost(&self) -> f64 {
        self.filaments.iter().map(FilamentUsage::material_cost).sum()
    }

    /// Whether the figures are a geometry approximation.
    #[must_use]
    pub const fn is_estimated(&self) -> bool {
        matches!(self.origin, PlateOrigin::Geometry { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sliced_total_is_filament_sum() {
        let plate = PlateRecord::sliced(
            1,
            "Plate 1",
            vec![
                FilamentUsage::new("A", "PLA", 20.0, 10.25),
                FilamentUsage::new("B", "PETG", 30.0, 4.75),
            ],
            1.0,
        );
        assert_relative_eq!(plate.total_weight_g, 15.0);
        assert!(!plate.is_estimated());
    }

    #[test]
    fn material_cost_per_kg() {
        let usage = FilamentUsage::new("A", "PLA", 25.0, 500.0);
        assert_relative_eq!(usage.material_cost(), 12.5);
    }

    #[test]
    fn same_profile_uses_name_and_cost() {
        let a = FilamentUsage::new("Generic PLA", "PLA", 20.0, 1.0);
        let b = FilamentUsage::new("Generic PLA", "PLA", 20.0, 9.0).with_color("#FF0000");
        let c = FilamentUsage::new("Generic PLA", "PLA", 22.0, 1.0);
        assert!(a.same_profile(&b));
        assert!(!a.same_profile(&c));
    }

    #[test]
    fn estimated_plate_keeps_standalone_weight() {
        let plate = PlateRecord::estimated(3, "Cube", 12.0, 0.5, 1000.0, 600.0);
        assert!(plate.filaments.is_empty());
        assert_relative_eq!(plate.total_weight_g, 12.0);
        assert_relative_eq!(plate.material_cost(), 0.0);
        assert!(plate.is_estimated());
    }

    #[test]
    fn weight_only_plate() {
        let plate = PlateRecord::sliced_without_filaments(1, "Plate", 42.0, 2.0);
        assert_relative_eq!(plate.total_weight_g, 42.0);
        assert_eq!(plate.origin, PlateOrigin::Slicer);
    }

    #[test]
    fn optional_fields_stay_unset() {
        let plate = PlateRecord::sliced(1, "P", Vec::new(), 0.0)
            .with_layer_height_opt(None)
            .with_nozzle_diameter_opt(Some(0.4));
        assert_eq!(plate.layer_height_mm, None);
        assert_eq!(plate.nozzle_diameter_mm, Some(0.4));
        assert_eq!(plate.infill_percent, None);
    }
}
