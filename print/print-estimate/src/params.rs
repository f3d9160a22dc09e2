//! Default slicing assumptions for geometry estimates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest layer height an estimate will use, in mm.
pub const MIN_LAYER_HEIGHT_MM: f64 = 0.1;

/// Smallest volumetric throughput an estimate will use, in mm³/s.
pub const MIN_THROUGHPUT_MM3_S: f64 = 0.1;

/// Assumptions used to turn mesh geometry into weight and time.
///
/// These stand in for a real slicer. They are deliberately coarse: the
/// weight uses a single mass factor regardless of the eventual material and
/// the time is driven by a constant volumetric throughput.
///
/// # Example
///
/// ```
/// use print_estimate::EstimateParams;
///
/// let params = EstimateParams::default().with_infill(35.0);
/// assert!((params.layer_height_mm - 0.2).abs() < f64::EPSILON);
/// assert!((params.infill_percent - 35.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct EstimateParams {
    /// Layer height in mm.
    pub layer_height_mm: f64,

    /// Sparse infill density in percent (0-100).
    pub infill_percent: f64,

    /// Solid shell thickness in mm (perimeters and top/bottom skins).
    pub wall_thickness_mm: f64,

    /// Mass of one printed cm³ in grams.
    pub grams_per_cm3: f64,

    /// Deposited volume per second in mm³/s.
    pub throughput_mm3_s: f64,

    /// Overhead per layer change in seconds.
    pub layer_change_s: f64,
}

impl Default for EstimateParams {
    fn default() -> Self {
        Self {
            layer_height_mm: 0.2,
            infill_percent: 20.0,
            wall_thickness_mm: 0.8,
            grams_per_cm3: 1.24,
            throughput_mm3_s: 8.0,
            layer_change_s: 1.5,
        }
    }
}

impl EstimateParams {
    /// Assumptions for fine detail printing.
    ///
    /// Uses 0.12mm layers and a lower throughput.
    #[must_use]
    pub fn fine() -> Self {
        Self {
            layer_height_mm: 0.12,
            infill_percent: 15.0,
            throughput_mm3_s: 5.0,
            ..Default::default()
        }
    }

    /// Assumptions for fast draft printing.
    ///
    /// Uses 0.28mm layers, thinner walls and a higher throughput.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            layer_height_mm: 0.28,
            infill_percent: 15.0,
            wall_thickness_mm: 0.6,
            throughput_mm3_s: 14.0,
            ..Default::default()
        }
    }

    /// Set layer height.
    #[must_use]
    pub const fn with_layer_height(mut self, mm: f64) -> Self {
        self.layer_height_mm = mm;
        self
    }

    /// Set infill percentage.
    #[must_use]
    pub const fn with_infill(mut self, percent: f64) -> Self {
        self.infill_percent = percent;
        self
    }

    /// Set shell thickness.
    #[must_use]
    pub const fn with_wall_thickness(mut self, mm: f64) -> Self {
        self.wall_thickness_mm = mm;
        self
    }

    /// Set the mass factor.
    #[must_use]
    pub const fn with_grams_per_cm3(mut self, grams: f64) -> Self {
        self.grams_per_cm3 = grams;
        self
    }

    /// Set the volumetric throughput.
    #[must_use]
    pub const fn with_throughput(mut self, mm3_per_s: f64) -> Self {
        self.throughput_mm3_s = mm3_per_s;
        self
    }

    /// Copy with every value pulled into its valid range.
    ///
    /// NaN and out-of-range values go to the nearest bound: layer height
    /// ≥ 0.1, infill within 0-100, throughput ≥ 0.1, everything else ≥ 0.
    #[must_use]
    pub fn clamped(&self) -> Self {
        // f64::max/min return the other operand for NaN
        Self {
            layer_height_mm: self.layer_height_mm.max(MIN_LAYER_HEIGHT_MM),
            infill_percent: self.infill_percent.max(0.0).min(100.0),
            wall_thickness_mm: self.wall_thickness_mm.max(0.0),
            grams_per_cm3: self.grams_per_cm3.max(0.0),
            throughput_mm3_s: self.throughput_mm3_s.max(MIN_THROUGHPUT_MM3_S),
            layer_change_s: self.layer_change_s.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = EstimateParams::default();
        assert!((params.layer_height_mm - 0.2).abs() < f64::EPSILON);
        assert!((params.infill_percent - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_presets() {
        assert!(EstimateParams::fine().layer_height_mm < EstimateParams::default().layer_height_mm);
        assert!(EstimateParams::draft().throughput_mm3_s > EstimateParams::default().throughput_mm3_s);
    }

    #[test]
    fn test_clamp_low_values() {
        let params = EstimateParams::default()
            .with_layer_height(0.01)
            .with_infill(-5.0)
            .with_throughput(0.0)
            .clamped();
        assert!((params.layer_height_mm - 0.1).abs() < f64::EPSILON);
        assert!(params.infill_percent.abs() < f64::EPSILON);
        assert!((params.throughput_mm3_s - MIN_THROUGHPUT_MM3_S).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_nan_and_high_values() {
        let params = EstimateParams::default()
            .with_layer_height(f64::NAN)
            .with_infill(250.0)
            .with_wall_thickness(f64::NAN)
            .clamped();
        assert!((params.layer_height_mm - 0.1).abs() < f64::EPSILON);
        assert!((params.infill_percent - 100.0).abs() < f64::EPSILON);
        assert!(params.wall_thickness_mm.abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_keeps_valid_values() {
        let params = EstimateParams::default();
        assert_eq!(params.clamped(), params);
    }
}
