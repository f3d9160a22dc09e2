//! Archive parsing options.

use std::f64::consts::PI;

use print_cost::electricity_cost;
use print_estimate::EstimateParams;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Printer power draw and electricity price used for the summary's
/// machine cost.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct MachineRates {
    /// Average printer power draw in kW.
    pub printer_power_kw: f64,
    /// Electricity price per kWh.
    pub electricity_cost_per_kwh: f64,
}

impl Default for MachineRates {
    fn default() -> Self {
        Self {
            printer_power_kw: 0.15,
            electricity_cost_per_kwh: 0.25,
        }
    }
}

impl MachineRates {
    /// Create machine rates.
    #[must_use]
    pub const fn new(printer_power_kw: f64, electricity_cost_per_kwh: f64) -> Self {
        Self {
            printer_power_kw,
            electricity_cost_per_kwh,
        }
    }

    /// Electricity cost of running the printer for `hours`.
    #[must_use]
    pub fn cost_for_hours(&self, hours: f64) -> f64 {
        electricity_cost(hours, self.printer_power_kw, self.electricity_cost_per_kwh)
    }
}

/// Filament assumptions for converting Cura's extruded length to weight.
///
/// Cura reports metres of filament, not grams.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct CuraFilamentDefaults {
    /// Filament diameter in mm.
    pub diameter_mm: f64,
    /// Filament density in g/cm³.
    pub density_g_cm3: f64,
}

impl Default for CuraFilamentDefaults {
    fn default() -> Self {
        Self {
            diameter_mm: 1.75,
            density_g_cm3: 1.24,
        }
    }
}

impl CuraFilamentDefaults {
    /// Create filament defaults.
    #[must_use]
    pub const fn new(diameter_mm: f64, density_g_cm3: f64) -> Self {
        Self {
            diameter_mm,
            density_g_cm3,
        }
    }

    /// Weight in grams of `length_m` metres of filament.
    ///
    /// ```
    /// use print_archive::CuraFilamentDefaults;
    ///
    /// // One metre of 1.75mm PLA weighs about 3 g
    /// let grams = CuraFilamentDefaults::default().grams_for_length(1.0);
    /// assert!((grams - 2.98).abs() < 0.01);
    /// ```
    #[must_use]
    pub fn grams_for_length(&self, length_m: f64) -> f64 {
        let radius = self.diameter_mm / 2.0;
        // m * 1000 mm/m * mm² = mm³, and mm³ / 1000 = cm³
        length_m * PI * radius * radius * self.density_g_cm3
    }
}

/// Options for [`parse_print_archive_with`](crate::parse_print_archive_with).
///
/// # Example
///
/// ```
/// use print_archive::{ArchiveOptions, MachineRates};
/// use print_estimate::EstimateParams;
///
/// let options = ArchiveOptions::default()
///     .with_machine(MachineRates::new(0.35, 0.30))
///     .with_estimate(EstimateParams::draft());
/// assert!((options.machine.printer_power_kw - 0.35).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ArchiveOptions {
    /// Rates for the machine cost total.
    pub machine: MachineRates,
    /// Assumptions for the geometry fallback.
    pub estimate: EstimateParams,
    /// Length to weight conversion for Cura G-code.
    pub cura: CuraFilamentDefaults,
}

impl ArchiveOptions {
    /// Set machine rates.
    #[must_use]
    pub const fn with_machine(mut self, machine: MachineRates) -> Self {
        self.machine = machine;
        self
    }

    /// Set geometry estimate parameters.
    #[must_use]
    pub fn with_estimate(mut self, estimate: EstimateParams) -> Self {
        self.estimate = estimate;
        self
    }

    /// Set Cura filament defaults.
    #[must_use]
    pub const fn with_cura(mut self, cura: CuraFilamentDefaults) -> Self {
        self.cura = cura;
        self
    }
}
