//! Archive to summary pipeline.

use std::path::Path;

use print_cost::PieceRecord;
use print_estimate::estimate_plates;
use print_types::{FilamentUsage, PlateRecord, Vendor};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::container::read_entries;
use crate::error::{ArchiveError, ArchiveResult, ParseError};
use crate::model::read_meshes;
use crate::options::{ArchiveOptions, MachineRates};
use crate::vendor::{detect_vendor, normalize_with};

/// Normalized result of reading a print archive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PrintArchiveSummary {
    /// Slicer that produced the archive.
    pub vendor: Vendor,
    /// One record per plate (or per mesh object for geometry estimates).
    pub plates: Vec<PlateRecord>,
    /// Sum of plate weights in grams.
    pub total_weight_g: f64,
    /// Sum of plate print times in hours.
    pub total_print_hours: f64,
    /// Sum of filament costs.
    pub total_material_cost: f64,
    /// Electricity cost of all print hours.
    pub total_machine_cost: f64,
}

impl PrintArchiveSummary {
    /// Build a summary and its totals from plates.
    #[must_use]
    pub fn from_plates(vendor: Vendor, plates: Vec<PlateRecord>, machine: &MachineRates) -> Self {
        let total_weight_g = plates.iter().map(|p| p.total_weight_g).sum();
        let total_print_hours = plates.iter().map(|p| p.print_time_hours).sum();
        let total_material_cost = plates.iter().map(PlateRecord::material_cost).sum();
        Self {
            vendor,
            plates,
            total_weight_g,
            total_print_hours,
            total_material_cost,
            total_machine_cost: machine.cost_for_hours(total_print_hours),
        }
    }

    /// Filament usage across all plates, merged by profile name and price.
    ///
    /// Weights (and lengths, when every merged entry reports one) are summed.
    /// Order follows first appearance.
    #[must_use]
    pub fn filaments(&self) -> Vec<FilamentUsage> {
        let mut merged: Vec<FilamentUsage> = Vec::new();
        for usage in self.plates.iter().flat_map(|plate| &plate.filaments) {
            match merged.iter_mut().find(|m| m.same_profile(usage)) {
                Some(existing) => {
                    existing.weight_g += usage.weight_g;
                    existing.length_m = existing
                        .length_m
                        .zip(usage.length_m)
                        .map(|(a, b)| a + b);
                }
                None => merged.push(usage.clone()),
            }
        }
        merged
    }

    /// Whether any plate is a geometry approximation.
    #[must_use]
    pub fn is_estimated(&self) -> bool {
        self.plates.iter().any(PlateRecord::is_estimated)
    }

    /// Material plus machine cost.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.total_material_cost + self.total_machine_cost
    }

    /// One cost-engine piece per plate.
    #[must_use]
    pub fn to_pieces(&self) -> Vec<PieceRecord> {
        self.plates.iter().map(PieceRecord::from_plate).collect()
    }
}

/// Parse an archive with default options.
///
/// # Errors
///
/// See [`parse_print_archive_with`].
pub fn parse_print_archive(bytes: &[u8]) -> ArchiveResult<PrintArchiveSummary> {
    parse_print_archive_with(bytes, &ArchiveOptions::default())
}

/// Parse an archive into a summary.
///
/// Vendor metadata is used when present. If it yields no plate and the
/// archive carries 3MF meshes, plates are estimated from geometry instead.
///
/// # Errors
///
/// - [`ArchiveError::Unreadable`] / [`ArchiveError::EmptyOrCorrupt`] from the
///   container.
/// - [`ArchiveError::Parse`] for malformed metadata, or
///   [`ParseError::NoPlatesFound`] when there is neither usable metadata
///   nor a mesh object (model parts made only of components count as no
///   mesh).
/// - [`ArchiveError::Geometry`] if the fallback meets a degenerate mesh.
pub fn parse_print_archive_with(
    bytes: &[u8],
    options: &ArchiveOptions,
) -> ArchiveResult<PrintArchiveSummary> {
    let entries = read_entries(bytes)?;
    let vendor = detect_vendor(&entries);

    let plates = match normalize_with(vendor, &entries, &options.cura) {
        Ok(plates) => plates,
        Err(ParseError::NoPlatesFound) if !entries.models.is_empty() => {
            info!(vendor = %vendor, "No slicer data, estimating from geometry");
            let meshes = read_meshes(&entries)?;
            if meshes.is_empty() {
                debug!("Model parts hold no mesh object");
                return Err(ParseError::NoPlatesFound.into());
            }
            estimate_plates(&meshes, &options.estimate)?
        }
        Err(e) => return Err(e.into()),
    };

    let summary = PrintArchiveSummary::from_plates(vendor, plates, &options.machine);
    info!(
        vendor = %summary.vendor,
        plates = summary.plates.len(),
        weight_g = format!("{:.2}", summary.total_weight_g),
        hours = format!("{:.2}", summary.total_print_hours),
        estimated = summary.is_estimated(),
        "Parsed print archive"
    );
    Ok(summary)
}

/// Read and parse an archive file with default options.
///
/// # Errors
///
/// [`ArchiveError::FileNotFound`] or [`ArchiveError::Io`] if the file cannot
/// be read, otherwise see [`parse_print_archive_with`].
///
/// # Example
///
/// ```no_run
/// use print_archive::load_print_archive;
///
/// let summary = load_print_archive("benchy.gcode.3mf").unwrap();
/// println!("{} plates, {:.1} g", summary.plates.len(), summary.total_weight_g);
/// ```
pub fn load_print_archive<P: AsRef<Path>>(path: P) -> ArchiveResult<PrintArchiveSummary> {
    load_print_archive_with(path, &ArchiveOptions::default())
}

/// Read and parse an archive file.
///
/// # Errors
///
/// See [`load_print_archive`].
pub fn load_print_archive_with<P: AsRef<Path>>(
    path: P,
    options: &ArchiveOptions,
) -> ArchiveResult<PrintArchiveSummary> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| file_error(path, e))?;
    parse_print_archive_with(&bytes, options)
}

/// Read an archive file without blocking the runtime, then parse it.
///
/// # Errors
///
/// See [`load_print_archive`].
#[cfg(feature = "tokio")]
pub async fn read_print_archive<P: AsRef<Path>>(path: P) -> ArchiveResult<PrintArchiveSummary> {
    read_print_archive_with(path, &ArchiveOptions::default()).await
}

/// Read an archive file without blocking the runtime, then parse it.
///
/// # Errors
///
/// See [`load_print_archive`].
#[cfg(feature = "tokio")]
pub async fn read_print_archive_with<P: AsRef<Path>>(
    path: P,
    options: &ArchiveOptions,
) -> ArchiveResult<PrintArchiveSummary> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| file_error(path, e))?;
    parse_print_archive_with(&bytes, options)
}

fn file_error(path: &Path, error: std::io::Error) -> ArchiveError {
    if error.kind() == std::io::ErrorKind::NotFound {
        ArchiveError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ArchiveError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plate(id: u32, filaments: Vec<FilamentUsage>, hours: f64) -> PlateRecord {
        PlateRecord::sliced(id, format!("Plate {id}"), filaments, hours)
    }

    fn summary() -> PrintArchiveSummary {
        let pla = FilamentUsage::new("Bambu PLA Basic", "PLA", 20.0, 100.0).with_length_m(33.0);
        let petg = FilamentUsage::new("Bambu PETG", "PETG", 30.0, 50.0);
        PrintArchiveSummary::from_plates(
            Vendor::BambuStudio,
            vec![
                plate(1, vec![pla.clone(), petg], 2.0),
                plate(2, vec![pla.with_length_m(10.0)], 3.0),
            ],
            &MachineRates::new(0.2, 0.5),
        )
    }

    #[test]
    fn totals() {
        let summary = summary();
        assert_relative_eq!(summary.total_weight_g, 250.0);
        assert_relative_eq!(summary.total_print_hours, 5.0);
        // 200 g @ 20 + 50 g @ 30
        assert_relative_eq!(summary.total_material_cost, 5.5, epsilon = 1e-12);
        // 5 h * 0.2 kW * 0.5
        assert_relative_eq!(summary.total_machine_cost, 0.5, epsilon = 1e-12);
        assert_relative_eq!(summary.total_cost(), 6.0, epsilon = 1e-12);
        assert!(!summary.is_estimated());
    }

    #[test]
    fn filaments_are_merged_by_profile_and_price() {
        let filaments = summary().filaments();
        assert_eq!(filaments.len(), 2);
        assert_eq!(filaments[0].profile_name, "Bambu PLA Basic");
        assert_relative_eq!(filaments[0].weight_g, 200.0);
        assert_eq!(filaments[0].length_m, Some(43.0));
        assert_eq!(filaments[1].profile_name, "Bambu PETG");
    }

    #[test]
    fn same_name_different_price_is_kept_apart() {
        let summary = PrintArchiveSummary::from_plates(
            Vendor::PrusaSlicer,
            vec![
                plate(1, vec![FilamentUsage::new("PLA", "PLA", 20.0, 10.0)], 1.0),
                plate(2, vec![FilamentUsage::new("PLA", "PLA", 25.0, 10.0)], 1.0),
            ],
            &MachineRates::default(),
        );
        assert_eq!(summary.filaments().len(), 2);
    }

    #[test]
    fn pieces_follow_plates() {
        let pieces = summary().to_pieces();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0].id, "plate-1");
        assert_relative_eq!(pieces[0].total_weight(), 150.0);
        assert_relative_eq!(pieces[1].print_hours, 3.0);
    }

    #[test]
    fn empty_summary() {
        let summary =
            PrintArchiveSummary::from_plates(Vendor::Unknown, Vec::new(), &MachineRates::default());
        assert_relative_eq!(summary.total_weight_g, 0.0);
        assert!(summary.filaments().is_empty());
        assert!(!summary.is_estimated());
    }

    #[test]
    fn missing_file() {
        let err = load_print_archive("/definitely/not/here.gcode.3mf").unwrap_err();
        assert!(matches!(err, ArchiveError::FileNotFound { .. }));
    }
}
