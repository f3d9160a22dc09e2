//! Pieces and the materials they consume.

use std::ops::{Add, AddAssign};

use print_types::PlateRecord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::units::{BaseUnit, MaterialUnit};

/// Material family of a [`MaterialItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaterialCategory {
    /// FDM filament, measured by mass.
    #[default]
    Filament,
    /// SLA/MSLA resin, measured by volume.
    Resin,
}

/// One material consumed by a piece.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MaterialItem {
    /// Identifier assigned by the owning project.
    pub id: String,
    /// Display name of the material.
    pub material_name: String,
    /// Material family (PLA, ABS, Standard resin, ...).
    pub material_type: String,
    /// Quantity in `unit`.
    pub weight: f64,
    /// Unit of `weight`.
    pub unit: MaterialUnit,
    /// Price per kilogram (per litre for volume units).
    pub price_per_kg: f64,
    /// Filament or resin.
    pub category: MaterialCategory,
    /// Optional colour.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub color: Option<String>,
    /// Optional brand.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub brand: Option<String>,
    /// Free-form notes.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub notes: Option<String>,
}

impl MaterialItem {
    /// Filament quantity in `unit`, priced per kilogram.
    #[must_use]
    pub fn filament(
        name: impl Into<String>,
        weight: f64,
        unit: MaterialUnit,
        price_per_kg: f64,
    ) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            material_type: name.clone(),
            material_name: name,
            weight,
            unit,
            price_per_kg,
            category: MaterialCategory::Filament,
            ..Self::default()
        }
    }

    /// Resin quantity in `unit`, priced per litre.
    #[must_use]
    pub fn resin(
        name: impl Into<String>,
        volume: f64,
        unit: MaterialUnit,
        price_per_l: f64,
    ) -> Self {
        Self {
            category: MaterialCategory::Resin,
            ..Self::filament(name, volume, unit, price_per_l)
        }
    }

    /// Quantity normalized to grams or millilitres.
    #[must_use]
    pub fn base_amount(&self) -> f64 {
        self.unit.to_base(self.weight)
    }

    /// Cost of one unit of the owning piece.
    #[must_use]
    pub fn cost(&self) -> f64 {
        self.unit.to_kg_equivalent(self.weight) * self.price_per_kg
    }

    fn usage(&self) -> MaterialUsage {
        let amount = self.base_amount();
        let (filament_g, resin_ml) = match self.unit.base_unit() {
            BaseUnit::Grams => (amount, 0.0),
            BaseUnit::Millilitres => (0.0, amount),
        };
        MaterialUsage {
            filament_g,
            resin_ml,
            cost: self.cost(),
        }
    }
}

/// Normalized material quantities and their cost.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialUsage {
    /// Mass-measured material in grams.
    pub filament_g: f64,
    /// Volume-measured material in millilitres.
    pub resin_ml: f64,
    /// Material cost.
    pub cost: f64,
}

impl MaterialUsage {
    /// Usage for a single filament given by grams and price per kilogram.
    #[must_use]
    pub fn legacy(weight_g: f64, price_per_kg: f64) -> Self {
        Self {
            filament_g: weight_g,
            resin_ml: 0.0,
            cost: MaterialUnit::G.to_kg_equivalent(weight_g) * price_per_kg,
        }
    }

    /// Scale every quantity by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            filament_g: self.filament_g * factor,
            resin_ml: self.resin_ml * factor,
            cost: self.cost * factor,
        }
    }
}

impl Add for MaterialUsage {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            filament_g: self.filament_g + rhs.filament_g,
            resin_ml: self.resin_ml + rhs.resin_ml,
            cost: self.cost + rhs.cost,
        }
    }
}

impl AddAssign for MaterialUsage {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// How a piece describes its material consumption.
///
/// Resolved once per piece: a non-empty material list always wins over the
/// legacy single-filament fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PieceMaterials<'a> {
    /// Single filament given by grams and price per kilogram.
    Legacy {
        /// Filament weight in grams.
        weight_g: f64,
        /// Price per kilogram.
        price_per_kg: f64,
    },
    /// Explicit list of materials.
    MultiMaterial(&'a [MaterialItem]),
}

impl PieceMaterials<'_> {
    /// Usage of one unit of the piece.
    #[must_use]
    pub fn unit_usage(&self) -> MaterialUsage {
        match *self {
            Self::Legacy {
                weight_g,
                price_per_kg,
            } => MaterialUsage::legacy(weight_g, price_per_kg),
            Self::MultiMaterial(items) => items
                .iter()
                .map(MaterialItem::usage)
                .fold(MaterialUsage::default(), Add::add),
        }
    }
}

/// A printed piece of a project.
///
/// # Example
///
/// ```
/// use print_cost::{MaterialItem, MaterialUnit, PieceRecord};
///
/// let piece = PieceRecord::new("a", "Bracket", 1.5, 2)
///     .with_material(MaterialItem::filament("PLA", 100.0, MaterialUnit::G, 25.0));
///
/// assert!((piece.total_weight() - 200.0).abs() < 1e-12);
/// assert!((piece.material_cost() - 5.0).abs() < 1e-12);
/// assert!((piece.total_print_hours() - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PieceRecord {
    /// Identifier assigned by the owning project.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Print time of one unit in hours.
    pub print_hours: f64,
    /// Number of units.
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: u32,
    /// Materials consumed by one unit.
    #[cfg_attr(feature = "serde", serde(default))]
    pub materials: Vec<MaterialItem>,
    /// Legacy filament weight in grams, used when `materials` is empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub filament_weight: f64,
    /// Legacy filament price per kilogram, used when `materials` is empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub filament_price: f64,
}

#[cfg(feature = "serde")]
const fn default_quantity() -> u32 {
    1
}

impl PieceRecord {
    /// Create a piece with no materials.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        print_hours: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            print_hours,
            quantity,
            materials: Vec::new(),
            filament_weight: 0.0,
            filament_price: 0.0,
        }
    }

    /// Add a material.
    #[must_use]
    pub fn with_material(mut self, item: MaterialItem) -> Self {
        self.materials.push(item);
        self
    }

    /// Set the legacy single-filament fields.
    #[must_use]
    pub const fn with_legacy_filament(mut self, weight_g: f64, price_per_kg: f64) -> Self {
        self.filament_weight = weight_g;
        self.filament_price = price_per_kg;
        self
    }

    /// Map a slicer plate to a single-unit piece.
    ///
    /// Each filament becomes a gram-based material; a plate without
    /// filaments (a geometry estimate) keeps its weight in the legacy
    /// fields with no price.
    #[must_use]
    pub fn from_plate(plate: &PlateRecord) -> Self {
        let mut piece = Self::new(
            format!("plate-{}", plate.id),
            plate.name.clone(),
            plate.print_time_hours,
            1,
        );
        if plate.filaments.is_empty() {
            return piece.with_legacy_filament(plate.total_weight_g, 0.0);
        }
        for (index, filament) in plate.filaments.iter().enumerate() {
            piece.materials.push(MaterialItem {
                id: format!("plate-{}-filament-{}", plate.id, index + 1),
                material_name: filament.profile_name.clone(),
                material_type: filament.filament_type.clone(),
                weight: filament.weight_g,
                unit: MaterialUnit::G,
                price_per_kg: filament.cost_per_kg,
                category: MaterialCategory::Filament,
                color: filament.color.clone(),
                brand: None,
                notes: None,
            });
        }
        piece
    }

    /// Resolve which material description applies.
    #[must_use]
    pub fn resolve_materials(&self) -> PieceMaterials<'_> {
        if self.materials.is_empty() {
            PieceMaterials::Legacy {
                weight_g: self.filament_weight,
                price_per_kg: self.filament_price,
            }
        } else {
            PieceMaterials::MultiMaterial(&self.materials)
        }
    }

    /// Whether the piece carries no material data at all.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn has_no_material_data(&self) -> bool {
        self.materials.is_empty() && self.filament_weight == 0.0
    }

    /// Usage of all units of this piece.
    #[must_use]
    pub fn usage(&self) -> MaterialUsage {
        self.resolve_materials()
            .unit_usage()
            .scaled(f64::from(self.quantity))
    }

    /// Material weight of all units (grams plus millilitres).
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        let usage = self.usage();
        usage.filament_g + usage.resin_ml
    }

    /// Material cost of all units.
    #[must_use]
    pub fn material_cost(&self) -> f64 {
        self.usage().cost
    }

    /// Print hours of all units.
    #[must_use]
    pub fn total_print_hours(&self) -> f64 {
        self.print_hours * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use print_types::FilamentUsage;

    #[test]
    fn single_material_cost() {
        let piece = PieceRecord::new("p", "Piece", 1.0, 1)
            .with_material(MaterialItem::filament("PLA", 500.0, MaterialUnit::G, 25.0));
        assert_relative_eq!(piece.material_cost(), 12.5);
        assert_relative_eq!(piece.total_weight(), 500.0);
    }

    #[test]
    fn kilogram_material_normalizes_to_grams() {
        let piece = PieceRecord::new("p", "Piece", 1.0, 1)
            .with_material(MaterialItem::filament("PETG", 0.25, MaterialUnit::Kg, 30.0));
        let usage = piece.usage();
        assert_relative_eq!(usage.filament_g, 250.0);
        assert_relative_eq!(usage.cost, 7.5);
    }

    #[test]
    fn resin_tracked_in_millilitres() {
        let piece = PieceRecord::new("p", "Mini", 3.0, 4)
            .with_material(MaterialItem::resin("Grey", 20.0, MaterialUnit::Ml, 40.0));
        let usage = piece.usage();
        assert_relative_eq!(usage.filament_g, 0.0);
        assert_relative_eq!(usage.resin_ml, 80.0);
        assert_relative_eq!(usage.cost, 3.2, epsilon = 1e-12);
    }

    #[test]
    fn multi_material_wins_over_legacy() {
        let piece = PieceRecord::new("p", "Piece", 1.0, 1)
            .with_legacy_filament(1000.0, 100.0)
            .with_material(MaterialItem::filament("PLA", 100.0, MaterialUnit::G, 20.0));
        assert!(matches!(
            piece.resolve_materials(),
            PieceMaterials::MultiMaterial(items) if items.len() == 1
        ));
        assert_relative_eq!(piece.material_cost(), 2.0);
    }

    #[test]
    fn legacy_fields_when_no_materials() {
        let piece = PieceRecord::new("p", "Piece", 2.0, 3).with_legacy_filament(50.0, 20.0);
        assert_eq!(
            piece.resolve_materials(),
            PieceMaterials::Legacy {
                weight_g: 50.0,
                price_per_kg: 20.0
            }
        );
        assert_relative_eq!(piece.total_weight(), 150.0);
        assert_relative_eq!(piece.material_cost(), 3.0);
        assert_relative_eq!(piece.total_print_hours(), 6.0);
    }

    #[test]
    fn empty_piece_has_no_material_data() {
        assert!(PieceRecord::new("p", "Piece", 1.0, 1).has_no_material_data());
        assert!(!PieceRecord::new("p", "Piece", 1.0, 1)
            .with_legacy_filament(1.0, 0.0)
            .has_no_material_data());
    }

    #[test]
    fn negative_inputs_produce_negative_totals() {
        let piece = PieceRecord::new("p", "Piece", -1.0, 1)
            .with_material(MaterialItem::filament("PLA", -100.0, MaterialUnit::G, 20.0));
        assert_relative_eq!(piece.material_cost(), -2.0);
        assert_relative_eq!(piece.total_print_hours(), -1.0);
    }

    #[test]
    fn plate_maps_to_piece() {
        let plate = PlateRecord::sliced(
            4,
            "Plate 4",
            vec![
                FilamentUsage::new("Basic PLA", "PLA", 20.0, 30.0).with_color("#FFFFFF"),
                FilamentUsage::new("Basic PETG", "PETG", 25.0, 10.0),
            ],
            2.0,
        );
        let piece = PieceRecord::from_plate(&plate);
        assert_eq!(piece.id, "plate-4");
        assert_eq!(piece.materials.len(), 2);
        assert_eq!(piece.materials[0].color.as_deref(), Some("#FFFFFF"));
        assert_relative_eq!(piece.total_weight(), plate.total_weight_g);
        assert_relative_eq!(piece.material_cost(), plate.material_cost());
    }

    #[test]
    fn estimated_plate_maps_to_legacy_weight() {
        let plate = PlateRecord::estimated(1, "Cube", 12.0, 0.75, 1000.0, 600.0);
        let piece = PieceRecord::from_plate(&plate);
        assert!(piece.materials.is_empty());
        assert_relative_eq!(piece.filament_weight, 12.0);
        assert_relative_eq!(piece.material_cost(), 0.0);
    }
}
