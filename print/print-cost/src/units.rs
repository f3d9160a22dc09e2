//! Material quantity units.
//!
//! Filament is measured by mass and resin by volume. Each family has a base
//! unit (grams, millilitres) and a "kilogram-equivalent" used against prices
//! quoted per kilogram (for resin, per litre).

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit a material quantity is entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MaterialUnit {
    /// Grams.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "g"))]
    G,
    /// Kilograms.
    #[cfg_attr(feature = "serde", serde(rename = "kg"))]
    Kg,
    /// Millilitres.
    #[cfg_attr(feature = "serde", serde(rename = "ml"))]
    Ml,
    /// Litres.
    #[cfg_attr(feature = "serde", serde(rename = "L"))]
    L,
}

/// Base unit a quantity is normalized to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseUnit {
    /// Mass, in grams.
    Grams,
    /// Volume, in millilitres.
    Millilitres,
}

impl MaterialUnit {
    /// Short symbol (`g`, `kg`, `ml`, `L`).
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::G => "g",
            Self::Kg => "kg",
            Self::Ml => "ml",
            Self::L => "L",
        }
    }

    /// The base unit this unit normalizes to.
    #[must_use]
    pub const fn base_unit(&self) -> BaseUnit {
        match self {
            Self::G | Self::Kg => BaseUnit::Grams,
            Self::Ml | Self::L => BaseUnit::Millilitres,
        }
    }

    /// Convert an amount in this unit to the base unit (g or ml).
    ///
    /// ```
    /// use print_cost::MaterialUnit;
    ///
    /// assert_eq!(MaterialUnit::Kg.to_base(1.5), 1500.0);
    /// assert_eq!(MaterialUnit::L.to_base(0.25), 250.0);
    /// assert_eq!(MaterialUnit::G.to_base(42.0), 42.0);
    /// ```
    #[must_use]
    pub fn to_base(&self, amount: f64) -> f64 {
        match self {
            Self::G | Self::Ml => amount,
            Self::Kg | Self::L => amount * 1000.0,
        }
    }

    /// Convert an amount in the base unit back to this unit.
    #[must_use]
    pub fn from_base(&self, base_amount: f64) -> f64 {
        match self {
            Self::G | Self::Ml => base_amount,
            Self::Kg | Self::L => base_amount / 1000.0,
        }
    }

    /// Convert an amount in this unit to kilograms (or litres for resin).
    #[must_use]
    pub fn to_kg_equivalent(&self, amount: f64) -> f64 {
        match self {
            Self::G | Self::Ml => amount / 1000.0,
            Self::Kg | Self::L => amount,
        }
    }
}

impl fmt::Display for MaterialUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn kilograms_to_grams() {
        assert_eq!(MaterialUnit::Kg.to_base(2.0), 2000.0);
        assert_eq!(MaterialUnit::Kg.base_unit(), BaseUnit::Grams);
    }

    #[test]
    fn litres_to_millilitres() {
        assert_eq!(MaterialUnit::L.to_base(0.5), 500.0);
        assert_eq!(MaterialUnit::L.base_unit(), BaseUnit::Millilitres);
    }

    #[test]
    fn round_trips_are_exact() {
        for grams in [0.0, 125.0, 250.0, 500.0, 1250.0, 2000.0] {
            let kg = MaterialUnit::Kg.from_base(grams);
            assert_eq!(MaterialUnit::Kg.to_base(kg), grams);

            let litres = MaterialUnit::L.from_base(grams);
            assert_eq!(MaterialUnit::L.to_base(litres), grams);
        }
    }

    #[test]
    fn kg_equivalent() {
        assert_eq!(MaterialUnit::G.to_kg_equivalent(500.0), 0.5);
        assert_eq!(MaterialUnit::Kg.to_kg_equivalent(0.5), 0.5);
        assert_eq!(MaterialUnit::Ml.to_kg_equivalent(250.0), 0.25);
        assert_eq!(MaterialUnit::L.to_kg_equivalent(1.0), 1.0);
    }

    #[test]
    fn symbols() {
        assert_eq!(MaterialUnit::L.to_string(), "L");
        assert_eq!(MaterialUnit::Ml.symbol(), "ml");
    }
}
