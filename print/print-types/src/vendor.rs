//! Slicer vendor tags.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The slicer that produced a print archive.
///
/// Detection happens from structural signatures inside the archive, never
/// from the file name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Vendor {
    /// Bambu Studio (`Metadata/slice_info.config` dialect).
    BambuStudio,
    /// OrcaSlicer, a Bambu Studio fork sharing its archive layout.
    OrcaSlicer,
    /// PrusaSlicer (`Slic3r_PE.config` and G-code comment dialect).
    PrusaSlicer,
    /// Ultimaker Cura (`;KEY:value` G-code header dialect).
    Cura,
    /// No known signature matched.
    #[default]
    Unknown,
}

impl Vendor {
    /// Human-readable vendor name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BambuStudio => "Bambu Studio",
            Self::OrcaSlicer => "OrcaSlicer",
            Self::PrusaSlicer => "PrusaSlicer",
            Self::Cura => "Cura",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this vendor uses the Bambu archive layout.
    #[must_use]
    pub const fn is_bambu_family(&self) -> bool {
        matches!(self, Self::BambuStudio | Self::OrcaSlicer)
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Vendor::BambuStudio.to_string(), "Bambu Studio");
        assert_eq!(Vendor::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn bambu_family() {
        assert!(Vendor::BambuStudio.is_bambu_family());
        assert!(Vendor::OrcaSlicer.is_bambu_family());
        assert!(!Vendor::PrusaSlicer.is_bambu_family());
        assert!(!Vendor::Cura.is_bambu_family());
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(Vendor::default(), Vendor::Unknown);
    }
}
