//! Error types for geometry estimation.

use thiserror::Error;

/// Result type for geometry estimation.
pub type EstimateResult<T> = Result<T, GeometryError>;

/// Errors that prevent a geometry estimate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Zero, negative or non-finite enclosed volume (flat, open or
    /// inside-out mesh).
    #[error("degenerate mesh '{object}': signed volume {volume}")]
    DegenerateMesh {
        /// Name of the offending object.
        object: String,
        /// Computed signed volume in mm³.
        volume: f64,
    },

    /// A face references a vertex that does not exist.
    #[error("mesh '{object}': face {face} references a missing vertex")]
    InvalidFaceIndex {
        /// Name of the offending object.
        object: String,
        /// Index of the face.
        face: usize,
    },

    /// No mesh object was supplied.
    #[error("no mesh objects to estimate")]
    NoMeshObjects,
}

impl GeometryError {
    /// Create a `DegenerateMesh` error.
    #[must_use]
    pub fn degenerate(object: impl Into<String>, volume: f64) -> Self {
        Self::DegenerateMesh {
            object: object.into(),
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::degenerate("Cube", -8.0);
        let text = format!("{err}");
        assert!(text.contains("Cube"));
        assert!(text.contains("-8"));

        let err = GeometryError::InvalidFaceIndex {
            object: "Part".to_string(),
            face: 3,
        };
        assert!(format!("{err}").contains("face 3"));
    }
}
