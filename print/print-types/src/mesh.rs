//! Named triangle mesh objects.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named, indexed triangle mesh as found in a 3MF model part.
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside,
/// so a well-formed closed object has a positive signed volume.
///
/// # Example
///
/// ```
/// use print_types::MeshObject;
///
/// let cube = MeshObject::cube("Cube", 10.0);
/// assert!((cube.volume() - 1000.0).abs() < 1e-9);
/// assert!((cube.surface_area() - 600.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshObject {
    /// Object id from the model file.
    pub id: u32,
    /// Object name, or a generated `Object <id>` label.
    pub name: String,
    /// Vertex positions in millimetres.
    pub vertices: Vec<Point3<f64>>,
    /// Triangle faces as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl MeshObject {
    /// Create an empty mesh object.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh object from vertices and faces.
    #[must_use]
    pub fn from_parts(
        id: u32,
        name: impl Into<String>,
        vertices: Vec<Point3<f64>>,
        faces: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            vertices,
            faces,
        }
    }

    /// Axis-aligned cube with one corner at the origin and outward winding.
    #[must_use]
    pub fn cube(name: impl Into<String>, size: f64) -> Self {
        let s = size;
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(s, 0.0, 0.0),
            Point3::new(s, s, 0.0),
            Point3::new(0.0, s, 0.0),
            Point3::new(0.0, 0.0, s),
            Point3::new(s, 0.0, s),
            Point3::new(s, s, s),
            Point3::new(0.0, s, s),
        ];
        let faces = vec![
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [2, 3, 7],
            [2, 7, 6],
            [0, 4, 7],
            [0, 7, 3],
            [1, 2, 6],
            [1, 6, 5],
        ];
        Self::from_parts(1, name, vertices, faces)
    }

    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Index of the first face referencing a missing vertex.
    #[must_use]
    pub fn first_invalid_face(&self) -> Option<usize> {
        let n = self.vertices.len();
        self.faces
            .iter()
            .position(|face| face.iter().any(|&i| i as usize >= n))
    }

    fn triangles(&self) -> impl Iterator<Item = [&Point3<f64>; 3]> + '_ {
        self.faces.iter().filter_map(|&[i0, i1, i2]| {
            Some([
                self.vertices.get(i0 as usize)?,
                self.vertices.get(i1 as usize)?,
                self.vertices.get(i2 as usize)?,
            ])
        })
    }

    /// Signed volume from the sum of origin-based tetrahedra.
    ///
    /// Positive for closed meshes with outward winding, negative when the
    /// mesh is inside-out. Faces with out-of-range indices are skipped.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;

        for [v0, v1, v2] in self.triangles() {
            // v0 · (v1 × v2)
            let cross = Vector3::new(
                v1.y.mul_add(v2.z, -(v1.z * v2.y)),
                v1.z.mul_add(v2.x, -(v1.x * v2.z)),
                v1.x.mul_add(v2.y, -(v1.y * v2.x)),
            );
            volume += v0.z.mul_add(cross.z, v0.x.mul_add(cross.x, v0.y * cross.y));
        }

        volume / 6.0
    }

    /// Absolute enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Sum of triangle areas.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles()
            .map(|[v0, v1, v2]| (v1 - v0).cross(&(v2 - v0)).norm() * 0.5)
            .sum()
    }

    /// Extent along Z, zero for an empty mesh.
    #[must_use]
    pub fn height(&self) -> f64 {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in &self.vertices {
            min = min.min(v.z);
            max = max.max(v.z);
        }
        if max >= min { max - min } else { 0.0 }
    }

    /// Reverse the winding of every face.
    pub fn flip_winding(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn unit_cube_measurements() {
        let cube = MeshObject::cube("c", 1.0);
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-12);
        assert_relative_eq!(cube.height(), 1.0);
    }

    #[test]
    fn flipped_cube_is_negative() {
        let mut cube = MeshObject::cube("c", 2.0);
        cube.flip_winding();
        assert_relative_eq!(cube.signed_volume(), -8.0, epsilon = 1e-12);
        assert_relative_eq!(cube.volume(), 8.0, epsilon = 1e-12);
        // Area does not depend on winding
        assert_relative_eq!(cube.surface_area(), 24.0, epsilon = 1e-12);
    }

    #[test]
    fn volume_is_translation_invariant() {
        let mut cube = MeshObject::cube("c", 3.0);
        for v in &mut cube.vertices {
            *v += Vector3::new(50.0, -20.0, 7.5);
        }
        assert_relative_eq!(cube.signed_volume(), 27.0, epsilon = 1e-9);
    }

    #[test]
    fn single_triangle_has_no_volume() {
        let tri = MeshObject::from_parts(
            1,
            "tri",
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        assert_relative_eq!(tri.signed_volume(), 0.0);
        assert_relative_eq!(tri.surface_area(), 0.5);
        assert_relative_eq!(tri.height(), 0.0);
    }

    #[test]
    fn invalid_indices_are_reported_and_skipped() {
        let mut cube = MeshObject::cube("c", 1.0);
        cube.faces.push([0, 1, 99]);
        assert_eq!(cube.first_invalid_face(), Some(12));
        assert_relative_eq!(cube.signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_mesh() {
        let mesh = MeshObject::new(7, "empty");
        assert!(mesh.is_empty());
        assert_eq!(mesh.face_count(), 0);
        assert_relative_eq!(mesh.signed_volume(), 0.0);
        assert_relative_eq!(mesh.height(), 0.0);
    }
}
