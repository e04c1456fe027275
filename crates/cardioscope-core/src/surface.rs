//! Procedural surface primitives
//!
//! Every structure in the visualizations is composed from a small set of
//! parametric primitives (sphere, torus, swept tube, cylinder) that are
//! deformed once at startup. A [`Surface`] is an ordered vertex sequence;
//! every operation downstream of generation is index-preserving, so
//! triangle indices built here stay valid after deformation.

use glam::Vec3;

use core::f32::consts::PI;

/// An ordered sequence of 3D points with no connectivity of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    /// Vertex positions, in generation order
    pub positions: Vec<Vec3>,
}

impl Surface {
    /// Create a surface from a vertex sequence
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions }
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the surface has no vertices
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Centroid of all vertices (origin for an empty surface)
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.positions.iter().copied().sum();
        sum / self.positions.len() as f32
    }
}

/// A surface plus triangle connectivity.
///
/// Indices refer into `surface.positions`; deformation replaces the
/// surface and keeps the indices untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions
    pub surface: Surface,
    /// Triangle list, three indices per face
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.surface.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Stitch a (rows+1) x (cols+1) vertex grid into a triangle list.
///
/// Rows and columns are inclusive of the duplicated seam vertex, matching
/// the `0..=resolution` generation loops below.
fn grid_indices(rows: u32, cols: u32) -> Vec<u32> {
    let mut indices = Vec::with_capacity((rows * cols * 6) as usize);
    let row_verts = cols + 1;

    for y in 0..rows {
        for x in 0..cols {
            let tl = y * row_verts + x;
            let tr = tl + 1;
            let bl = tl + row_verts;
            let br = bl + 1;

            indices.extend_from_slice(&[tl, bl, tr, tr, bl, br]);
        }
    }

    indices
}

/// Generate a UV sphere centred at the origin.
///
/// `rows` is the number of latitude bands (pole to pole), `cols` the
/// number of longitude segments. The seam column is duplicated so UV
/// mapping stays continuous downstream.
pub fn uv_sphere(radius: f32, rows: u32, cols: u32) -> SurfaceMesh {
    let mut positions = Vec::with_capacity(((rows + 1) * (cols + 1)) as usize);

    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        // phi runs from the north pole (+y) to the south pole (-y)
        let phi = v * PI;

        for x in 0..=cols {
            let u = x as f32 / cols as f32;
            let theta = u * 2.0 * PI;

            positions.push(Vec3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }

    SurfaceMesh {
        surface: Surface::new(positions),
        indices: grid_indices(rows, cols),
    }
}

/// Generate a torus in the XZ plane, centred at the origin.
pub fn torus(
    major_radius: f32,
    minor_radius: f32,
    major_segments: u32,
    minor_segments: u32,
) -> SurfaceMesh {
    let mut positions =
        Vec::with_capacity(((major_segments + 1) * (minor_segments + 1)) as usize);

    for i in 0..=major_segments {
        let u = i as f32 / major_segments as f32;
        let theta = u * 2.0 * PI;

        for j in 0..=minor_segments {
            let v = j as f32 / minor_segments as f32;
            let phi = v * 2.0 * PI;

            let ring = major_radius + minor_radius * phi.cos();
            positions.push(Vec3::new(
                ring * theta.cos(),
                minor_radius * phi.sin(),
                ring * theta.sin(),
            ));
        }
    }

    SurfaceMesh {
        surface: Surface::new(positions),
        indices: grid_indices(major_segments, minor_segments),
    }
}

/// Generate an open tube swept along a polyline path.
///
/// A cross-section ring is placed at every path point, oriented by the
/// local tangent. The path must contain at least two points; a shorter
/// path yields an empty mesh.
pub fn tube(path: &[Vec3], radius: f32, radial_segments: u32) -> SurfaceMesh {
    if path.len() < 2 {
        return SurfaceMesh {
            surface: Surface::new(Vec::new()),
            indices: Vec::new(),
        };
    }

    let mut positions =
        Vec::with_capacity(path.len() * (radial_segments + 1) as usize);

    for (i, center) in path.iter().enumerate() {
        // Central-difference tangent, one-sided at the endpoints
        let tangent = if i == 0 {
            path[1] - path[0]
        } else if i == path.len() - 1 {
            path[i] - path[i - 1]
        } else {
            path[i + 1] - path[i - 1]
        };
        let tangent = tangent.normalize_or(Vec3::Y);

        // Frame the ring with an axis that is not parallel to the tangent
        let reference = if tangent.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
        let side = tangent.cross(reference).normalize_or(Vec3::X);
        let up = side.cross(tangent);

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32;
            let phi = v * 2.0 * PI;

            positions.push(*center + side * (radius * phi.cos()) + up * (radius * phi.sin()));
        }
    }

    SurfaceMesh {
        surface: Surface::new(positions),
        indices: grid_indices(path.len() as u32 - 1, radial_segments),
    }
}

/// Generate an open cylinder along the Y axis, centred at the origin.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> SurfaceMesh {
    let half = height / 2.0;
    tube(
        &[Vec3::new(0.0, -half, 0.0), Vec3::new(0.0, half, 0.0)],
        radius,
        segments,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_vertex_count() {
        let mesh = uv_sphere(1.0, 16, 24);
        assert_eq!(mesh.vertex_count(), 17 * 25);
        assert_eq!(mesh.triangle_count(), (16 * 24 * 2) as usize);
    }

    #[test]
    fn test_sphere_radius() {
        let mesh = uv_sphere(2.5, 12, 12);
        for p in &mesh.surface.positions {
            assert!((p.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_indices_in_range() {
        for mesh in [
            uv_sphere(1.0, 8, 8),
            torus(2.0, 0.5, 16, 8),
            cylinder(0.5, 2.0, 12),
        ] {
            let n = mesh.vertex_count() as u32;
            assert!(mesh.indices.iter().all(|&i| i < n));
            assert_eq!(mesh.indices.len() % 3, 0);
        }
    }

    #[test]
    fn test_torus_distance_from_ring() {
        let mesh = torus(3.0, 0.4, 24, 12);
        for p in &mesh.surface.positions {
            // Distance from the major ring circle must equal the minor radius
            let ring_dist = ((p.x * p.x + p.z * p.z).sqrt() - 3.0).hypot(p.y);
            assert!((ring_dist - 0.4).abs() < 1e-4);
        }
    }

    #[test]
    fn test_tube_follows_path() {
        let path = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
        ];
        let mesh = tube(&path, 0.25, 8);
        assert_eq!(mesh.vertex_count(), 3 * 9);

        // First ring lies in a plane through the first path point
        for p in &mesh.surface.positions[..9] {
            assert!((*p - path[0]).length() < 0.25 + 1e-4);
        }
    }

    #[test]
    fn test_degenerate_tube_is_empty() {
        let mesh = tube(&[Vec3::ZERO], 1.0, 8);
        assert!(mesh.surface.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn test_centroid() {
        let surface = Surface::new(vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
        ]);
        assert!((surface.centroid() - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);
        assert_eq!(Surface::new(Vec::new()).centroid(), Vec3::ZERO);
    }
}
