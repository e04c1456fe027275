//! Hover picking
//!
//! Casts a camera ray against the heart-part meshes and reports the first
//! structure along the ray. The policy lives behind the [`Picker`] trait
//! so it can be swapped and tested independent of any rendering engine:
//! the default [`ClosestHitPicker`] takes the closest intersection along
//! the ray and breaks exact distance ties by traversal order.

use glam::Vec3;

use crate::parts::HeartPart;
use crate::surface::SurfaceMesh;

/// Epsilon for the ray/triangle determinant test
const INTERSECT_EPSILON: f32 = 1e-7;

/// A world-space ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction (falls back to -Z for a
    /// degenerate direction)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::NEG_Z),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Placement of a mesh in the scene: translation plus uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// World translation
    pub translation: Vec3,
    /// Uniform scale (base scale times the current beat scale)
    pub scale: f32,
}

impl Placement {
    /// Transform a local-space point into world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local * self.scale + self.translation
    }
}

/// One candidate mesh for picking.
#[derive(Clone, Copy, Debug)]
pub struct PickTarget<'a> {
    /// Identity reported on a hit
    pub part: HeartPart,
    /// Mesh geometry in local space
    pub mesh: &'a SurfaceMesh,
    /// Placement in the scene
    pub placement: Placement,
}

/// Result of a successful pick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    /// The part that was hit
    pub part: HeartPart,
    /// Distance along the ray
    pub distance: f32,
    /// World-space intersection point
    pub point: Vec3,
}

/// Picking policy.
pub trait Picker {
    /// Pick among the candidates, or `None` when the ray misses
    /// everything. A miss is the defined no-selection outcome, never an
    /// error.
    fn pick(&self, ray: &Ray, candidates: &[PickTarget<'_>]) -> Option<PickHit>;
}

/// Default policy: closest intersection along the ray wins; an exact
/// distance tie keeps the earlier candidate in traversal order.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClosestHitPicker;

impl Picker for ClosestHitPicker {
    fn pick(&self, ray: &Ray, candidates: &[PickTarget<'_>]) -> Option<PickHit> {
        let mut best: Option<PickHit> = None;

        for target in candidates {
            // Cheap bounding-sphere reject before the triangle walk.
            // The part meshes are small (a few thousand vertices), so
            // recomputing the bound per pick is acceptable.
            let (center, radius) = bounding_sphere(target.mesh, target.placement);
            if !ray_intersects_sphere(ray, center, radius) {
                continue;
            }

            if let Some(distance) = intersect_mesh(ray, target) {
                let closer = best.map_or(true, |hit| distance < hit.distance);
                if closer {
                    best = Some(PickHit {
                        part: target.part,
                        distance,
                        point: ray.point_at(distance),
                    });
                }
            }
        }

        best
    }
}

/// World-space bounding sphere of a placed mesh.
fn bounding_sphere(mesh: &SurfaceMesh, placement: Placement) -> (Vec3, f32) {
    let center = placement.to_world(mesh.surface.centroid());
    let mut radius_sq = 0.0f32;

    for &p in &mesh.surface.positions {
        radius_sq = radius_sq.max(placement.to_world(p).distance_squared(center));
    }

    (center, radius_sq.sqrt())
}

/// True if the ray passes within `radius` of `center` in front of the
/// origin (or starts inside the sphere).
fn ray_intersects_sphere(ray: &Ray, center: Vec3, radius: f32) -> bool {
    let to_center = center - ray.origin;
    let along = to_center.dot(ray.direction);

    if along < 0.0 && to_center.length_squared() > radius * radius {
        return false;
    }

    let closest_sq = to_center.length_squared() - along * along;
    closest_sq <= radius * radius
}

/// Closest intersection of the ray with a placed mesh, if any.
fn intersect_mesh(ray: &Ray, target: &PickTarget<'_>) -> Option<f32> {
    let positions = &target.mesh.surface.positions;
    let mut closest: Option<f32> = None;

    for triangle in target.mesh.indices.chunks_exact(3) {
        let a = target.placement.to_world(positions[triangle[0] as usize]);
        let b = target.placement.to_world(positions[triangle[1] as usize]);
        let c = target.placement.to_world(positions[triangle[2] as usize]);

        if let Some(t) = ray_triangle(ray, a, b, c) {
            if closest.map_or(true, |best| t < best) {
                closest = Some(t);
            }
        }
    }

    closest
}

/// Möller–Trumbore ray/triangle intersection, both winding orders.
fn ray_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;

    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < INTERSECT_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let to_origin = ray.origin - a;

    let u = to_origin.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = to_origin.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t > INTERSECT_EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::uv_sphere;

    fn placed(mesh: &SurfaceMesh, part: HeartPart, translation: Vec3) -> PickTarget<'_> {
        PickTarget {
            part,
            mesh,
            placement: Placement {
                translation,
                scale: 1.0,
            },
        }
    }

    #[test]
    fn test_ray_hits_sphere_mesh() {
        let mesh = uv_sphere(1.0, 16, 16);
        let target = placed(&mesh, HeartPart::LeftVentricle, Vec3::ZERO);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = ClosestHitPicker.pick(&ray, &[target]).unwrap();

        assert_eq!(hit.part, HeartPart::LeftVentricle);
        // Front face of a unit sphere seen from z = 5
        assert!((hit.distance - 4.0).abs() < 0.05);
        assert!((hit.point.z - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_miss_returns_none() {
        let mesh = uv_sphere(1.0, 12, 12);
        let target = placed(&mesh, HeartPart::Aorta, Vec3::ZERO);

        // Pointing away from the mesh
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(ClosestHitPicker.pick(&ray, &[target]).is_none());

        // Passing beside the mesh
        let ray = Ray::new(Vec3::new(5.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ClosestHitPicker.pick(&ray, &[target]).is_none());
    }

    #[test]
    fn test_closest_candidate_wins() {
        let mesh = uv_sphere(1.0, 12, 12);
        let near = placed(&mesh, HeartPart::RightAtrium, Vec3::new(0.0, 0.0, 2.0));
        let far = placed(&mesh, HeartPart::LeftAtrium, Vec3::new(0.0, 0.0, -2.0));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);

        // Traversal order must not matter when distances differ
        let hit = ClosestHitPicker.pick(&ray, &[far, near]).unwrap();
        assert_eq!(hit.part, HeartPart::RightAtrium);

        let hit = ClosestHitPicker.pick(&ray, &[near, far]).unwrap();
        assert_eq!(hit.part, HeartPart::RightAtrium);
    }

    #[test]
    fn test_tie_keeps_traversal_order() {
        let mesh = uv_sphere(1.0, 12, 12);
        // Two coincident meshes: identical distances along the ray
        let first = placed(&mesh, HeartPart::LeftVentricle, Vec3::ZERO);
        let second = placed(&mesh, HeartPart::RightVentricle, Vec3::ZERO);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = ClosestHitPicker.pick(&ray, &[first, second]).unwrap();
        assert_eq!(hit.part, HeartPart::LeftVentricle);
    }

    #[test]
    fn test_scale_respected() {
        let mesh = uv_sphere(1.0, 16, 16);
        let target = PickTarget {
            part: HeartPart::LeftVentricle,
            mesh: &mesh,
            placement: Placement {
                translation: Vec3::ZERO,
                scale: 2.0,
            },
        };

        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let hit = ClosestHitPicker.pick(&ray, &[target]).unwrap();
        assert!((hit.distance - 3.0).abs() < 0.1);
    }

    #[test]
    fn test_empty_candidates() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(ClosestHitPicker.pick(&ray, &[]).is_none());
    }

    #[test]
    fn test_ray_direction_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert_eq!(Ray::new(Vec3::ZERO, Vec3::ZERO).direction, Vec3::NEG_Z);
    }
}
