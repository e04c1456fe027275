//! Shape deformer
//!
//! Turns a base primitive (usually a sphere) into an approximate chamber
//! silhouette with a deterministic per-vertex displacement. The rule is
//! pure and order-independent: output vertex `i` always corresponds to
//! input vertex `i`, so connectivity built before deformation survives it.
//!
//! The three visualization variants differ only in their constants and in
//! two optional conditional terms (apex narrowing below the equator,
//! septal-wall flattening behind the midplane); both are modelled as
//! configuration on the same rule rather than separate code paths.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::surface::{Surface, SurfaceMesh};

/// Constants for the per-vertex displacement rule.
///
/// The base rule is
///
/// ```text
/// x' = x * (1 - y * taper)
/// y' = y * stretch
/// z' = z
/// ```
///
/// Constants are expected in roughly `0.0..=2.0` but are not validated;
/// out-of-range values silently produce degenerate shapes, which is
/// acceptable for a visualization silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeformerConfig {
    /// Vertical elongation factor applied to `y`
    pub stretch: f32,
    /// Horizontal taper, stronger towards +y
    pub taper: f32,
    /// Extra horizontal narrowing below the equator (`y < 0`), scaling
    /// `x'` and `z'` by `1 + y * apex_taper`
    pub apex_taper: Option<f32>,
    /// Flattening factor applied to `z` behind the midplane (`z < 0`)
    pub septal_flatten: Option<f32>,
}

impl DeformerConfig {
    /// Base rule with no conditional terms
    pub const fn new(stretch: f32, taper: f32) -> Self {
        Self {
            stretch,
            taper,
            apex_taper: None,
            septal_flatten: None,
        }
    }

    /// Enable apex narrowing below the equator
    pub const fn with_apex_taper(mut self, apex_taper: f32) -> Self {
        self.apex_taper = Some(apex_taper);
        self
    }

    /// Enable septal-wall flattening behind the midplane
    pub const fn with_septal_flatten(mut self, septal_flatten: f32) -> Self {
        self.septal_flatten = Some(septal_flatten);
        self
    }

    /// Displace a single vertex.
    ///
    /// Stateless and deterministic; non-finite input propagates untouched
    /// through the arithmetic.
    pub fn displace(&self, v: Vec3) -> Vec3 {
        let mut x = v.x * (1.0 - v.y * self.taper);
        let y = v.y * self.stretch;
        let mut z = v.z;

        if let Some(flatten) = self.septal_flatten {
            if v.z < 0.0 {
                z *= flatten;
            }
        }

        if let Some(apex) = self.apex_taper {
            if v.y < 0.0 {
                let narrow = 1.0 + v.y * apex;
                x *= narrow;
                z *= narrow;
            }
        }

        Vec3::new(x, y, z)
    }

    /// Apply the rule to every vertex, returning a new surface.
    ///
    /// The input is never mutated; cardinality and ordering are preserved.
    pub fn apply(&self, surface: &Surface) -> Surface {
        Surface::new(surface.positions.iter().map(|&v| self.displace(v)).collect())
    }

    /// Apply the rule to a mesh, carrying the indices over unchanged.
    pub fn apply_mesh(&self, mesh: &SurfaceMesh) -> SurfaceMesh {
        SurfaceMesh {
            surface: self.apply(&mesh.surface),
            indices: mesh.indices.clone(),
        }
    }
}
