//! GPU mesh conversion
//!
//! Converts the core's deformed [`SurfaceMesh`] geometry into the vertex
//! format the renderer uploads. Normals are recomputed here after
//! deformation (the deformer is a pure positional transform and leaves
//! connectivity-derived data to this layer), and a line index list is
//! derived for the wireframe toggle.

use std::collections::HashSet;

use glam::Vec3;

use cardioscope_core::surface::SurfaceMesh;

/// Vertex format for heart meshes
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position (x, y, z)
    pub position: [f32; 3],
    /// Normal vector (x, y, z)
    pub normal: [f32; 3],
    /// Texture/UV coordinates (u, v)
    pub uv: [f32; 2],
}

impl Vertex {
    /// Get the vertex buffer layout for wgpu
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// CPU-side mesh ready for upload.
#[derive(Clone, Debug)]
pub struct MeshData {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// Unique edge indices for wireframe rendering (line list)
    pub line_indices: Vec<u32>,
}

impl MeshData {
    /// Build render data from a (deformed) core mesh.
    pub fn from_surface_mesh(mesh: &SurfaceMesh) -> Self {
        let positions = &mesh.surface.positions;
        let normals = smooth_normals(mesh);

        let vertices = positions
            .iter()
            .zip(&normals)
            .map(|(p, n)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: spherical_uv(*p),
            })
            .collect();

        Self {
            vertices,
            indices: mesh.indices.clone(),
            line_indices: edge_indices(&mesh.indices),
        }
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Area-weighted smooth vertex normals.
///
/// The unnormalized face cross product is accumulated per vertex, so
/// large faces contribute more to the shared normal.
fn smooth_normals(mesh: &SurfaceMesh) -> Vec<Vec3> {
    let positions = &mesh.surface.positions;
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for triangle in mesh.indices.chunks_exact(3) {
        let (i0, i1, i2) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        let face = (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);

        accum[i0] += face;
        accum[i1] += face;
        accum[i2] += face;
    }

    accum
        .iter()
        .map(|n| n.normalize_or(Vec3::Y))
        .collect()
}

/// Spherical projection UVs around the Y axis.
fn spherical_uv(p: Vec3) -> [f32; 2] {
    let u = p.z.atan2(p.x) / (2.0 * std::f32::consts::PI) + 0.5;
    let v = (p.normalize_or(Vec3::Y).y + 1.0) * 0.5;
    [u, v]
}

/// Unique undirected edges of the triangle list, as a line list.
fn edge_indices(indices: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();

    for triangle in indices.chunks_exact(3) {
        for (a, b) in [
            (triangle[0], triangle[1]),
            (triangle[1], triangle[2]),
            (triangle[2], triangle[0]),
        ] {
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                lines.push(a);
                lines.push(b);
            }
        }
    }

    lines
}
