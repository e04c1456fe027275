//! Orbit camera
//!
//! View/projection setup, orbit/zoom/pan controls, and the screen-ray
//! unprojection used by hover picking. The heart scene is Y-up; the
//! camera orbits the scene origin.

use glam::{Mat4, Vec3, Vec4};

use cardioscope_core::pick::Ray;

/// 3D orbit camera.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    /// Eye position
    pub position: Vec3,
    /// Look-at target
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Field of view (radians)
    pub fov: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Aspect ratio (width/height)
    pub aspect: f32,
}

impl OrbitCamera {
    /// Create a camera looking at the heart from the anterior side
    #[must_use]
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 9.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 100.0,
            aspect,
        }
    }

    /// Compute view matrix
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Compute projection matrix (perspective)
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Orbit camera around the target
    pub fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        let rel = self.position - self.target;
        let r = rel.length();
        let theta = rel.x.atan2(rel.z) + delta_azimuth;
        let phi = ((rel.y / r).asin() + delta_elevation).clamp(-1.4, 1.4);

        self.position = self.target
            + Vec3::new(
                r * phi.cos() * theta.sin(),
                r * phi.sin(),
                r * phi.cos() * theta.cos(),
            );
    }

    /// Zoom camera (dolly), factor < 1 moves closer
    pub fn zoom(&mut self, factor: f32) {
        let rel = self.position - self.target;
        self.position = self.target + rel * factor.clamp(0.1, 10.0);
    }

    /// Pan camera and target together
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.position).normalize_or(Vec3::NEG_Z);
        let side = forward.cross(self.up).normalize_or(Vec3::X);
        let local_up = side.cross(forward);

        let offset = side * delta_x + local_up * delta_y;
        self.position += offset;
        self.target += offset;
    }

    /// Update the aspect ratio after a canvas resize
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Unproject a pixel position into a world-space ray.
    ///
    /// `x` and `y` are in canvas pixels with the origin at the top-left,
    /// matching pointer events.
    #[must_use]
    pub fn screen_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let ndc_x = (x / width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (y / height) * 2.0;

        let inverse = self.view_projection().inverse();

        let near = inverse * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = inverse * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        Ray::new(near, far - near)
    }
}
