//! Heart scene assembly
//!
//! Builds the deformed part meshes once at construction (the shape
//! deformer never runs per tick), owns the per-part placements and toggle
//! state, and applies the per-tick contraction scales from the beat
//! animator. Picking and rendering both read the scene through the
//! accessors here.

use glam::{Mat4, Vec3};

use cardioscope_core::beat::{BeatState, ChamberAnimator, Waveform};
use cardioscope_core::config::{self, VizPreset};
use cardioscope_core::parts::{ChamberRole, HeartPart, PartLabel};
use cardioscope_core::pick::{ClosestHitPicker, Picker, PickTarget, Placement, Ray};
use cardioscope_core::surface::{self, SurfaceMesh};

use crate::mesh::MeshData;

/// Chamber mesh resolution (latitude bands / longitude segments)
const CHAMBER_ROWS: u32 = 32;
const CHAMBER_COLS: u32 = 48;

/// Radial resolution of vessel tubes
const TUBE_SEGMENTS: u32 = 16;

/// Wall colors (RGBA)
const MUSCLE: [f32; 4] = [0.78, 0.30, 0.32, 1.0];
const ARTERIAL: [f32; 4] = [0.85, 0.22, 0.20, 1.0];
const VENOUS: [f32; 4] = [0.36, 0.32, 0.74, 1.0];
const FLOW: [f32; 4] = [0.95, 0.85, 0.35, 1.0];

/// Alpha applied to anterior-wall parts while the section cut is active
const SECTION_CUT_ALPHA: f32 = 0.35;

/// One placed structure in the scene.
#[derive(Clone, Debug)]
pub struct ScenePart {
    /// Identity (used for labels and picking)
    pub part: HeartPart,
    /// Deformed local-space geometry
    pub mesh: SurfaceMesh,
    /// Render data derived from `mesh`
    pub render: MeshData,
    /// World translation
    pub translation: Vec3,
    /// Authoring-time scale
    pub base_scale: f32,
    /// Wall color (RGBA)
    pub color: [f32; 4],
    /// Faded out while the section cut is active
    pub anterior_wall: bool,
    /// Only visible while flow display is on; never pickable
    pub flow_guide: bool,
    /// Contraction scale applied on the most recent tick
    pub current_scale: f32,
}

impl ScenePart {
    /// World transform for rendering this part
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_scale(Vec3::splat(self.base_scale * self.current_scale))
    }

    /// Placement used by the picker
    pub fn placement(&self) -> Placement {
        Placement {
            translation: self.translation,
            scale: self.base_scale * self.current_scale,
        }
    }
}

/// The assembled heart scene.
pub struct HeartScene {
    parts: Vec<ScenePart>,
    beat: BeatState,
    ventricle: ChamberAnimator,
    atrium: ChamberAnimator,
    picker: ClosestHitPicker,
    wireframe: bool,
    show_flow: bool,
    section_cut: bool,
}

impl HeartScene {
    /// Build the scene for a preset. Deformation runs here, once.
    #[must_use]
    pub fn new(preset: &VizPreset) -> Self {
        let mut parts = Vec::new();

        let chamber = |part: HeartPart, radius: f32, translation: Vec3, color: [f32; 4], anterior: bool| {
            let deformer = match part.role() {
                ChamberRole::Atrium => &preset.atrium_deformer,
                _ => &preset.ventricle_deformer,
            };
            let base = surface::uv_sphere(radius, CHAMBER_ROWS, CHAMBER_COLS);
            let mesh = deformer.apply_mesh(&base);
            let render = MeshData::from_surface_mesh(&mesh);
            ScenePart {
                part,
                mesh,
                render,
                translation,
                base_scale: 1.0,
                color,
                anterior_wall: anterior,
                flow_guide: false,
                current_scale: 1.0,
            }
        };

        parts.push(chamber(
            HeartPart::LeftVentricle,
            1.0,
            Vec3::new(0.55, -0.9, 0.0),
            MUSCLE,
            false,
        ));
        parts.push(chamber(
            HeartPart::RightVentricle,
            0.9,
            Vec3::new(-0.65, -0.8, 0.15),
            MUSCLE,
            true,
        ));
        parts.push(chamber(
            HeartPart::LeftAtrium,
            0.70,
            Vec3::new(0.60, 0.75, -0.10),
            MUSCLE,
            false,
        ));
        parts.push(chamber(
            HeartPart::RightAtrium,
            0.72,
            Vec3::new(-0.70, 0.80, 0.0),
            MUSCLE,
            true,
        ));

        let vessel = |part: HeartPart, mesh: SurfaceMesh, color: [f32; 4]| {
            let render = MeshData::from_surface_mesh(&mesh);
            ScenePart {
                part,
                mesh,
                render,
                translation: Vec3::ZERO,
                base_scale: 1.0,
                color,
                anterior_wall: false,
                flow_guide: false,
                current_scale: 1.0,
            }
        };

        // Aortic arch swept over the base of the heart
        parts.push(vessel(
            HeartPart::Aorta,
            surface::tube(
                &[
                    Vec3::new(0.30, 0.60, 0.0),
                    Vec3::new(0.25, 1.50, 0.0),
                    Vec3::new(-0.10, 2.00, 0.0),
                    Vec3::new(-0.60, 1.90, 0.0),
                    Vec3::new(-0.90, 1.40, 0.0),
                ],
                0.28,
                TUBE_SEGMENTS,
            ),
            ARTERIAL,
        ));

        parts.push(vessel(
            HeartPart::PulmonaryTrunk,
            surface::tube(
                &[
                    Vec3::new(-0.50, 0.50, 0.25),
                    Vec3::new(-0.45, 1.20, 0.40),
                    Vec3::new(-0.15, 1.60, 0.50),
                ],
                0.22,
                TUBE_SEGMENTS,
            ),
            VENOUS,
        ));

        let mut svc = vessel(
            HeartPart::SuperiorVenaCava,
            surface::cylinder(0.20, 1.2, TUBE_SEGMENTS),
            VENOUS,
        );
        svc.translation = Vec3::new(-1.05, 1.60, 0.0);
        parts.push(svc);

        let mut ivc = vessel(
            HeartPart::InferiorVenaCava,
            surface::cylinder(0.22, 1.0, TUBE_SEGMENTS),
            VENOUS,
        );
        ivc.translation = Vec3::new(-0.95, -0.20, 0.0);
        parts.push(ivc);

        let mut veins = vessel(
            HeartPart::PulmonaryVeins,
            surface::torus(0.45, 0.12, 32, 12),
            ARTERIAL,
        );
        veins.translation = Vec3::new(1.10, 0.85, -0.35);
        parts.push(veins);

        // Flow guides: thin tubes tracing the outflow directions, toggled
        // by the flow control and excluded from picking
        let mut flow_guide = vessel(
            HeartPart::Aorta,
            surface::tube(
                &[
                    Vec3::new(0.45, -0.40, 0.0),
                    Vec3::new(0.32, 0.90, 0.0),
                    Vec3::new(-0.10, 2.20, 0.0),
                ],
                0.06,
                8,
            ),
            FLOW,
        );
        flow_guide.flow_guide = true;
        parts.push(flow_guide);

        let mut flow_guide = vessel(
            HeartPart::PulmonaryTrunk,
            surface::tube(
                &[
                    Vec3::new(-0.55, -0.30, 0.2),
                    Vec3::new(-0.40, 1.00, 0.45),
                    Vec3::new(-0.10, 1.80, 0.55),
                ],
                0.06,
                8,
            ),
            FLOW,
        );
        flow_guide.flow_guide = true;
        parts.push(flow_guide);

        Self {
            parts,
            beat: BeatState::new(preset.default_bpm),
            ventricle: ChamberAnimator::new(preset.ventricle, preset.waveform),
            atrium: ChamberAnimator::new(preset.atrium, preset.waveform),
            picker: ClosestHitPicker,
            wireframe: false,
            show_flow: preset.show_flow,
            section_cut: preset.section_cut,
        }
    }

    /// Advance the animation by one tick and update the part scales.
    pub fn tick(&mut self, dt_seconds: f32) {
        self.beat.tick(dt_seconds);
        let phase = self.beat.phase();

        let ventricle_scale = self.ventricle.advance(phase);
        let atrium_scale = self.atrium.advance(phase);

        for part in &mut self.parts {
            part.current_scale = match part.part.role() {
                ChamberRole::Ventricle => ventricle_scale,
                ChamberRole::Atrium => atrium_scale,
                ChamberRole::Static => 1.0,
            };
        }
    }

    /// Current BPM control value
    pub fn bpm(&self) -> f32 {
        self.beat.bpm()
    }

    /// Set the BPM control, clamped to the slider range
    pub fn set_bpm(&mut self, bpm: f32) {
        self.beat.set_bpm(config::clamp_bpm(bpm));
    }

    /// Switch the waveform policy on both chamber classes
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.ventricle.set_waveform(waveform);
        self.atrium.set_waveform(waveform);
    }

    /// Wireframe toggle
    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Set the wireframe toggle
    pub fn set_wireframe(&mut self, enabled: bool) {
        self.wireframe = enabled;
    }

    /// Flow display toggle
    pub fn show_flow(&self) -> bool {
        self.show_flow
    }

    /// Set the flow display toggle
    pub fn set_show_flow(&mut self, enabled: bool) {
        self.show_flow = enabled;
    }

    /// Section cut toggle
    pub fn section_cut(&self) -> bool {
        self.section_cut
    }

    /// Set the section cut toggle
    pub fn set_section_cut(&mut self, enabled: bool) {
        self.section_cut = enabled;
    }

    /// All parts, in traversal order
    pub fn parts(&self) -> &[ScenePart] {
        &self.parts
    }

    /// True if the part should be drawn this frame
    pub fn is_visible(&self, part: &ScenePart) -> bool {
        !part.flow_guide || self.show_flow
    }

    /// Alpha for a part under the current toggles
    pub fn part_alpha(&self, part: &ScenePart) -> f32 {
        if self.section_cut && part.anterior_wall {
            SECTION_CUT_ALPHA
        } else {
            part.color[3]
        }
    }

    /// Pick candidates under the current toggles (flow guides excluded)
    pub fn pick_targets(&self) -> Vec<PickTarget<'_>> {
        self.parts
            .iter()
            .filter(|p| !p.flow_guide)
            .map(|p| PickTarget {
                part: p.part,
                mesh: &p.mesh,
                placement: p.placement(),
            })
            .collect()
    }

    /// Resolve the hover annotation for a camera ray.
    ///
    /// A miss yields the no-selection sentinel, never an error.
    pub fn hover(&self, ray: &Ray) -> PartLabel {
        self.picker
            .pick(ray, &self.pick_targets())
            .map_or_else(PartLabel::none_selected, |hit| hit.part.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardioscope_core::config::{ANTERIOR, LUB_DUB, SECTIONED};

    const TICK: f32 = 1.0 / 60.0;

    #[test]
    fn test_scene_contains_every_part() {
        let scene = HeartScene::new(&ANTERIOR);
        for part in HeartPart::ALL {
            assert!(
                scene.parts.iter().any(|p| p.part == part && !p.flow_guide),
                "missing {:?}",
                part
            );
        }
    }

    #[test]
    fn test_chamber_meshes_are_deformed_spheres() {
        let scene = HeartScene::new(&ANTERIOR);
        let lv = scene
            .parts
            .iter()
            .find(|p| p.part == HeartPart::LeftVentricle)
            .unwrap();

        let base = surface::uv_sphere(1.0, CHAMBER_ROWS, CHAMBER_COLS);
        let expected = ANTERIOR.ventricle_deformer.apply_mesh(&base);
        assert_eq!(lv.mesh, expected);
    }

    #[test]
    fn test_tick_scales_by_role() {
        let mut scene = HeartScene::new(&ANTERIOR);
        for _ in 0..17 {
            scene.tick(TICK);
        }

        let ventricle_scale = scene
            .parts
            .iter()
            .find(|p| p.part == HeartPart::LeftVentricle)
            .unwrap()
            .current_scale;
        let atrium_scale = scene
            .parts
            .iter()
            .find(|p| p.part == HeartPart::LeftAtrium)
            .unwrap()
            .current_scale;
        let aorta_scale = scene
            .parts
            .iter()
            .find(|p| p.part == HeartPart::Aorta && !p.flow_guide)
            .unwrap()
            .current_scale;

        assert!(ventricle_scale >= 1.0 - ANTERIOR.ventricle.amplitude - 1e-6);
        assert!(ventricle_scale <= 1.0 + ANTERIOR.ventricle.amplitude + 1e-6);
        assert_ne!(ventricle_scale, atrium_scale);
        assert_eq!(aorta_scale, 1.0);
    }

    #[test]
    fn test_hover_hits_chamber() {
        let mut scene = HeartScene::new(&ANTERIOR);
        scene.tick(TICK);

        let lv = scene
            .parts
            .iter()
            .find(|p| p.part == HeartPart::LeftVentricle)
            .unwrap();
        let ray = Ray::new(lv.translation + Vec3::new(0.0, 0.0, 8.0), Vec3::NEG_Z);

        let label = scene.hover(&ray);
        assert_eq!(label.name, "Left Ventricle");
    }

    #[test]
    fn test_hover_miss_is_sentinel() {
        let scene = HeartScene::new(&ANTERIOR);
        let ray = Ray::new(Vec3::new(50.0, 50.0, 50.0), Vec3::Z);

        assert!(scene.hover(&ray).is_none_selected());
    }

    #[test]
    fn test_flow_guides_not_pickable() {
        let scene = HeartScene::new(&ANTERIOR);
        let targets = scene.pick_targets();
        assert_eq!(
            targets.len(),
            scene.parts.iter().filter(|p| !p.flow_guide).count()
        );
    }

    #[test]
    fn test_section_cut_alpha() {
        let mut scene = HeartScene::new(&SECTIONED);
        assert!(scene.section_cut());

        let rv = scene
            .parts
            .iter()
            .find(|p| p.part == HeartPart::RightVentricle)
            .unwrap()
            .clone();
        assert_eq!(scene.part_alpha(&rv), SECTION_CUT_ALPHA);

        scene.set_section_cut(false);
        assert_eq!(scene.part_alpha(&rv), 1.0);
    }

    #[test]
    fn test_flow_toggle_controls_visibility() {
        let mut scene = HeartScene::new(&ANTERIOR);
        let guide = scene.parts.iter().find(|p| p.flow_guide).unwrap().clone();

        assert!(scene.is_visible(&guide));
        scene.set_show_flow(false);
        assert!(!scene.is_visible(&guide));
    }

    #[test]
    fn test_preset_defaults_applied() {
        let scene = HeartScene::new(&LUB_DUB);
        assert_eq!(scene.bpm(), LUB_DUB.default_bpm);
        assert!(!scene.section_cut());
        assert!(scene.show_flow());
    }

    #[test]
    fn test_set_bpm_clamped_to_slider() {
        let mut scene = HeartScene::new(&ANTERIOR);
        scene.set_bpm(0.0);
        assert_eq!(scene.bpm(), config::BPM_SLIDER_MIN);
        scene.set_bpm(500.0);
        assert_eq!(scene.bpm(), config::BPM_SLIDER_MAX);
    }
}
