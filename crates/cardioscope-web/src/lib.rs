//! Cardioscope Web Visualization
//!
//! WASM-deployed interactive 3D heart anatomy viewer. The host page owns
//! the canvas, the BPM slider, the toggle controls, and the
//! `requestAnimationFrame` loop; this crate owns the scene, the beat
//! animation, hover annotation, and the wgpu renderer.
//!
//! Typical JS driving code:
//!
//! ```js
//! const app = await create_heart_app("heart-canvas", 800, 600, "anterior");
//! const loop = (now) => {
//!     app.tick((now - last) / 1000);
//!     tooltip.textContent = app.hovered_name();
//!     last = now;
//!     requestAnimationFrame(loop);
//! };
//! requestAnimationFrame(loop);
//! ```

pub mod camera;
pub mod interaction;
pub mod mesh;
pub mod renderer;
pub mod scene;

use wasm_bindgen::prelude::*;

use cardioscope_core::config;
use cardioscope_core::parts::PartLabel;

use camera::OrbitCamera;
use interaction::{InteractionEvent, InteractionHandler};
use renderer::HeartRenderer;
#[cfg(target_arch = "wasm32")]
use renderer::RendererConfig;
use scene::HeartScene;

/// Longest tick delta the animation will accept, so a backgrounded tab
/// does not fast-forward the beat on resume
const MAX_TICK_SECONDS: f32 = 0.1;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Heart visualization application state
#[wasm_bindgen]
pub struct HeartApp {
    scene: HeartScene,
    camera: OrbitCamera,
    interaction: InteractionHandler,
    renderer: Option<HeartRenderer>,
    hovered: PartLabel,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl HeartApp {
    /// Create a headless application (no GPU attached) for the named
    /// preset. Rendering starts once a canvas is attached via
    /// [`create_heart_app`]; everything else works immediately.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, preset_name: &str) -> Result<HeartApp, JsValue> {
        let preset =
            config::preset(preset_name).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            scene: HeartScene::new(preset),
            camera: OrbitCamera::new(width as f32 / height.max(1) as f32),
            interaction: InteractionHandler::new(),
            renderer: None,
            hovered: PartLabel::none_selected(),
            width,
            height,
        })
    }

    /// Advance one frame: beat animation, hover pick, render.
    pub fn tick(&mut self, dt_seconds: f32) -> Result<(), JsValue> {
        let dt = dt_seconds.clamp(0.0, MAX_TICK_SECONDS);
        self.scene.tick(dt);

        self.hovered = self.interaction.update_hover(
            &self.camera,
            &self.scene,
            self.width as f32,
            self.height as f32,
        );

        if let Some(renderer) = self.renderer.as_mut() {
            renderer
                .render(&self.scene, &self.camera)
                .map_err(|e| JsValue::from_str(&e))?;
        }

        Ok(())
    }

    /// Set the BPM control (clamped to the slider range)
    pub fn set_bpm(&mut self, bpm: f32) {
        self.scene.set_bpm(bpm);
    }

    /// Current BPM control value
    pub fn bpm(&self) -> f32 {
        self.scene.bpm()
    }

    /// Select the waveform policy: "sinusoid" or "lub-dub"
    pub fn set_waveform(&mut self, name: &str) -> Result<(), JsValue> {
        let waveform =
            config::parse_waveform(name).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.scene.set_waveform(waveform);
        Ok(())
    }

    /// Wireframe toggle
    pub fn set_wireframe(&mut self, enabled: bool) {
        self.scene.set_wireframe(enabled);
    }

    /// Flow display toggle
    pub fn set_show_flow(&mut self, enabled: bool) {
        self.scene.set_show_flow(enabled);
    }

    /// Section cut toggle
    pub fn set_section_cut(&mut self, enabled: bool) {
        self.scene.set_section_cut(enabled);
    }

    /// Pointer moved over the canvas
    pub fn on_pointer_move(&mut self, x: f32, y: f32, buttons: u32) {
        self.interaction
            .handle_event(InteractionEvent::Pointer { x, y, buttons }, &mut self.camera);
    }

    /// Pointer dragged (delta movement)
    pub fn on_pointer_drag(&mut self, dx: f32, dy: f32, buttons: u32) {
        self.interaction
            .handle_event(InteractionEvent::Drag { dx, dy, buttons }, &mut self.camera);
    }

    /// Wheel/pinch zoom
    pub fn on_wheel(&mut self, delta: f32) {
        self.interaction
            .handle_event(InteractionEvent::Zoom { delta }, &mut self.camera);
    }

    /// Pointer left the canvas
    pub fn on_pointer_leave(&mut self) {
        self.interaction
            .handle_event(InteractionEvent::Leave, &mut self.camera);
    }

    /// Resize the canvas surface
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.camera.set_aspect(width, height);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(width, height);
        }
    }

    /// Display name of the hovered part, or the no-selection prompt
    pub fn hovered_name(&self) -> String {
        self.hovered.name.to_string()
    }

    /// Description of the hovered part, or the no-selection prompt
    pub fn hovered_description(&self) -> String {
        self.hovered.description.to_string()
    }

    /// Names of the available presets
    pub fn preset_names(&self) -> Vec<String> {
        config::presets().iter().map(|p| p.name.to_string()).collect()
    }
}

/// Create an application attached to the canvas with the given element
/// id. Resolves once the GPU device is ready and the scene geometry is
/// uploaded.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn create_heart_app(
    canvas_id: String,
    width: u32,
    height: u32,
    preset_name: String,
) -> Result<HeartApp, JsValue> {
    let mut app = HeartApp::new(width, height, &preset_name)?;

    let config = RendererConfig {
        width,
        height,
        ..Default::default()
    };
    let mut renderer = HeartRenderer::new(&canvas_id, config)
        .await
        .map_err(|e| JsValue::from_str(&e))?;
    renderer.upload_scene(&app.scene);

    app.renderer = Some(renderer);
    web_sys::console::log_1(&format!("Cardioscope ready: preset '{preset_name}'").into());
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardioscope_core::error::ConfigError;

    #[test]
    fn test_headless_app_ticks() {
        let mut app = HeartApp::new(800, 600, "anterior").unwrap();
        for _ in 0..120 {
            app.tick(1.0 / 60.0).unwrap();
        }
        assert!(app.hovered_name() == "No selection" || !app.hovered_name().is_empty());
    }

    // Off wasm, crossing into JsValue aborts the process, so the error
    // paths are asserted on the ConfigError side of the boundary.
    #[test]
    fn test_unknown_preset_rejected() {
        assert!(matches!(
            config::preset("coronal"),
            Err(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_bpm_control_round_trip() {
        let mut app = HeartApp::new(800, 600, "sectioned").unwrap();
        app.set_bpm(100.0);
        assert_eq!(app.bpm(), 100.0);
        app.set_bpm(0.0);
        assert_eq!(app.bpm(), cardioscope_core::config::BPM_SLIDER_MIN);
    }

    #[test]
    fn test_waveform_names() {
        let mut app = HeartApp::new(800, 600, "anterior").unwrap();
        assert!(app.set_waveform("lub-dub").is_ok());
        assert!(app.set_waveform("sine").is_ok());
        assert!(matches!(
            config::parse_waveform("square"),
            Err(ConfigError::UnknownWaveform { .. })
        ));
    }

    #[test]
    fn test_hover_over_chamber_reports_label() {
        let mut app = HeartApp::new(800, 600, "anterior").unwrap();
        // Slightly down-right of the canvas center, over the left
        // ventricle for the default camera
        app.on_pointer_move(460.0, 400.0, 0);
        app.tick(1.0 / 60.0).unwrap();
        assert_ne!(app.hovered_name(), "No selection");
    }
}
