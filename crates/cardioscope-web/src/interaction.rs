//! User interaction
//!
//! Routes pointer events to the orbit camera and keeps the hover state
//! for the annotation tooltip. The hover pick itself runs once per tick
//! against the current pointer position, so a stationary pointer still
//! tracks the beating meshes underneath it.

use cardioscope_core::parts::PartLabel;

use crate::camera::OrbitCamera;
use crate::scene::HeartScene;

/// Interaction event types
#[derive(Clone, Copy, Debug)]
pub enum InteractionEvent {
    /// Pointer moved to canvas coordinates with the given button mask
    Pointer { x: f32, y: f32, buttons: u32 },
    /// Pointer drag delta with the given button mask
    Drag { dx: f32, dy: f32, buttons: u32 },
    /// Wheel/pinch zoom
    Zoom { delta: f32 },
    /// Pointer left the canvas
    Leave,
}

/// Handler for pointer interaction and hover state.
#[derive(Clone, Debug)]
pub struct InteractionHandler {
    /// Last known pointer position in canvas pixels
    pointer: Option<[f32; 2]>,
    /// Annotation for the currently hovered part
    hovered: PartLabel,
}

impl InteractionHandler {
    /// Create a handler with no pointer and no selection
    pub fn new() -> Self {
        Self {
            pointer: None,
            hovered: PartLabel::none_selected(),
        }
    }

    /// Route an event to the camera and update the pointer state
    pub fn handle_event(&mut self, event: InteractionEvent, camera: &mut OrbitCamera) {
        match event {
            InteractionEvent::Pointer { x, y, .. } => {
                self.pointer = Some([x, y]);
            }
            InteractionEvent::Drag { dx, dy, buttons } => {
                if let Some([x, y]) = self.pointer {
                    self.pointer = Some([x + dx, y + dy]);
                }
                if buttons & 1 != 0 {
                    // Left button: orbit
                    camera.orbit(dx * 0.01, dy * 0.01);
                } else if buttons & 2 != 0 {
                    // Right button: pan
                    camera.pan(-dx * 0.01, dy * 0.01);
                }
            }
            InteractionEvent::Zoom { delta } => {
                let factor = if delta > 0.0 { 1.1 } else { 0.9 };
                camera.zoom(factor);
            }
            InteractionEvent::Leave => {
                self.pointer = None;
                self.hovered = PartLabel::none_selected();
            }
        }
    }

    /// Re-run the hover pick against the current pointer position.
    ///
    /// Returns the annotation pair for the tooltip; the no-selection
    /// sentinel when the pointer is off-canvas or over empty space.
    pub fn update_hover(
        &mut self,
        camera: &OrbitCamera,
        scene: &HeartScene,
        width: f32,
        height: f32,
    ) -> PartLabel {
        self.hovered = match self.pointer {
            Some([x, y]) => {
                let ray = camera.screen_ray(x, y, width, height);
                scene.hover(&ray)
            }
            None => PartLabel::none_selected(),
        };
        self.hovered
    }

    /// Annotation from the most recent hover pick
    pub fn hovered(&self) -> PartLabel {
        self.hovered
    }
}

impl Default for InteractionHandler {
    fn default() -> Self {
        Self::new()
    }
}
