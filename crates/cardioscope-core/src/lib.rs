//! Cardioscope Core - engine-independent heart visualization logic
//!
//! This crate provides the testable core shared by the Cardioscope
//! visualizations: procedural surface primitives, the per-vertex shape
//! deformer that turns those primitives into chamber silhouettes, the
//! BPM-driven heartbeat animator, camera-ray picking for hover
//! annotations, and the per-visualization configuration presets.
//!
//! # Modules
//!
//! - [`surface`]: Ordered vertex sequences and parametric primitives
//!   (sphere, torus, swept tube, cylinder)
//! - [`deform`]: Pure per-vertex displacement into chamber silhouettes
//! - [`beat`]: Heartbeat state, waveform strategies, and scale factors
//! - [`pick`]: Ray/mesh intersection with a swappable picking policy
//! - [`parts`]: Heart part identities, roles, and annotation metadata
//! - [`config`]: Named presets for the three visualization variants
//! - [`error`]: Error types for preset and control lookup
//!
//! # Example
//!
//! ```rust
//! use cardioscope_core::beat::{BeatState, ChamberAnimator, ChamberTiming, Waveform};
//!
//! let mut state = BeatState::new(72.0);
//! let mut ventricle = ChamberAnimator::new(
//!     ChamberTiming { amplitude: 0.04, phase_offset: 0.0 },
//!     Waveform::Sinusoid,
//! );
//!
//! state.tick(1.0 / 60.0);
//! let scale = ventricle.advance(state.phase());
//! assert!(scale >= 0.96 && scale <= 1.04);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod beat;
pub mod config;
pub mod deform;
pub mod error;
pub mod parts;
pub mod pick;
pub mod surface;

// Re-export commonly used types at crate root
pub use beat::{BeatState, ChamberAnimator, ChamberTiming, Waveform};
pub use config::VizPreset;
pub use deform::DeformerConfig;
pub use error::ConfigError;
pub use parts::{ChamberRole, HeartPart, PartLabel};
pub use pick::{ClosestHitPicker, PickHit, PickTarget, Picker, Ray};
pub use surface::{Surface, SurfaceMesh};
