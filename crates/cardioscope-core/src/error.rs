//! Error types for preset and control lookup
//!
//! The visualizations have no recoverable-error domain at runtime: all
//! geometry and animation inputs are authoring-time constants or clamped
//! user scalars. The only fallible surface is resolving the names the
//! host page passes across the WASM boundary.

use thiserror::Error;

/// Errors resolving configuration names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested visualization preset does not exist
    #[error("unknown preset '{name}' (expected one of: anterior, sectioned, lub-dub)")]
    UnknownPreset {
        /// The name that was requested
        name: String,
    },
    /// The requested waveform name does not exist
    #[error("unknown waveform '{name}' (expected 'sinusoid' or 'lub-dub')")]
    UnknownWaveform {
        /// The name that was requested
        name: String,
    },
}
