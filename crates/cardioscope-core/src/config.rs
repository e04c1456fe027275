//! Per-visualization configuration presets
//!
//! The three visualizations are the same scene with different constant
//! sets: deformer constants, chamber timings, waveform policy, default
//! BPM, and toggle defaults. Each set is a named [`VizPreset`] so the
//! differences stay configuration rather than code paths.

use serde::Serialize;

use crate::beat::{ChamberTiming, Waveform};
use crate::deform::DeformerConfig;
use crate::error::ConfigError;

/// Lower bound of the BPM slider
pub const BPM_SLIDER_MIN: f32 = 40.0;
/// Upper bound of the BPM slider
pub const BPM_SLIDER_MAX: f32 = 180.0;

/// Clamp a user-supplied BPM into the slider range.
pub fn clamp_bpm(bpm: f32) -> f32 {
    bpm.clamp(BPM_SLIDER_MIN, BPM_SLIDER_MAX)
}

/// Constant set for one visualization variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VizPreset {
    /// Preset name, as passed from the host page
    pub name: &'static str,
    /// Default BPM before the user touches the slider
    pub default_bpm: f32,
    /// Waveform policy for both chamber classes
    pub waveform: Waveform,
    /// Ventricular timing constants
    pub ventricle: ChamberTiming,
    /// Atrial timing constants
    pub atrium: ChamberTiming,
    /// Deformer constants for the ventricles
    pub ventricle_deformer: DeformerConfig,
    /// Deformer constants for the atria
    pub atrium_deformer: DeformerConfig,
    /// Whether the section cut (transparent anterior wall) starts enabled
    pub section_cut: bool,
    /// Whether the flow guides start visible
    pub show_flow: bool,
}

/// Anterior view: smooth sinusoid pulse, opaque walls.
pub const ANTERIOR: VizPreset = VizPreset {
    name: "anterior",
    default_bpm: 72.0,
    waveform: Waveform::Sinusoid,
    ventricle: ChamberTiming {
        amplitude: 0.04,
        phase_offset: 0.0,
    },
    atrium: ChamberTiming {
        amplitude: 0.03,
        phase_offset: 1.0,
    },
    ventricle_deformer: DeformerConfig::new(1.35, 0.30),
    atrium_deformer: DeformerConfig::new(0.85, 0.15),
    section_cut: false,
    show_flow: true,
};

/// Sectioned view: flattened septal wall, transparent anterior wall.
pub const SECTIONED: VizPreset = VizPreset {
    name: "sectioned",
    default_bpm: 60.0,
    waveform: Waveform::Sinusoid,
    ventricle: ChamberTiming {
        amplitude: 0.035,
        phase_offset: 0.0,
    },
    atrium: ChamberTiming {
        amplitude: 0.03,
        phase_offset: 1.0,
    },
    ventricle_deformer: DeformerConfig::new(1.30, 0.28).with_septal_flatten(0.45),
    atrium_deformer: DeformerConfig::new(0.80, 0.12).with_septal_flatten(0.45),
    section_cut: true,
    show_flow: false,
};

/// Lub-dub view: thresholded pulse with apex narrowing.
pub const LUB_DUB: VizPreset = VizPreset {
    name: "lub-dub",
    default_bpm: 75.0,
    waveform: Waveform::LubDub {
        step: 0.05,
        smoothing: 0.2,
    },
    ventricle: ChamberTiming {
        amplitude: 0.05,
        phase_offset: 0.0,
    },
    atrium: ChamberTiming {
        amplitude: 0.04,
        phase_offset: 1.0,
    },
    ventricle_deformer: DeformerConfig::new(1.40, 0.32).with_apex_taper(0.35),
    atrium_deformer: DeformerConfig::new(0.85, 0.15),
    section_cut: false,
    show_flow: true,
};

/// All presets, in the order the host page lists them.
pub fn presets() -> &'static [VizPreset] {
    static ALL: [VizPreset; 3] = [ANTERIOR, SECTIONED, LUB_DUB];
    &ALL
}

/// Look up a preset by name.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownPreset`] when no preset carries the
/// given name.
pub fn preset(name: &str) -> Result<&'static VizPreset, ConfigError> {
    presets()
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| ConfigError::UnknownPreset {
            name: name.to_string(),
        })
}

/// Parse a waveform name from the host page.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownWaveform`] for an unrecognized name.
pub fn parse_waveform(name: &str) -> Result<Waveform, ConfigError> {
    match name.to_ascii_lowercase().as_str() {
        "sinusoid" | "sine" => Ok(Waveform::Sinusoid),
        "lub-dub" | "lubdub" => Ok(Waveform::LubDub {
            step: 0.05,
            smoothing: 0.2,
        }),
        _ => Err(ConfigError::UnknownWaveform {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup() {
        assert_eq!(preset("anterior").unwrap().name, "anterior");
        assert_eq!(preset("LUB-DUB").unwrap().name, "lub-dub");
        assert!(matches!(
            preset("coronal"),
            Err(ConfigError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_preset_defaults_in_slider_range() {
        for p in presets() {
            assert!(p.default_bpm >= BPM_SLIDER_MIN);
            assert!(p.default_bpm <= BPM_SLIDER_MAX);
        }
    }

    #[test]
    fn test_atria_lag_ventricles() {
        for p in presets() {
            assert!((p.atrium.phase_offset - p.ventricle.phase_offset).abs() > 0.5);
        }
    }

    #[test]
    fn test_clamp_bpm() {
        assert_eq!(clamp_bpm(0.0), BPM_SLIDER_MIN);
        assert_eq!(clamp_bpm(300.0), BPM_SLIDER_MAX);
        assert_eq!(clamp_bpm(72.0), 72.0);
    }

    #[test]
    fn test_parse_waveform() {
        assert_eq!(parse_waveform("sinusoid").unwrap(), Waveform::Sinusoid);
        assert!(matches!(
            parse_waveform("lubdub").unwrap(),
            Waveform::LubDub { .. }
        ));
        assert!(parse_waveform("square").is_err());
    }

    #[test]
    fn test_only_lub_dub_preset_uses_threshold_waveform() {
        assert_eq!(ANTERIOR.waveform, Waveform::Sinusoid);
        assert_eq!(SECTIONED.waveform, Waveform::Sinusoid);
        assert!(matches!(LUB_DUB.waveform, Waveform::LubDub { .. }));
    }
}
