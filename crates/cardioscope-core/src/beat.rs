//! Heartbeat animation
//!
//! Computes the per-tick contraction scale applied to the chamber meshes.
//! All mutable animation state lives in explicit structs so the tick
//! function can be exercised without a rendering context: [`BeatState`]
//! owns the simulated clock and the BPM control, and one
//! [`ChamberAnimator`] per chamber class turns the current phase into a
//! scale factor.
//!
//! Two waveform policies exist across the visualization variants and both
//! are supported as explicit, selectable strategies: a pure sinusoid, and
//! a thresholded "lub-dub" pulse relaxed towards its target by linear
//! interpolation for an abrupt systole and a gradual diastole.

use serde::{Deserialize, Serialize};

/// Lowest BPM the animator will accept.
///
/// The controls clamp to the slider range well above this, but every
/// write site clamps here as well so a zero or negative BPM can never
/// stall or reverse the animation.
pub const MIN_BPM: f32 = 1.0;

/// Tuned phase rate: one elapsed second advances the phase by this many
/// radians at 60 BPM.
pub const BASE_FREQUENCY: f32 = 10.0;

/// Waveform policy for the contraction pulse.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Waveform {
    /// Smooth pulse: `scale = 1 + amplitude * sin(phase + offset)`
    Sinusoid,
    /// Thresholded pulse: the target jumps to `1 + step` while
    /// `sin(2 * (phase + offset)) > 0.5`, and the displayed scale relaxes
    /// towards the target by `smoothing` per tick
    LubDub {
        /// Systolic contraction amount
        step: f32,
        /// Per-tick interpolation factor towards the target (≈ 0.2)
        smoothing: f32,
    },
}

/// Per-chamber timing constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChamberTiming {
    /// Contraction amplitude for the sinusoid policy
    pub amplitude: f32,
    /// Phase offset in radians; the atria run ≈ 1.0 rad out of sync with
    /// the ventricles
    pub phase_offset: f32,
}

/// Simulated heartbeat clock driven by wall-clock deltas and the BPM
/// control.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeatState {
    elapsed: f32,
    bpm: f32,
}

impl BeatState {
    /// Create a state at time zero with the given BPM (clamped to
    /// [`MIN_BPM`]).
    pub fn new(bpm: f32) -> Self {
        Self {
            elapsed: 0.0,
            bpm: bpm.max(MIN_BPM),
        }
    }

    /// Current BPM control value
    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// Set the BPM control value, clamped to [`MIN_BPM`]
    pub fn set_bpm(&mut self, bpm: f32) {
        self.bpm = bpm.max(MIN_BPM);
    }

    /// Accumulated simulated time
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the simulated clock by one tick.
    ///
    /// The clock runs faster than wall time in proportion to the BPM:
    /// at 60 BPM simulated time equals wall time.
    pub fn tick(&mut self, dt_seconds: f32) {
        self.elapsed += dt_seconds * (self.bpm / 60.0);
    }

    /// Current phase angle in radians
    pub fn phase(&self) -> f32 {
        self.elapsed * BASE_FREQUENCY
    }
}

/// Turns the shared phase into a contraction scale for one chamber class.
///
/// Owns the smoothed scale needed by the lub-dub policy; for the sinusoid
/// the stored scale simply tracks the target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChamberAnimator {
    timing: ChamberTiming,
    waveform: Waveform,
    current: f32,
}

impl ChamberAnimator {
    /// Create an animator at rest scale (1.0)
    pub fn new(timing: ChamberTiming, waveform: Waveform) -> Self {
        Self {
            timing,
            waveform,
            current: 1.0,
        }
    }

    /// Timing constants for this chamber
    pub fn timing(&self) -> ChamberTiming {
        self.timing
    }

    /// Active waveform policy
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Switch waveform policy, keeping the displayed scale continuous
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Instantaneous target scale at the given phase
    pub fn target_scale(&self, phase: f32) -> f32 {
        let shifted = phase + self.timing.phase_offset;
        match self.waveform {
            Waveform::Sinusoid => 1.0 + self.timing.amplitude * shifted.sin(),
            Waveform::LubDub { step, .. } => {
                if (2.0 * shifted).sin() > 0.5 {
                    1.0 + step
                } else {
                    1.0
                }
            }
        }
    }

    /// Advance one tick and return the scale to apply this frame
    pub fn advance(&mut self, phase: f32) -> f32 {
        let target = self.target_scale(phase);
        match self.waveform {
            Waveform::Sinusoid => self.current = target,
            Waveform::LubDub { smoothing, .. } => {
                self.current += (target - self.current) * smoothing;
            }
        }
        self.current
    }

    /// Scale applied on the most recent tick
    pub fn scale(&self) -> f32 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f32 = 1.0 / 60.0;

    fn sinusoid(amplitude: f32, phase_offset: f32) -> ChamberAnimator {
        ChamberAnimator::new(
            ChamberTiming {
                amplitude,
                phase_offset,
            },
            Waveform::Sinusoid,
        )
    }

    #[test]
    fn test_sixty_ticks_at_sixty_bpm() {
        let mut state = BeatState::new(60.0);
        for _ in 0..60 {
            state.tick(TICK);
        }

        assert!((state.elapsed() - 1.0).abs() < 1e-4);

        let mut ventricle = sinusoid(0.04, 0.0);
        let scale = ventricle.advance(state.phase());
        let expected = 1.0 + 0.04 * (10.0_f32).sin();
        assert!((scale - expected).abs() < 1e-3);
    }

    #[test]
    fn test_sinusoid_scale_bounded() {
        let mut state = BeatState::new(140.0);
        let mut ventricle = sinusoid(0.05, 0.0);

        for _ in 0..10_000 {
            state.tick(TICK);
            let scale = ventricle.advance(state.phase());
            assert!(scale >= 1.0 - 0.05 - 1e-6);
            assert!(scale <= 1.0 + 0.05 + 1e-6);
        }
    }

    #[test]
    fn test_phase_rate_monotonic_in_bpm() {
        let mut slow = BeatState::new(60.0);
        let mut fast = BeatState::new(120.0);

        for _ in 0..100 {
            slow.tick(TICK);
            fast.tick(TICK);
        }

        assert!(fast.phase() > slow.phase());
        // Exactly proportional for fixed tick deltas
        assert!((fast.phase() - 2.0 * slow.phase()).abs() < 1e-4);
    }

    #[test]
    fn test_zero_bpm_clamped() {
        let mut state = BeatState::new(0.0);
        assert_eq!(state.bpm(), MIN_BPM);

        state.set_bpm(-30.0);
        assert_eq!(state.bpm(), MIN_BPM);

        // The clock keeps moving rather than stalling
        state.tick(1.0);
        assert!(state.elapsed() > 0.0);
    }

    #[test]
    fn test_atrium_phase_offset() {
        let ventricle = sinusoid(0.04, 0.0);
        let atrium = sinusoid(0.03, 1.0);

        // At the same phase the two chambers sample different points of
        // the waveform
        let phase = 0.7;
        assert!(
            (ventricle.target_scale(phase) - 1.0 - 0.04 * phase.sin()).abs() < 1e-6
        );
        assert!(
            (atrium.target_scale(phase) - 1.0 - 0.03 * (phase + 1.0).sin()).abs() < 1e-6
        );
    }

    #[test]
    fn test_lub_dub_target_thresholded() {
        let animator = ChamberAnimator::new(
            ChamberTiming {
                amplitude: 0.0,
                phase_offset: 0.0,
            },
            Waveform::LubDub {
                step: 0.05,
                smoothing: 0.2,
            },
        );

        // sin(2 * 0.5) ≈ 0.841 > 0.5: systole
        assert_eq!(animator.target_scale(0.5), 1.05);
        // sin(2 * 2.0) ≈ -0.757: diastole
        assert_eq!(animator.target_scale(2.0), 1.0);
    }

    #[test]
    fn test_lub_dub_relaxes_towards_target() {
        let mut animator = ChamberAnimator::new(
            ChamberTiming {
                amplitude: 0.0,
                phase_offset: 0.0,
            },
            Waveform::LubDub {
                step: 0.05,
                smoothing: 0.2,
            },
        );

        // Hold the phase in systole: the scale must approach 1.05
        // monotonically without overshooting
        let mut previous = animator.scale();
        for _ in 0..50 {
            let scale = animator.advance(0.5);
            assert!(scale >= previous - 1e-6);
            assert!(scale <= 1.05 + 1e-6);
            previous = scale;
        }
        assert!((previous - 1.05).abs() < 1e-3);

        // Release into diastole: it relaxes back down gradually
        let relaxed = animator.advance(2.0);
        assert!(relaxed < previous);
        assert!(relaxed > 1.0);
    }

    #[test]
    fn test_waveform_switch_is_continuous() {
        let mut animator = sinusoid(0.04, 0.0);
        let before = animator.advance(0.3);

        animator.set_waveform(Waveform::LubDub {
            step: 0.05,
            smoothing: 0.2,
        });

        // First lub-dub tick starts from the sinusoid's last scale
        let after = animator.advance(0.3);
        assert!((after - before).abs() < 0.05 * 0.2 + 1e-6);
    }
}
