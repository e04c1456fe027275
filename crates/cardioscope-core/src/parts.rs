//! Heart part identities and annotation metadata
//!
//! Each mesh in the scene is identified by a [`HeartPart`], which carries
//! the display name and description surfaced by the hover tooltip and the
//! [`ChamberRole`] that decides which contraction scale the animator
//! applies to it.

use serde::{Deserialize, Serialize};

/// Identity of a structure in the heart scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeartPart {
    /// Left ventricle
    LeftVentricle,
    /// Right ventricle
    RightVentricle,
    /// Left atrium
    LeftAtrium,
    /// Right atrium
    RightAtrium,
    /// Aortic arch
    Aorta,
    /// Pulmonary trunk
    PulmonaryTrunk,
    /// Superior vena cava
    SuperiorVenaCava,
    /// Inferior vena cava
    InferiorVenaCava,
    /// Pulmonary veins
    PulmonaryVeins,
}

/// Which contraction scale a part follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChamberRole {
    /// Scales with the ventricular pulse
    Ventricle,
    /// Scales with the atrial pulse (phase-offset from the ventricles)
    Atrium,
    /// Does not pulse (great vessels)
    Static,
}

impl HeartPart {
    /// All parts, in scene traversal order
    pub const ALL: [HeartPart; 9] = [
        HeartPart::LeftVentricle,
        HeartPart::RightVentricle,
        HeartPart::LeftAtrium,
        HeartPart::RightAtrium,
        HeartPart::Aorta,
        HeartPart::PulmonaryTrunk,
        HeartPart::SuperiorVenaCava,
        HeartPart::InferiorVenaCava,
        HeartPart::PulmonaryVeins,
    ];

    /// Display name for the tooltip
    pub fn name(&self) -> &'static str {
        match self {
            HeartPart::LeftVentricle => "Left Ventricle",
            HeartPart::RightVentricle => "Right Ventricle",
            HeartPart::LeftAtrium => "Left Atrium",
            HeartPart::RightAtrium => "Right Atrium",
            HeartPart::Aorta => "Aorta",
            HeartPart::PulmonaryTrunk => "Pulmonary Trunk",
            HeartPart::SuperiorVenaCava => "Superior Vena Cava",
            HeartPart::InferiorVenaCava => "Inferior Vena Cava",
            HeartPart::PulmonaryVeins => "Pulmonary Veins",
        }
    }

    /// Descriptive string for the tooltip
    pub fn description(&self) -> &'static str {
        match self {
            HeartPart::LeftVentricle => {
                "The thickest chamber. Pumps oxygenated blood through the aorta to the body."
            }
            HeartPart::RightVentricle => {
                "Pumps deoxygenated blood through the pulmonary trunk to the lungs."
            }
            HeartPart::LeftAtrium => {
                "Receives oxygenated blood from the lungs via the pulmonary veins."
            }
            HeartPart::RightAtrium => {
                "Receives deoxygenated blood from the body via the venae cavae."
            }
            HeartPart::Aorta => {
                "The largest artery. Carries oxygenated blood from the left ventricle."
            }
            HeartPart::PulmonaryTrunk => {
                "Carries deoxygenated blood from the right ventricle towards the lungs."
            }
            HeartPart::SuperiorVenaCava => {
                "Returns deoxygenated blood from the upper body to the right atrium."
            }
            HeartPart::InferiorVenaCava => {
                "Returns deoxygenated blood from the lower body to the right atrium."
            }
            HeartPart::PulmonaryVeins => {
                "Return oxygenated blood from the lungs to the left atrium."
            }
        }
    }

    /// Which contraction scale this part follows
    pub fn role(&self) -> ChamberRole {
        match self {
            HeartPart::LeftVentricle | HeartPart::RightVentricle => ChamberRole::Ventricle,
            HeartPart::LeftAtrium | HeartPart::RightAtrium => ChamberRole::Atrium,
            _ => ChamberRole::Static,
        }
    }

    /// Annotation pair for this part
    pub fn label(&self) -> PartLabel {
        PartLabel {
            name: self.name(),
            description: self.description(),
        }
    }
}

/// `(name, description)` pair surfaced by the annotation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartLabel {
    /// Display name
    pub name: &'static str,
    /// Descriptive string
    pub description: &'static str,
}

impl PartLabel {
    /// Sentinel emitted when nothing is hovered.
    pub fn none_selected() -> Self {
        Self {
            name: "No selection",
            description: "Hover over a heart structure to see details.",
        }
    }

    /// True if this is the no-selection sentinel
    pub fn is_none_selected(&self) -> bool {
        *self == Self::none_selected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_unique_and_nonempty() {
        let names: HashSet<&str> = HeartPart::ALL.iter().map(HeartPart::name).collect();
        assert_eq!(names.len(), HeartPart::ALL.len());
        assert!(HeartPart::ALL
            .iter()
            .all(|p| !p.name().is_empty() && !p.description().is_empty()));
    }

    #[test]
    fn test_roles() {
        assert_eq!(HeartPart::LeftVentricle.role(), ChamberRole::Ventricle);
        assert_eq!(HeartPart::RightAtrium.role(), ChamberRole::Atrium);
        assert_eq!(HeartPart::Aorta.role(), ChamberRole::Static);
    }

    #[test]
    fn test_sentinel_label() {
        let sentinel = PartLabel::none_selected();
        assert!(sentinel.is_none_selected());
        assert!(!HeartPart::LeftVentricle.label().is_none_selected());
    }
}
