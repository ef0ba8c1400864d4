use embolia_core::models::observations::ClinicalObservations;
use embolia_core::models::results::RiskLevel;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Inputs of the coarse severity classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskInputs {
    pub hemodynamically_unstable: bool,
    pub systolic_bp: Option<i64>,
    pub rv_dysfunction: bool,
    pub troponin: bool,
    pub bnp: bool,
}

impl From<&ClinicalObservations> for RiskInputs {
    fn from(o: &ClinicalObservations) -> Self {
        Self {
            hemodynamically_unstable: o.hemodynamically_unstable,
            systolic_bp: o.systolic_bp_mmhg(),
            rv_dysfunction: o.rv_dysfunction,
            troponin: o.troponin,
            bnp: o.bnp,
        }
    }
}

impl RiskInputs {
    /// Shock or persistent hypotension (SBP < 90 mmHg).
    pub fn is_shock(&self) -> bool {
        self.hemodynamically_unstable || self.systolic_bp.is_some_and(|sbp| sbp < 90)
    }

    pub fn has_biomarkers(&self) -> bool {
        self.troponin || self.bnp
    }
}

/// First match wins: shock → high, RV dysfunction or any biomarker →
/// intermediate, otherwise low.
pub fn classify(inputs: &RiskInputs) -> RiskLevel {
    if inputs.is_shock() {
        RiskLevel::High
    } else if inputs.rv_dysfunction || inputs.has_biomarkers() {
        RiskLevel::Intermediate
    } else {
        RiskLevel::Low
    }
}
