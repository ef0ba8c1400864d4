//! ESC severity tiers for confirmed PE.
//!
//! The coarse classifier in `embolia_scores::scores::risk` stops at
//! intermediate. Here the intermediate tier is split: intermediate-high needs
//! RV dysfunction and a positive biomarker together.

use embolia_core::models::observations::ClinicalObservations;
use embolia_scores::scores::risk::RiskInputs;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskTier {
    High,
    IntermediateHigh,
    IntermediateLow,
    Low,
}

impl RiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "RISQUE ÉLEVÉ (Instabilité Hémodynamique)",
            Self::IntermediateHigh => "RISQUE INTERMÉDIAIRE-ÉLEVÉ",
            Self::IntermediateLow => "RISQUE INTERMÉDIAIRE-FAIBLE",
            Self::Low => "RISQUE FAIBLE",
        }
    }

    pub fn is_intermediate(&self) -> bool {
        matches!(self, Self::IntermediateHigh | Self::IntermediateLow)
    }
}

pub fn is_true_high_risk(inputs: &RiskInputs) -> bool {
    inputs.is_shock()
}

pub fn is_true_intermediate_high_risk(inputs: &RiskInputs) -> bool {
    !inputs.is_shock() && inputs.rv_dysfunction && inputs.has_biomarkers()
}

/// Exactly one of RV dysfunction and biomarkers.
pub fn is_true_intermediate_low_risk(inputs: &RiskInputs) -> bool {
    !inputs.is_shock() && (inputs.rv_dysfunction != inputs.has_biomarkers())
}

pub fn is_true_low_risk(inputs: &RiskInputs) -> bool {
    !inputs.is_shock() && !inputs.rv_dysfunction && !inputs.has_biomarkers()
}

pub fn tier(inputs: &RiskInputs) -> RiskTier {
    if is_true_high_risk(inputs) {
        RiskTier::High
    } else if is_true_intermediate_high_risk(inputs) {
        RiskTier::IntermediateHigh
    } else if is_true_intermediate_low_risk(inputs) {
        RiskTier::IntermediateLow
    } else {
        RiskTier::Low
    }
}

pub fn tier_for(observations: &ClinicalObservations) -> RiskTier {
    tier(&RiskInputs::from(observations))
}
