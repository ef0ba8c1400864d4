use embolia_core::models::observations::ClinicalObservations;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::policy::{HestiaHemodynamicRule, ScoringPolicy};
use crate::scoring::{Criterion, ScoreKind, ScoreRange};
use crate::ClinicalScore;

/// Hestia criteria: contraindications to outpatient treatment.
/// 11 unweighted items; any single one rules out outpatient management.
pub struct Hestia;

static CRITERIA: &[Criterion] = &[
    Criterion {
        id: "hemodynamically_unstable",
        label: "Instabilité hémodynamique (PAS <100 mmHg ou FC >100 bpm)",
        points: 1.0,
        derived: false,
        test: hemodynamically_unstable,
    },
    Criterion {
        id: "thrombolysis_needed",
        label: "Thrombolyse ou embolectomie nécessaire",
        points: 1.0,
        derived: false,
        test: |o, _| o.thrombolysis_needed,
    },
    Criterion {
        id: "active_bleeding",
        label: "Saignement actif ou risque hémorragique élevé (ex: plaquettes < 75 G/L, TA > 180/110 non contrôlée)",
        points: 1.0,
        derived: false,
        test: |o, _| o.active_bleeding,
    },
    Criterion {
        id: "oxygen_needed",
        label: "Oxygénothérapie >24h pour maintenir SpO2 >90%",
        points: 1.0,
        derived: false,
        test: |o, _| o.oxygen_needed || o.oxygen_saturation_pct().is_some_and(|sat| sat < 90.0),
    },
    Criterion {
        id: "pe_on_anticoagulation",
        label: "EP diagnostiquée sous anticoagulation curative",
        points: 1.0,
        derived: false,
        test: |o, _| o.pe_on_anticoagulation,
    },
    Criterion {
        id: "severe_pain",
        label: "Douleur sévère nécessitant analgésiques IV >24h",
        points: 1.0,
        derived: false,
        test: |o, _| o.severe_pain,
    },
    Criterion {
        id: "social_reasons",
        label: "Raison médicale ou sociale nécessitant admission >24h",
        points: 1.0,
        derived: false,
        test: |o, _| o.social_reasons,
    },
    Criterion {
        id: "renal_impairment",
        label: "Clairance créatinine <30 mL/min",
        points: 1.0,
        derived: false,
        test: |o, _| o.renal_impairment || o.has_severe_renal_impairment(),
    },
    Criterion {
        id: "liver_impairment",
        label: "Insuffisance hépatique sévère (Child-Pugh C)",
        points: 1.0,
        derived: false,
        test: |o, _| o.liver_impairment,
    },
    Criterion {
        id: "pregnancy",
        label: "Grossesse",
        points: 1.0,
        derived: false,
        test: |o, _| o.pregnancy_hestia || o.is_pregnant(),
    },
    Criterion {
        id: "hit_history",
        label: "Antécédent de thrombopénie induite à l'héparine (TIH)",
        points: 1.0,
        derived: false,
        test: |o, _| o.hit_history,
    },
];

fn hemodynamically_unstable(o: &ClinicalObservations, policy: &ScoringPolicy) -> bool {
    match policy.hestia_hemodynamic {
        HestiaHemodynamicRule::FlagOnly => o.hemodynamically_unstable,
        HestiaHemodynamicRule::FlagOrVitals => {
            o.hemodynamically_unstable
                || o.systolic_bp_mmhg().is_some_and(|sbp| sbp < 100)
                || o.heart_rate_bpm().is_some_and(|hr| hr > 100)
        }
    }
}

impl ClinicalScore for Hestia {
    fn id(&self) -> &str {
        "hestia"
    }

    fn name(&self) -> &str {
        "Critères HESTIA"
    }

    fn kind(&self) -> ScoreKind {
        ScoreKind::Count
    }

    fn criteria(&self) -> &[Criterion] {
        CRITERIA
    }

    fn range(&self) -> ScoreRange {
        ScoreRange {
            min: 0.0,
            max: 11.0,
            step: Some(1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HestiaResult {
    pub score: u8,
    pub outpatient_eligible: bool,
}

impl HestiaResult {
    pub fn from_score(score: u8) -> Self {
        Self {
            score,
            outpatient_eligible: score == 0,
        }
    }
}

pub fn evaluate(observations: &ClinicalObservations, policy: &ScoringPolicy) -> HestiaResult {
    let score = Hestia.breakdown(observations, policy).met_count();
    HestiaResult::from_score(score as u8)
}
