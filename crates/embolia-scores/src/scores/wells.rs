use embolia_core::models::observations::{ClinicalObservations, Subgroup};
use embolia_core::models::results::WellsCategory;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::policy::ScoringPolicy;
use crate::scoring::{Criterion, ScoreKind, ScoreRange};
use crate::ClinicalScore;

/// Wells score for pulmonary embolism.
/// 7 weighted items, total 0–12.5 in half-point steps.
pub struct Wells;

static CRITERIA: &[Criterion] = &[
    Criterion {
        id: "clinical_dvt",
        label: "Signes cliniques de TVP",
        points: 3.0,
        derived: false,
        test: |o, _| o.clinical_dvt,
    },
    Criterion {
        id: "pe_most_likely",
        label: "EP diagnostic le plus probable",
        points: 3.0,
        derived: false,
        test: |o, _| o.pe_most_likely,
    },
    Criterion {
        id: "heart_rate",
        label: "Fréquence cardiaque > 100 bpm",
        points: 1.5,
        derived: true,
        test: |o, _| o.heart_rate_bpm().is_some_and(|hr| hr > 100),
    },
    Criterion {
        id: "immobilization",
        label: "Immobilisation ≥3j ou chirurgie <4 semaines",
        points: 1.5,
        derived: false,
        test: |o, _| o.immobilization,
    },
    Criterion {
        id: "prior_vte",
        label: "Antécédent de TVP/EP",
        points: 1.5,
        derived: false,
        test: |o, _| o.prior_vte,
    },
    Criterion {
        id: "hemoptysis",
        label: "Hémoptysie",
        points: 1.0,
        derived: false,
        test: |o, _| o.hemoptysis,
    },
    Criterion {
        id: "malignancy",
        label: "Cancer actif (traitement en cours, palliatif ou <6 mois)",
        points: 1.0,
        derived: false,
        test: |o, _| o.malignancy,
    },
];

impl ClinicalScore for Wells {
    fn id(&self) -> &str {
        "wells"
    }

    fn name(&self) -> &str {
        "Score de Wells"
    }

    fn kind(&self) -> ScoreKind {
        ScoreKind::Weighted
    }

    fn criteria(&self) -> &[Criterion] {
        CRITERIA
    }

    fn range(&self) -> ScoreRange {
        ScoreRange {
            min: 0.0,
            max: 12.5,
            step: Some(0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WellsResult {
    pub score: f64,
    pub category: WellsCategory,
}

pub fn evaluate(observations: &ClinicalObservations) -> WellsResult {
    // Wells has no policy-dependent item.
    let score = Wells.total(observations, &ScoringPolicy::default());
    WellsResult {
        score,
        category: category(score, observations.subgroup),
    }
}

/// Probability band for `score`.
///
/// Standard and pregnant patients: ≤1 low, ≤6 moderate, >6 high. Active
/// cancer: ≤4 low/moderate, >4 high.
pub fn category(score: f64, subgroup: Subgroup) -> WellsCategory {
    match subgroup {
        Subgroup::ActiveCancer if score <= 4.0 => WellsCategory::CancerLowModerate,
        Subgroup::ActiveCancer => WellsCategory::CancerHigh,
        _ if score <= 1.0 => WellsCategory::Low,
        _ if score <= 6.0 => WellsCategory::Moderate,
        _ => WellsCategory::High,
    }
}
