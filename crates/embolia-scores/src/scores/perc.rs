use embolia_core::models::observations::{ClinicalObservations, Subgroup};
use embolia_core::models::results::WellsCategory;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::policy::ScoringPolicy;
use crate::scoring::{Criterion, ScoreKind, ScoreRange};
use crate::ClinicalScore;

/// PERC: Pulmonary Embolism Rule-out Criteria.
/// 8 items, one point each. A single item met means PE is not ruled out.
pub struct Perc;

static CRITERIA: &[Criterion] = &[
    Criterion {
        id: "age_over_50",
        label: "Âge ≥ 50 ans",
        points: 1.0,
        derived: true,
        test: |o, _| o.age_over_50(),
    },
    Criterion {
        id: "hr_over_100",
        label: "FC ≥ 100 bpm",
        points: 1.0,
        derived: true,
        test: |o, _| o.hr_over_100(),
    },
    Criterion {
        id: "oxygen_saturation",
        label: "SpO2 < 95% à l'air ambiant",
        points: 1.0,
        derived: true,
        test: |o, _| o.oxygen_saturation_pct().is_some_and(|sat| sat < 95.0),
    },
    Criterion {
        id: "leg_swelling",
        label: "Œdème unilatéral de jambe",
        points: 1.0,
        derived: false,
        test: |o, _| o.leg_swelling,
    },
    Criterion {
        id: "hemoptysis",
        label: "Hémoptysie",
        points: 1.0,
        derived: false,
        test: |o, _| o.hemoptysis,
    },
    Criterion {
        id: "recent_surgery",
        label: "Chirurgie ou traumatisme récent (<4 semaines)",
        points: 1.0,
        derived: false,
        test: |o, _| o.recent_surgery,
    },
    Criterion {
        id: "prior_vte",
        label: "Antécédent de TVP/EP",
        points: 1.0,
        derived: false,
        test: |o, _| o.prior_vte,
    },
    Criterion {
        id: "hormones",
        label: "Prise d'œstrogènes",
        points: 1.0,
        derived: false,
        test: |o, _| o.hormones,
    },
];

impl ClinicalScore for Perc {
    fn id(&self) -> &str {
        "perc"
    }

    fn name(&self) -> &str {
        "Critères PERC"
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
            max: 8.0,
            step: Some(1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PercResult {
    pub count: u8,
    pub positive: bool,
}

impl PercResult {
    pub fn from_count(count: u8) -> Self {
        Self {
            count,
            positive: count > 0,
        }
    }
}

pub fn evaluate(observations: &ClinicalObservations) -> PercResult {
    let count = Perc
        .breakdown(observations, &ScoringPolicy::default())
        .met_count();
    PercResult::from_count(count as u8)
}

/// PERC only rules out PE for a low Wells score in the standard subgroup.
pub fn is_applicable(category: WellsCategory, subgroup: Subgroup) -> bool {
    category == WellsCategory::Low && subgroup == Subgroup::Standard
}
