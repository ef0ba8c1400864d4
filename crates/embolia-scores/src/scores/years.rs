use embolia_core::models::observations::ClinicalObservations;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::policy::ScoringPolicy;
use crate::scoring::{Criterion, ScoreKind, ScoreRange};
use crate::ClinicalScore;

/// YEARS simplified criteria. 3 items; the count selects the D-dimer threshold.
pub struct Years;

static CRITERIA: &[Criterion] = &[
    Criterion {
        id: "years_dvt_signs",
        label: "Signes cliniques de TVP",
        points: 1.0,
        derived: false,
        test: |o, _| o.years_dvt_signs,
    },
    Criterion {
        id: "years_hemoptysis",
        label: "Hémoptysie",
        points: 1.0,
        derived: false,
        test: |o, _| o.years_hemoptysis,
    },
    Criterion {
        id: "years_pe_most_likely",
        label: "EP diagnostic le plus probable (selon le clinicien)",
        points: 1.0,
        derived: false,
        test: |o, _| o.years_pe_most_likely,
    },
];

impl ClinicalScore for Years {
    fn id(&self) -> &str {
        "years"
    }

    fn name(&self) -> &str {
        "Critères YEARS"
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
            max: 3.0,
            step: Some(1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct YearsResult {
    pub count: u8,
    pub label: String,
}

pub fn evaluate(observations: &ClinicalObservations) -> YearsResult {
    let count = Years
        .breakdown(observations, &ScoringPolicy::default())
        .met_count() as u8;
    YearsResult {
        count,
        label: label(count),
    }
}

pub fn label(count: u8) -> String {
    if count == 0 {
        "0 critère".to_string()
    } else {
        format!("{count} critère(s)")
    }
}
