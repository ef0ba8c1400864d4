use embolia_core::models::observations::ClinicalObservations;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::policy::ScoringPolicy;

/// How a score's criteria combine into its total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreKind {
    /// Each criterion carries its own weight (Wells).
    Weighted,
    /// One point per criterion met (PERC, YEARS, Hestia).
    Count,
}

/// Defines the valid range for a score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub fn contains(&self, value: f64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min;
            let remainder = offset % step;
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

/// Predicate deciding whether a criterion is met.
pub type CriterionTest = fn(&ClinicalObservations, &ScoringPolicy) -> bool;

/// One item of a clinical score.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Criterion {
    pub id: &'static str,
    pub label: &'static str,
    pub points: f64,
    /// Set when the UI should show the item as computed rather than editable.
    pub derived: bool,
    #[serde(skip)]
    pub test: CriterionTest,
}

/// A criterion evaluated against a set of observations.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriterionResult {
    pub id: String,
    pub label: String,
    pub points: f64,
    /// Computed from a numeric entry or another field, not ticked directly.
    pub derived: bool,
    pub met: bool,
}

/// Item-by-item evaluation of a score.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreBreakdown {
    pub score_id: String,
    pub total: f64,
    pub items: Vec<CriterionResult>,
}

impl ScoreBreakdown {
    pub fn met_count(&self) -> usize {
        self.items.iter().filter(|i| i.met).count()
    }
}
