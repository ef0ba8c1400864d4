use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Pre-test probability band from the Wells score.
///
/// Active-cancer patients use their own two-band split and never report the
/// general moderate band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WellsCategory {
    /// Score ≤ 1.
    Low,
    /// Score 1.5–6.
    Moderate,
    /// Score > 6.
    High,
    /// Active cancer, score ≤ 4.
    CancerLowModerate,
    /// Active cancer, score > 4.
    CancerHigh,
}

impl WellsCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Faible (≤1)",
            Self::Moderate => "Modérée (2-6)",
            Self::High => "Élevée (>6)",
            Self::CancerLowModerate => "Faible/Modérée (≤4)",
            Self::CancerHigh => "Élevée (>4)",
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, Self::High | Self::CancerHigh)
    }
}

/// Coarse PE severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Intermediate,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "faible",
            Self::Intermediate => "intermédiaire",
            Self::High => "élevé",
        }
    }
}

/// Everything computed from the current observations.
///
/// Recomputed as a whole after every observation change; never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResults {
    pub wells_score: f64,
    pub wells_category: Option<WellsCategory>,
    pub perc_count: u8,
    pub perc_positive: bool,
    pub years_count: u8,
    pub years_label: String,
    /// Always mg/L (FEU), whatever unit the D-dimer was entered in.
    pub ddimer_threshold: f64,
    pub hestia_score: u8,
    pub outpatient_eligible: bool,
    pub risk_level: Option<RiskLevel>,
}

impl Default for ScoreResults {
    fn default() -> Self {
        Self {
            wells_score: 0.0,
            wells_category: None,
            perc_count: 0,
            perc_positive: false,
            years_count: 0,
            years_label: String::new(),
            ddimer_threshold: 0.5,
            hestia_score: 0,
            outpatient_eligible: true,
            risk_level: None,
        }
    }
}

impl ScoreResults {
    pub fn wells_label(&self) -> &'static str {
        self.wells_category.map(|c| c.label()).unwrap_or("non déterminé")
    }

    pub fn risk_label(&self) -> &'static str {
        self.risk_level.map(|r| r.label()).unwrap_or("non déterminé")
    }
}
