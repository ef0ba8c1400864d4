//! Pathway stages and their entry guards.

use std::fmt;

use embolia_core::models::observations::ClinicalObservations;
use embolia_core::models::results::ScoreResults;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::recommendation::Recommendation;
use crate::tiers::{self, RiskTier};
use crate::{diagnostic, disposition, stratification, treatment};

/// Stages in pathway order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Stage {
    #[default]
    Diagnostic,
    RiskStratification,
    Treatment,
    Disposition,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Diagnostic,
        Stage::RiskStratification,
        Stage::Treatment,
        Stage::Disposition,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Diagnostic => "diagnostic",
            Self::RiskStratification => "risk_stratification",
            Self::Treatment => "treatment",
            Self::Disposition => "disposition",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Diagnostic => "Diagnostic de l'EP",
            Self::RiskStratification => "Stratification du Risque de l'EP Confirmée",
            Self::Treatment => "Recommandations Thérapeutiques",
            Self::Disposition => "Critères d'Hospitalisation vs Traitement Ambulatoire",
        }
    }

    pub fn next(&self) -> Option<Stage> {
        match self {
            Self::Diagnostic => Some(Self::RiskStratification),
            Self::RiskStratification => Some(Self::Treatment),
            Self::Treatment => Some(Self::Disposition),
            Self::Disposition => None,
        }
    }

    pub fn previous(&self) -> Option<Stage> {
        match self {
            Self::Diagnostic => None,
            Self::RiskStratification => Some(Self::Diagnostic),
            Self::Treatment => Some(Self::RiskStratification),
            Self::Disposition => Some(Self::Treatment),
        }
    }

    /// Entry guard of this stage.
    pub fn is_reachable(&self, observations: &ClinicalObservations) -> bool {
        match self {
            Self::Diagnostic => true,
            Self::RiskStratification | Self::Treatment => observations.pe_confirmed,
            Self::Disposition => {
                observations.pe_confirmed && tiers::tier_for(observations) == RiskTier::Low
            }
        }
    }

    pub fn evaluate(&self, observations: &ClinicalObservations, results: &ScoreResults) -> Recommendation {
        match self {
            Self::Diagnostic => diagnostic::evaluate(observations, results).recommendation,
            Self::RiskStratification => stratification::evaluate(observations, results),
            Self::Treatment => treatment::evaluate(observations),
            Self::Disposition => disposition::evaluate(observations, results),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
