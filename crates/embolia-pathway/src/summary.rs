//! Case summary handed to the reporting side.
//!
//! Built from scratch on request: the recommendation of every stage reached
//! is re-derived from the current observations, never cached.

use std::fmt;

use embolia_core::models::observations::Subgroup;
use embolia_core::models::results::ScoreResults;
use embolia_scores::policy::ScoringPolicy;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::case::PatientCase;
use crate::diagnostic;
use crate::error::PathwayError;
use crate::recommendation::Recommendation;
use crate::stage::Stage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StageSummary {
    pub stage: Stage,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CaseSummary {
    pub case_id: Uuid,
    pub started_at: jiff::Timestamp,
    pub subgroup: Subgroup,
    pub policy: ScoringPolicy,
    pub results: ScoreResults,
    /// D-dimer threshold in the unit the D-dimer was entered in.
    pub ddimer_threshold_display: String,
    /// One block per score, criteria met only.
    pub score_details: Vec<String>,
    pub stages: Vec<StageSummary>,
}

impl CaseSummary {
    pub fn from_case(case: &PatientCase) -> Self {
        let observations = case.observations();
        let results = case.results();
        let policy = case.policy();

        let score_details = embolia_scores::all_scores()
            .iter()
            .map(|score| score.to_structured_input(observations, &policy))
            .collect();

        let stages = Stage::ALL
            .into_iter()
            .take_while(|stage| *stage <= case.stage())
            .map(|stage| StageSummary {
                stage,
                recommendation: stage.evaluate(observations, results),
            })
            .collect();

        Self {
            case_id: case.id(),
            started_at: case.started_at(),
            subgroup: observations.subgroup,
            policy,
            results: results.clone(),
            ddimer_threshold_display: diagnostic::threshold_display(observations, results),
            score_details,
            stages,
        }
    }

    pub fn to_json(&self) -> Result<String, PathwayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for CaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.results;
        writeln!(f, "# Cas {} (débuté {})", self.case_id, self.started_at)?;
        writeln!(f, "Sous-groupe : {}", self.subgroup.label())?;
        writeln!(f)?;
        writeln!(f, "## Scores")?;
        writeln!(f, "Wells : {} ({})", r.wells_score, r.wells_label())?;
        writeln!(
            f,
            "PERC : {} critère(s) ({})",
            r.perc_count,
            if r.perc_positive { "positif" } else { "négatif" }
        )?;
        writeln!(f, "YEARS : {}", r.years_label)?;
        writeln!(f, "Seuil D-dimères : {}", self.ddimer_threshold_display)?;
        writeln!(f, "HESTIA : {}/11", r.hestia_score)?;
        writeln!(f, "Niveau de risque : {}", r.risk_label())?;
        for detail in &self.score_details {
            writeln!(f)?;
            f.write_str(detail)?;
        }

        for summary in &self.stages {
            let rec = &summary.recommendation;
            writeln!(f)?;
            writeln!(f, "## {}", summary.stage.title())?;
            writeln!(f, "{}", rec.text)?;
            if !rec.next_step.is_empty() {
                writeln!(f, "→ {}", rec.next_step)?;
            }
            if let Some(missing) = rec.missing {
                writeln!(f, "En attente : {}", missing.label())?;
            }
            for note in &rec.notes {
                writeln!(f, "- {note}")?;
            }
        }
        Ok(())
    }
}
