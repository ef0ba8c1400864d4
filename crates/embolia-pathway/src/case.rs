//! One patient's pass through the pathway.

use embolia_core::error::CoreError;
use embolia_core::models::change::ObservationChange;
use embolia_core::models::observations::{ClinicalObservations, Subgroup};
use embolia_core::models::results::ScoreResults;
use embolia_scores::policy::ScoringPolicy;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::PathwayError;
use crate::recommendation::Recommendation;
use crate::stage::Stage;
use crate::summary::CaseSummary;

/// Observations, the results derived from them and the current stage.
///
/// Results are recomputed after every accepted change, so they always
/// reflect the observations they sit next to. A stored case is loaded through
/// [`StoredCase`]: stored results are ignored and recomputed, and the stage is
/// pulled back to one whose entry guard holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(from = "StoredCase")]
#[ts(export)]
pub struct PatientCase {
    id: Uuid,
    started_at: jiff::Timestamp,
    policy: ScoringPolicy,
    observations: ClinicalObservations,
    results: ScoreResults,
    stage: Stage,
}

/// Serialized shape of a case, before its derived state is rebuilt.
#[derive(Debug, Deserialize)]
pub struct StoredCase {
    id: Uuid,
    started_at: jiff::Timestamp,
    #[serde(default)]
    policy: ScoringPolicy,
    observations: ClinicalObservations,
    #[serde(default)]
    stage: Stage,
}

impl From<StoredCase> for PatientCase {
    fn from(stored: StoredCase) -> Self {
        let observations = stored.observations.normalized();
        let results = embolia_scores::compute_results(&observations, &stored.policy);
        let mut case = Self {
            id: stored.id,
            started_at: stored.started_at,
            policy: stored.policy,
            observations,
            results,
            stage: stored.stage,
        };
        case.fall_back_to_reachable_stage();
        case
    }
}

impl PatientCase {
    pub fn new(subgroup: Subgroup, policy: ScoringPolicy) -> Self {
        let observations = ClinicalObservations::for_subgroup(subgroup);
        let results = embolia_scores::compute_results(&observations, &policy);
        let case = Self {
            id: Uuid::new_v4(),
            started_at: jiff::Timestamp::now(),
            policy,
            observations,
            results,
            stage: Stage::Diagnostic,
        };
        tracing::info!(case_id = %case.id, subgroup = ?subgroup, "case started");
        case
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> jiff::Timestamp {
        self.started_at
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    pub fn observations(&self) -> &ClinicalObservations {
        &self.observations
    }

    pub fn results(&self) -> &ScoreResults {
        &self.results
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Apply one edit and recompute every result.
    ///
    /// A rejected edit leaves the case untouched. If the edit closes the
    /// current stage's entry guard, the case falls back to the furthest
    /// stage still reachable.
    pub fn apply(&mut self, change: ObservationChange) -> Result<&ScoreResults, PathwayError> {
        let observations = match self.observations.apply(change) {
            Ok(observations) => observations,
            Err(CoreError::LockedField(field)) => {
                tracing::warn!(case_id = %self.id, field = %field, "edit rejected on locked field");
                return Err(CoreError::LockedField(field).into());
            }
            Err(e) => return Err(e.into()),
        };
        self.observations = observations;
        self.results = embolia_scores::compute_results(&self.observations, &self.policy);
        self.fall_back_to_reachable_stage();
        Ok(&self.results)
    }

    fn fall_back_to_reachable_stage(&mut self) {
        while !self.stage.is_reachable(&self.observations) {
            let Some(previous) = self.stage.previous() else {
                break;
            };
            tracing::info!(case_id = %self.id, from = %self.stage, to = %previous, "stage no longer reachable");
            self.stage = previous;
        }
    }

    /// Replace the scoring policy and recompute.
    pub fn set_policy(&mut self, policy: ScoringPolicy) {
        self.policy = policy;
        self.results = embolia_scores::compute_results(&self.observations, &self.policy);
        tracing::info!(case_id = %self.id, "scoring policy changed");
    }

    pub fn advance(&mut self) -> Result<Stage, PathwayError> {
        let next = self.stage.next().ok_or(PathwayError::NoNextStage(self.stage))?;
        if !next.is_reachable(&self.observations) {
            return Err(PathwayError::StageNotReachable {
                from: self.stage,
                to: next,
            });
        }
        tracing::info!(case_id = %self.id, from = %self.stage, to = %next, "stage advanced");
        self.stage = next;
        Ok(next)
    }

    pub fn go_back(&mut self) -> Result<Stage, PathwayError> {
        let previous = self.stage.previous().ok_or(PathwayError::NoPreviousStage)?;
        tracing::info!(case_id = %self.id, from = %self.stage, to = %previous, "stage went back");
        self.stage = previous;
        Ok(previous)
    }

    /// Discard everything and start a new case, keeping the policy.
    pub fn reset(&mut self, subgroup: Subgroup) {
        let previous_id = self.id;
        *self = Self::new(subgroup, self.policy);
        tracing::info!(previous_case_id = %previous_id, case_id = %self.id, "case reset");
    }

    pub fn current_recommendation(&self) -> Recommendation {
        self.stage.evaluate(&self.observations, &self.results)
    }

    pub fn summary(&self) -> CaseSummary {
        CaseSummary::from_case(self)
    }
}
