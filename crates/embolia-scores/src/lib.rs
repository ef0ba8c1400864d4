//! embolia-scores
//!
//! Clinical score calculators for suspected pulmonary embolism. Pure
//! functions of the observations: Wells, PERC, YEARS, Hestia, the D-dimer
//! threshold and the coarse risk classifier.

pub mod error;
pub mod policy;
pub mod scores;
pub mod scoring;

use embolia_core::models::observations::ClinicalObservations;
use embolia_core::models::results::ScoreResults;
use policy::ScoringPolicy;
use scoring::{Criterion, CriterionResult, ScoreBreakdown, ScoreKind, ScoreRange};

/// Trait implemented by each criteria-based clinical score.
pub trait ClinicalScore: Send + Sync {
    /// Unique identifier for this score (e.g., "wells", "hestia").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Score de Wells").
    fn name(&self) -> &str;

    fn kind(&self) -> ScoreKind;

    /// The items this score is made of, in display order.
    fn criteria(&self) -> &[Criterion];

    /// The range every total of this score falls in.
    fn range(&self) -> ScoreRange;

    /// Evaluate every criterion against `observations`.
    fn breakdown(&self, observations: &ClinicalObservations, policy: &ScoringPolicy) -> ScoreBreakdown {
        let items: Vec<CriterionResult> = self
            .criteria()
            .iter()
            .map(|c| CriterionResult {
                id: c.id.to_string(),
                label: c.label.to_string(),
                points: c.points,
                derived: c.derived,
                met: (c.test)(observations, policy),
            })
            .collect();
        let total = items.iter().filter(|i| i.met).map(|i| i.points).sum();

        ScoreBreakdown {
            score_id: self.id().to_string(),
            total,
            items,
        }
    }

    fn total(&self, observations: &ClinicalObservations, policy: &ScoringPolicy) -> f64 {
        self.breakdown(observations, policy).total
    }

    /// Format the criteria met as structured text for a case summary.
    fn to_structured_input(&self, observations: &ClinicalObservations, policy: &ScoringPolicy) -> String {
        let breakdown = self.breakdown(observations, policy);
        let mut output = format!("### {} : {}\n", self.name(), breakdown.total);
        for item in breakdown.items.iter().filter(|i| i.met) {
            match self.kind() {
                ScoreKind::Weighted => {
                    output.push_str(&format!("- {} (+{})\n", item.label, item.points))
                }
                ScoreKind::Count => output.push_str(&format!("- {}\n", item.label)),
            }
        }
        output
    }
}

/// Return all registered scores.
pub fn all_scores() -> Vec<Box<dyn ClinicalScore>> {
    vec![
        Box::new(scores::wells::Wells),
        Box::new(scores::perc::Perc),
        Box::new(scores::years::Years),
        Box::new(scores::hestia::Hestia),
    ]
}

/// Look up a score by ID.
pub fn get_score(id: &str) -> Result<Box<dyn ClinicalScore>, error::ScoreError> {
    all_scores()
        .into_iter()
        .find(|s| s.id() == id)
        .ok_or_else(|| error::ScoreError::UnknownScore(id.to_string()))
}

/// Recompute every result from scratch.
pub fn compute_results(observations: &ClinicalObservations, policy: &ScoringPolicy) -> ScoreResults {
    let wells = scores::wells::evaluate(observations);
    let perc = scores::perc::evaluate(observations);
    let years = scores::years::evaluate(observations);
    let ddimer_threshold = scores::ddimer::threshold(
        &scores::ddimer::ThresholdInput {
            age: observations.age_years(),
            wells_score: wells.score,
            years_count: years.count,
            subgroup: observations.subgroup,
        },
        policy,
    );
    let hestia = scores::hestia::evaluate(observations, policy);
    let risk_level = scores::risk::classify(&scores::risk::RiskInputs::from(observations));

    tracing::debug!(
        wells = wells.score,
        perc = perc.count,
        years = years.count,
        ddimer_threshold,
        hestia = hestia.score,
        risk = ?risk_level,
        "scores recomputed"
    );

    ScoreResults {
        wells_score: wells.score,
        wells_category: Some(wells.category),
        perc_count: perc.count,
        perc_positive: perc.positive,
        years_count: years.count,
        years_label: years.label,
        ddimer_threshold,
        hestia_score: hestia.score,
        outpatient_eligible: hestia.outpatient_eligible,
        risk_level: Some(risk_level),
    }
}
