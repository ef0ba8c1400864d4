use embolia_core::models::observations::ClinicalObservations;
use embolia_core::models::results::ScoreResults;

use crate::recommendation::{MissingInput, Recommendation, Severity};
use crate::tiers::{self, RiskTier};

/// Risk stratification of a confirmed PE.
pub fn evaluate(observations: &ClinicalObservations, results: &ScoreResults) -> Recommendation {
    if !observations.pe_confirmed {
        return Recommendation::undetermined(
            "EP non confirmée : stratification du risque non applicable.",
            Some(MissingInput::PeConfirmation),
        );
    }

    let tier = tiers::tier_for(observations);
    let (description, guidance, severity) = match tier {
        RiskTier::High => (
            "Choc ou hypotension. Risque de mortalité précoce > 15%.",
            "Thrombolyse systémique ou embolectomie en urgence. Anticoagulation (HNF). Soins intensifs.",
            Severity::Danger,
        ),
        RiskTier::IntermediateHigh => (
            "Stabilité hémodynamique MAIS dysfonction VD ET biomarqueurs positifs. Risque de mortalité 3-15%.",
            "Anticoagulation. Hospitalisation. Surveillance rapprochée. Discuter thrombolyse de sauvetage ou ttt. percutané si dégradation.",
            Severity::Warning,
        ),
        RiskTier::IntermediateLow => (
            "Stabilité hémodynamique ET dysfonction VD OU biomarqueurs positifs (un seul des deux). Risque de mortalité 3-15%.",
            "Anticoagulation. Hospitalisation généralement.",
            Severity::Warning,
        ),
        RiskTier::Low => (
            "Stabilité hémodynamique, pas de dysfonction VD, pas de biomarqueurs positifs. Risque de mortalité < 1-3%.",
            "Anticoagulation. Traitement ambulatoire possible (critères HESTIA).",
            Severity::Success,
        ),
    };

    let mut notes = vec![format!("Niveau de risque : {}", results.risk_label())];
    if let Some(extent) = observations.ctpa_findings.label() {
        notes.push(format!("Étendue au CTPA : {extent}"));
    }
    if observations
        .systolic_bp_mmhg()
        .is_some_and(|sbp| sbp < 90)
        && !observations.hemodynamically_unstable
    {
        notes.push("PAS actuelle < 90 mmHg : indique une instabilité.".to_string());
    }
    if observations.bleeding_risk {
        notes.push(
            "Risque hémorragique élevé identifié : contre-indication relative/absolue à la thrombolyse/anticoagulation intensive."
                .to_string(),
        );
    }

    tracing::debug!(tier = ?tier, "risk stratification evaluated");

    Recommendation::new(
        format!("{} : {description}", tier.label()),
        guidance,
        severity,
    )
    .with_notes(notes)
}
