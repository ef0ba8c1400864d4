use embolia_core::models::observations::ClinicalObservations;
use embolia_core::models::results::ScoreResults;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::recommendation::{MissingInput, Recommendation, Severity};
use crate::tiers::{self, RiskTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DispositionOutcome {
    Outpatient,
    Hospitalization,
}

pub const OUTPATIENT_CHECKLIST: [&str; 6] = [
    "Initier le traitement anticoagulant (AOD de préférence) aux urgences ou en consultation très rapide.",
    "Éducation thérapeutique du patient et de son entourage (reconnaissance des signes de complication, importance de l'observance).",
    "Organiser un suivi médical rapproché (ex: consultation à J2-J7).",
    "Assurer la disponibilité d'un contact médical en cas de problème.",
    "Vérifier l'absence de contre-indications aux AODs (interactions médicamenteuses majeures, etc.).",
    "Fournir des instructions claires sur quand consulter en urgence.",
];

pub const FOLLOW_UP: [&str; 3] = [
    "Court terme (1-4 semaines) : évaluer la réponse clinique, la tolérance et l'observance du traitement anticoagulant. Rechercher des saignements.",
    "Moyen terme (3 mois) : réévaluer la nécessité de poursuivre l'anticoagulation. Rechercher un syndrome post-EP ou une HTP-TEC.",
    "Long terme (au-delà de 3-6 mois) : pour les EP non provoquées ou avec facteurs de risque persistants, discuter un traitement anticoagulant prolongé.",
];

const CANCER_CAUTION: &str = "Cancer actif : l'éligibilité au traitement ambulatoire doit être discutée au cas par cas (risque de récidive et de saignement plus élevé).";

/// Hestia decides, and only for a confirmed low-risk PE.
pub fn outcome(observations: &ClinicalObservations, results: &ScoreResults) -> Option<DispositionOutcome> {
    if !observations.pe_confirmed || tiers::tier_for(observations) != RiskTier::Low {
        return None;
    }
    Some(if results.outpatient_eligible {
        DispositionOutcome::Outpatient
    } else {
        DispositionOutcome::Hospitalization
    })
}

pub fn evaluate(observations: &ClinicalObservations, results: &ScoreResults) -> Recommendation {
    if !observations.pe_confirmed {
        return Recommendation::undetermined(
            "EP non confirmée : orientation non applicable.",
            Some(MissingInput::PeConfirmation),
        );
    }
    let Some(outcome) = outcome(observations, results) else {
        return Recommendation::undetermined(
            "Les critères HESTIA ne s'appliquent qu'aux EP à faible risque. Hospitalisation selon le niveau de risque.",
            None,
        );
    };

    let score_line = format!(
        "Score HESTIA: {} critère(s) positif(s) sur 11.",
        results.hestia_score
    );
    let recommendation = match outcome {
        DispositionOutcome::Outpatient => Recommendation::new(
            format!(
                "Traitement Ambulatoire Possible. {score_line} Aucun critère HESTIA positif. Le patient semble éligible au traitement ambulatoire."
            ),
            "Assurer une bonne compréhension, compliance, et un suivi rapproché.",
            Severity::Success,
        )
        .with_notes(OUTPATIENT_CHECKLIST),
        DispositionOutcome::Hospitalization => Recommendation::new(
            format!(
                "Hospitalisation Recommandée. {score_line} Un ou plusieurs critères HESTIA sont positifs."
            ),
            "L'hospitalisation est recommandée pour surveillance et prise en charge initiale.",
            Severity::Danger,
        ),
    };
    let recommendation = if observations.has_active_cancer() {
        recommendation.with_notes([CANCER_CAUTION])
    } else {
        recommendation
    };

    tracing::debug!(outcome = ?outcome, hestia = results.hestia_score, "disposition evaluated");
    recommendation.with_notes(FOLLOW_UP)
}
