//! Diagnostic stage.
//!
//! Each subgroup has its own tree. Standard patients go through Wells, PERC
//! and the D-dimer; pregnant patients start from leg symptoms; active-cancer
//! patients go through a chest X-ray before any D-dimer.

use embolia_core::models::observations::{Answer, ClinicalObservations, Subgroup};
use embolia_core::models::results::{ScoreResults, WellsCategory};
use embolia_scores::scores::ddimer;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::recommendation::{MissingInput, Recommendation, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DiagnosticOutcome {
    /// PE excluded without imaging.
    Excluded,
    /// A D-dimer result is needed before deciding.
    DdimerRequired,
    /// D-dimer at or above the threshold: imaging.
    ImagingRecommended,
    /// High clinical probability: imaging without D-dimer.
    DirectImaging,
    /// Pregnant with leg symptoms: compression ultrasound first.
    CompressionUltrasound,
    /// Pregnant without leg symptoms: chest imaging, D-dimer supporting only.
    ChestImaging,
    /// Active cancer, low/moderate Wells: chest X-ray first.
    ChestXrayRequired,
    /// Chest X-ray done but not yet interpreted.
    XrayInterpretationRequired,
    /// Chest X-ray points to another diagnosis.
    TreatAlternativeDiagnosis,
    /// PE confirmed by imaging.
    Confirmed,
    /// Scores not computed yet.
    Undetermined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosticAssessment {
    pub outcome: DiagnosticOutcome,
    pub recommendation: Recommendation,
}

impl DiagnosticAssessment {
    fn new(outcome: DiagnosticOutcome, recommendation: Recommendation) -> Self {
        Self {
            outcome,
            recommendation,
        }
    }
}

/// D-dimer value read against the current threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DdimerReading {
    Absent,
    Negative,
    Positive,
}

fn read_ddimer(observations: &ClinicalObservations, results: &ScoreResults) -> DdimerReading {
    match observations.ddimer_mg_per_l() {
        None => DdimerReading::Absent,
        Some(value) if ddimer::is_positive(value, results.ddimer_threshold) => DdimerReading::Positive,
        Some(_) => DdimerReading::Negative,
    }
}

/// Threshold in the unit the clinician entered the D-dimer in.
pub fn threshold_display(observations: &ClinicalObservations, results: &ScoreResults) -> String {
    let unit = observations.ddimer_unit;
    format!(
        "{} {} FEU",
        unit.format_threshold(results.ddimer_threshold),
        unit.label()
    )
}

fn ddimer_display(observations: &ClinicalObservations) -> String {
    format!("{} {}", observations.ddimer.trim(), observations.ddimer_unit.label())
}

pub fn evaluate(observations: &ClinicalObservations, results: &ScoreResults) -> DiagnosticAssessment {
    let Some(category) = results.wells_category else {
        return DiagnosticAssessment::new(
            DiagnosticOutcome::Undetermined,
            Recommendation::undetermined(
                "Scores cliniques non calculés.",
                Some(MissingInput::WellsScore),
            ),
        );
    };

    if observations.pe_confirmed {
        return DiagnosticAssessment::new(
            DiagnosticOutcome::Confirmed,
            confirmed_recommendation(),
        );
    }

    let assessment = match observations.subgroup {
        Subgroup::Standard => standard(observations, results, category),
        Subgroup::Pregnant => pregnant(observations, results),
        Subgroup::ActiveCancer => active_cancer(observations, results, category),
    };
    tracing::debug!(subgroup = ?observations.subgroup, outcome = ?assessment.outcome, "diagnostic stage evaluated");
    assessment
}

fn standard(
    observations: &ClinicalObservations,
    results: &ScoreResults,
    category: WellsCategory,
) -> DiagnosticAssessment {
    match category {
        WellsCategory::Low if !results.perc_positive => DiagnosticAssessment::new(
            DiagnosticOutcome::Excluded,
            Recommendation::new(
                "Score de Wells faible ET critères PERC tous négatifs. EP cliniquement exclue.",
                "Pas d'examens complémentaires nécessaires pour EP. Rechercher un diagnostic alternatif.",
                Severity::Success,
            ),
        ),
        WellsCategory::Low => ddimer_gate(
            observations,
            results,
            "Wells faible mais PERC non négatif. Dosage des D-dimères (seuil adapté YEARS/âge).",
        ),
        WellsCategory::Moderate => ddimer_gate(
            observations,
            results,
            "Wells modéré. Dosage des D-dimères (seuil adapté YEARS/âge).",
        ),
        // Cancer bands only appear for the active-cancer subgroup.
        WellsCategory::High | WellsCategory::CancerHigh | WellsCategory::CancerLowModerate => {
            DiagnosticAssessment::new(
                DiagnosticOutcome::DirectImaging,
                Recommendation::new(
                    "Probabilité élevée (Wells > 6). Angioscanner pulmonaire (CTPA) direct recommandé.",
                    "Procéder immédiatement au CTPA sans D-dimères préalables.",
                    Severity::Danger,
                ),
            )
        }
    }
}

/// D-dimer decides between exclusion and CTPA.
fn ddimer_gate(
    observations: &ClinicalObservations,
    results: &ScoreResults,
    request: &str,
) -> DiagnosticAssessment {
    match read_ddimer(observations, results) {
        DdimerReading::Absent => DiagnosticAssessment::new(
            DiagnosticOutcome::DdimerRequired,
            Recommendation::awaiting(
                MissingInput::DdimerValue,
                request,
                format!(
                    "Seuil: {}. Si négatifs, EP exclue. Si positifs, CTPA.",
                    threshold_display(observations, results)
                ),
            ),
        ),
        DdimerReading::Positive => DiagnosticAssessment::new(
            DiagnosticOutcome::ImagingRecommended,
            Recommendation::new(
                "D-dimères positifs. Angioscanner pulmonaire (CTPA) recommandé.",
                "Procéder à l'imagerie.",
                Severity::Warning,
            ),
        ),
        DdimerReading::Negative => DiagnosticAssessment::new(
            DiagnosticOutcome::Excluded,
            Recommendation::new(
                "D-dimères négatifs. EP exclue.",
                "Rechercher un diagnostic alternatif.",
                Severity::Success,
            ),
        ),
    }
}

const PREGNANCY_NOTES: [&str; 3] = [
    "Si échographie positive pour TVP : traiter pour EP/TVP. Pas d'autre imagerie pulmonaire nécessaire.",
    "Pour imagerie pulmonaire (CTPA ou V/Q), le choix dépend de la disponibilité, expertise locale, et discussion multidisciplinaire. Faible exposition fœtale.",
    "Une consultation spécialisée (pneumologue, obstétricien, radiologue) est fortement recommandée.",
];

fn pregnant(observations: &ClinicalObservations, results: &ScoreResults) -> DiagnosticAssessment {
    let threshold = threshold_display(observations, results);
    let reading = read_ddimer(observations, results);

    if observations.years_dvt_signs {
        let (guidance, severity) = match reading {
            DdimerReading::Positive => (
                format!(
                    "Les D-dimères ({}) sont positifs (seuil {threshold}). Imagerie pulmonaire (CTPA/VQ) indiquée.",
                    ddimer_display(observations)
                ),
                Severity::Warning,
            ),
            DdimerReading::Negative => (
                format!(
                    "Les D-dimères ({}) sont négatifs (seuil {threshold}). EP exclue.",
                    ddimer_display(observations)
                ),
                Severity::Success,
            ),
            DdimerReading::Absent => (
                format!(
                    "Le seuil de D-dimères est {threshold} (basé sur {} critère(s) YEARS et âge).",
                    results.years_count
                ),
                Severity::Info,
            ),
        };
        return DiagnosticAssessment::new(
            DiagnosticOutcome::CompressionUltrasound,
            Recommendation::new(
                "Signes cliniques de TVP. Échographie veineuse des membres inférieurs (Doppler de compression) recommandée en 1ère intention.",
                format!("Si écho positive pour TVP : traiter. Si écho négative : considérer D-dimères. {guidance}"),
                severity,
            )
            .with_notes(PREGNANCY_NOTES),
        );
    }

    let (text, severity) = match reading {
        DdimerReading::Positive => (
            format!(
                "D-dimères positifs ({}, seuil {threshold}). Imagerie pulmonaire (CTPA ou scintigraphie V/Q) recommandée.",
                ddimer_display(observations)
            ),
            Severity::Warning,
        ),
        DdimerReading::Negative => (
            format!(
                "D-dimères négatifs ({}, seuil {threshold}) : probabilité d'EP faible. Imagerie pulmonaire (CTPA ou scintigraphie V/Q) à discuter selon le contexte clinique.",
                ddimer_display(observations)
            ),
            Severity::Success,
        ),
        DdimerReading::Absent => (
            format!(
                "Imagerie pulmonaire (CTPA ou scintigraphie V/Q). Dosage des D-dimères utile en complément (seuil adapté: {threshold}, basé sur {} critère(s) YEARS et âge).",
                results.years_count
            ),
            Severity::Info,
        ),
    };
    DiagnosticAssessment::new(
        DiagnosticOutcome::ChestImaging,
        Recommendation::new(
            text,
            "Imagerie pulmonaire: CTPA vs scintigraphie V/Q. Faible exposition fœtale pour les deux. Discuter avec radiologue/obstétricien.",
            severity,
        )
        .with_notes(
            std::iter::once(
                "L'échographie veineuse des membres inférieurs reste une option si une suspicion clinique de TVP se manifeste.",
            )
            .chain(PREGNANCY_NOTES),
        ),
    )
}

fn active_cancer(
    observations: &ClinicalObservations,
    results: &ScoreResults,
    category: WellsCategory,
) -> DiagnosticAssessment {
    if category.is_high() {
        return confirm_with_imaging(
            observations,
            DiagnosticAssessment::new(
                DiagnosticOutcome::DirectImaging,
                Recommendation::new(
                    "Probabilité élevée (Wells > 4, cancer actif). Angioscanner pulmonaire (CTPA) direct recommandé.",
                    "Procéder au CTPA sans D-dimères ni radiographie préalables.",
                    Severity::Danger,
                ),
            ),
        );
    }

    if !observations.chest_xray_performed {
        return DiagnosticAssessment::new(
            DiagnosticOutcome::ChestXrayRequired,
            Recommendation::awaiting(
                MissingInput::ChestXray,
                "Wells ≤ 4 chez un patient avec cancer actif. Radiographie thoracique et dosage des D-dimères recommandés.",
                format!(
                    "Pas d'angioscanner d'emblée. Interpréter la radiographie, puis les D-dimères (seuil ajusté à l'âge : {}).",
                    threshold_display(observations, results)
                ),
            ),
        );
    }

    match observations.xray_suggests_alternative {
        Answer::Unanswered => DiagnosticAssessment::new(
            DiagnosticOutcome::XrayInterpretationRequired,
            Recommendation::awaiting(
                MissingInput::ChestXrayInterpretation,
                "Radiographie thoracique réalisée. Préciser si elle oriente vers un diagnostic alternatif.",
                "Diagnostic alternatif : le traiter. Radiographie non contributive : D-dimères.",
            ),
        ),
        Answer::Yes => DiagnosticAssessment::new(
            DiagnosticOutcome::TreatAlternativeDiagnosis,
            Recommendation::new(
                "Radiographie thoracique en faveur d'un diagnostic alternatif. Traiter le diagnostic alternatif.",
                "L'EP reste possible : réévaluer si l'évolution clinique n'est pas favorable.",
                Severity::Info,
            ),
        ),
        Answer::No => match read_ddimer(observations, results) {
            DdimerReading::Absent => DiagnosticAssessment::new(
                DiagnosticOutcome::DdimerRequired,
                Recommendation::awaiting(
                    MissingInput::DdimerValue,
                    "Radiographie thoracique non contributive. Dosage des D-dimères (seuil ajusté à l'âge).",
                    format!(
                        "Seuil: {}. Si négatifs, EP exclue. Si positifs, CTPA.",
                        threshold_display(observations, results)
                    ),
                ),
            ),
            DdimerReading::Positive => confirm_with_imaging(
                observations,
                DiagnosticAssessment::new(
                    DiagnosticOutcome::ImagingRecommended,
                    Recommendation::new(
                        "D-dimères positifs. Angioscanner pulmonaire (CTPA) recommandé.",
                        "Procéder à l'imagerie.",
                        Severity::Warning,
                    ),
                ),
            ),
            DdimerReading::Negative => DiagnosticAssessment::new(
                DiagnosticOutcome::Excluded,
                Recommendation::new(
                    "D-dimères négatifs. EP exclue.",
                    "Rechercher un diagnostic alternatif.",
                    Severity::Success,
                ),
            ),
        },
    }
}

/// Apply the confirmatory imaging result once imaging has been recommended.
fn confirm_with_imaging(
    observations: &ClinicalObservations,
    pending: DiagnosticAssessment,
) -> DiagnosticAssessment {
    match observations.confirmatory_imaging {
        Answer::Unanswered => pending,
        Answer::Yes => {
            DiagnosticAssessment::new(DiagnosticOutcome::Confirmed, confirmed_recommendation())
        }
        Answer::No => DiagnosticAssessment::new(
            DiagnosticOutcome::Excluded,
            Recommendation::new(
                "Angioscanner négatif. EP exclue.",
                "Rechercher un diagnostic alternatif.",
                Severity::Success,
            ),
        ),
    }
}

fn confirmed_recommendation() -> Recommendation {
    Recommendation::new(
        "EP confirmée par l'imagerie.",
        "Procéder à la stratification du risque.",
        Severity::Warning,
    )
}
