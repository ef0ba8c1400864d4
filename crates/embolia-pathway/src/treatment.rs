//! Treatment stage: tier guidance, anticoagulant class and therapy duration.

use embolia_core::models::observations::ClinicalObservations;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::recommendation::{MissingInput, Recommendation, Severity};
use crate::tiers::{self, RiskTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AnticoagulantChoice {
    /// IV unfractionated heparin alongside reperfusion.
    UnfractionatedHeparin,
    /// LMWH, fondaparinux or UFH, then a DOAC or VKA once stable.
    ParenteralThenOral,
    DirectOralFirstLine,
    CancerAssociated,
    Pregnancy,
    SevereRenalImpairment,
}

impl AnticoagulantChoice {
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnfractionatedHeparin => "Héparine Non Fractionnée (HNF) IV.",
            Self::ParenteralThenOral => {
                "HBPM (ex: énoxaparine), Fondaparinux, ou HNF, puis relais AOD (Apixaban, Rivaroxaban, Edoxaban) ou AVK une fois le patient stabilisé."
            }
            Self::DirectOralFirstLine => {
                "AOD en première intention (Apixaban, Rivaroxaban). Alternatives : HBPM/Fondaparinux puis relais AVK ou Edoxaban."
            }
            Self::CancerAssociated => {
                "HBPM au long cours souvent préférée. AOD (Edoxaban, Rivaroxaban, Apixaban) sont des alternatives validées pour de nombreux patients, discuter balance bénéfice/risque hémorragique (surtout digestif/génito-urinaire)."
            }
            Self::Pregnancy => {
                "HBPM à dose thérapeutique (ajustée au poids, surveillance anti-Xa possible) pendant toute la grossesse et au moins 6 semaines post-partum. AVK et AOD contre-indiqués pendant la grossesse. HNF si risque hémorragique majeur ou accouchement imminent."
            }
            Self::SevereRenalImpairment => {
                "HNF IV avec monitoring TCA. HBPM : prudence, réduction de dose et/ou surveillance anti-Xa. Certains AOD contre-indiqués ou nécessitent réduction majeure (Apixaban 2.5mg x2/j si ClCr 15-29 + ≥2 critères [âge ≥80, poids ≤60kg]). AVK possibles."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TherapyDuration {
    Provoked,
    UnprovokedFirstEpisode,
    UnprovokedRecurrence,
    ActiveCancer,
    Pregnancy,
}

impl TherapyDuration {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Provoked => "3 mois (facteur majeur transitoire résolu).",
            Self::UnprovokedFirstEpisode => {
                "Au moins 3-6 mois, puis réévaluation pour traitement prolongé."
            }
            Self::UnprovokedRecurrence => {
                "Traitement prolongé (souvent à vie) si risque hémorragique acceptable."
            }
            Self::ActiveCancer => "Traitement prolongé (au moins 6 mois, et tant que cancer actif).",
            Self::Pregnancy => {
                "Toute la grossesse et au moins 6 semaines post-partum (total min. 3 mois)."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TreatmentPlan {
    pub tier: RiskTier,
    pub anticoagulant: AnticoagulantChoice,
    pub duration: TherapyDuration,
}

/// Severe renal impairment first, then pregnancy, then active cancer, then
/// the severity tier.
pub fn anticoagulant(observations: &ClinicalObservations, tier: RiskTier) -> AnticoagulantChoice {
    if observations.has_severe_renal_impairment() {
        AnticoagulantChoice::SevereRenalImpairment
    } else if observations.is_pregnant() {
        AnticoagulantChoice::Pregnancy
    } else if observations.has_active_cancer() {
        AnticoagulantChoice::CancerAssociated
    } else {
        match tier {
            RiskTier::High => AnticoagulantChoice::UnfractionatedHeparin,
            RiskTier::IntermediateHigh | RiskTier::IntermediateLow => {
                AnticoagulantChoice::ParenteralThenOral
            }
            RiskTier::Low => AnticoagulantChoice::DirectOralFirstLine,
        }
    }
}

pub fn duration(observations: &ClinicalObservations) -> TherapyDuration {
    if observations.has_active_cancer() {
        TherapyDuration::ActiveCancer
    } else if observations.is_pregnant() {
        TherapyDuration::Pregnancy
    } else if observations.provoked {
        TherapyDuration::Provoked
    } else if observations.recurrent_episode {
        TherapyDuration::UnprovokedRecurrence
    } else {
        TherapyDuration::UnprovokedFirstEpisode
    }
}

/// `None` until PE is confirmed.
pub fn plan(observations: &ClinicalObservations) -> Option<TreatmentPlan> {
    if !observations.pe_confirmed {
        return None;
    }
    let tier = tiers::tier_for(observations);
    Some(TreatmentPlan {
        tier,
        anticoagulant: anticoagulant(observations, tier),
        duration: duration(observations),
    })
}

pub fn evaluate(observations: &ClinicalObservations) -> Recommendation {
    let Some(plan) = plan(observations) else {
        return Recommendation::undetermined(
            "EP non confirmée : recommandations thérapeutiques non applicables.",
            Some(MissingInput::PeConfirmation),
        );
    };

    let (text, next_step, severity) = match plan.tier {
        RiskTier::High => (
            "URGENCE VITALE - REPERFUSION IMMÉDIATE. Thrombolyse systémique : Altéplase ou Ténectéplase, à initier SANS DÉLAI si absence de contre-indication absolue. En cas de contre-indication ou échec : embolectomie chirurgicale ou traitement percutané par cathéter.",
            "Admission en Unité de Soins Intensifs (USI) ou Réanimation.",
            Severity::Danger,
        ),
        RiskTier::IntermediateHigh | RiskTier::IntermediateLow => (
            "ANTICOAGULATION ET SURVEILLANCE RAPPROCHÉE. Anticoagulation thérapeutique parentérale.",
            "Hospitalisation pour surveillance initiale, surtout si risque intermédiaire-élevé.",
            Severity::Warning,
        ),
        RiskTier::Low => (
            "ANTICOAGULATION STANDARD.",
            "Traitement ambulatoire possible si tous les critères HESTIA sont négatifs et conditions socio-familiales favorables (voir étape suivante).",
            Severity::Success,
        ),
    };

    let mut notes = vec![
        format!("Anticoagulation : {}", plan.anticoagulant.label()),
        format!("Durée : {}", plan.duration.label()),
    ];
    if plan.tier == RiskTier::IntermediateHigh {
        notes.push(
            "Si dégradation hémodynamique : thrombolyse de sauvetage ou traitement percutané."
                .to_string(),
        );
    }
    if plan.tier == RiskTier::High && observations.bleeding_risk {
        notes.push(
            "Risque hémorragique élevé noté : thrombolyse souvent contre-indiquée. Privilégier embolectomie/traitement percutané."
                .to_string(),
        );
    }
    notes.push(
        "La décision de prolonger le traitement au-delà de la période initiale doit être individualisée (risque récidive vs risque hémorragique)."
            .to_string(),
    );

    tracing::debug!(
        tier = ?plan.tier,
        anticoagulant = ?plan.anticoagulant,
        duration = ?plan.duration,
        "treatment stage evaluated"
    );

    Recommendation::new(text, next_step, severity).with_notes(notes)
}
