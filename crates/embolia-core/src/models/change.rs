//! Field-by-field updates to [`ClinicalObservations`].
//!
//! Every edit goes through [`ClinicalObservations::apply`], which returns the
//! next fully-consistent record instead of mutating fields one at a time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::observations::{
    Answer, ClinicalObservations, CtpaFindings, DdimerUnit, Gender, RenalFunction, Subgroup,
};
use crate::error::CoreError;

/// Declares [`ObservationFlag`] together with the field each variant toggles.
macro_rules! observation_flags {
    ($($variant:ident => $field:ident,)*) => {
        /// Boolean observations the user can toggle directly.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
        #[serde(rename_all = "snake_case")]
        #[ts(export)]
        pub enum ObservationFlag {
            $($variant,)*
        }

        impl ObservationFlag {
            pub const ALL: &[ObservationFlag] = &[$(Self::$variant,)*];

            pub fn id(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($field),)*
                }
            }

            /// Current value of this flag in `observations`.
            pub fn get(&self, observations: &ClinicalObservations) -> bool {
                match self {
                    $(Self::$variant => observations.$field,)*
                }
            }

            fn set(&self, observations: &mut ClinicalObservations, value: bool) {
                match self {
                    $(Self::$variant => observations.$field = value,)*
                }
            }
        }
    };
}

observation_flags! {
    ClinicalDvt => clinical_dvt,
    PeMostLikely => pe_most_likely,
    Immobilization => immobilization,
    PriorVte => prior_vte,
    Hemoptysis => hemoptysis,
    Malignancy => malignancy,
    LegSwelling => leg_swelling,
    RecentSurgery => recent_surgery,
    Hormones => hormones,
    YearsDvtSigns => years_dvt_signs,
    YearsHemoptysis => years_hemoptysis,
    YearsPeMostLikely => years_pe_most_likely,
    HemodynamicallyUnstable => hemodynamically_unstable,
    RvDysfunction => rv_dysfunction,
    Troponin => troponin,
    Bnp => bnp,
    BleedingRisk => bleeding_risk,
    PeConfirmed => pe_confirmed,
    ThrombolysisNeeded => thrombolysis_needed,
    ActiveBleeding => active_bleeding,
    OxygenNeeded => oxygen_needed,
    PeOnAnticoagulation => pe_on_anticoagulation,
    SeverePain => severe_pain,
    SocialReasons => social_reasons,
    RenalImpairment => renal_impairment,
    LiverImpairment => liver_impairment,
    PregnancyHestia => pregnancy_hestia,
    HitHistory => hit_history,
    Provoked => provoked,
    RecurrentEpisode => recurrent_episode,
    ChestXrayPerformed => chest_xray_performed,
}

/// A single proposed edit coming from the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum ObservationChange {
    Age(String),
    Gender(Gender),
    Subgroup(Subgroup),
    HeartRate(String),
    OxygenSaturation(String),
    SystolicBp(String),
    Ddimer(String),
    DdimerUnit(DdimerUnit),
    RenalFunction(RenalFunction),
    CtpaFindings(CtpaFindings),
    XraySuggestsAlternative(Answer),
    ConfirmatoryImaging(Answer),
    Flag { flag: ObservationFlag, checked: bool },
}

impl ClinicalObservations {
    /// Whether `flag` is currently forced by another field.
    pub fn is_locked(&self, flag: ObservationFlag) -> bool {
        match flag {
            ObservationFlag::PregnancyHestia => self.is_pregnant(),
            ObservationFlag::RenalImpairment => self.has_severe_renal_impairment(),
            ObservationFlag::PeConfirmed => self.confirmatory_imaging.is_yes(),
            _ => false,
        }
    }

    /// Return the record that results from applying `change`.
    ///
    /// Fields forced by a coupling (gender and the Hestia pregnancy flag while
    /// the subgroup is pregnant, the Hestia renal flag while renal function is
    /// severe, PE confirmation while confirmatory imaging is positive) reject
    /// edits with [`CoreError::LockedField`].
    pub fn apply(&self, change: ObservationChange) -> Result<Self, CoreError> {
        let mut next = self.clone();
        match change {
            ObservationChange::Age(v) => next.age = v,
            ObservationChange::Gender(g) => {
                if self.is_pregnant() && g != Gender::Female {
                    return Err(CoreError::LockedField("gender".to_string()));
                }
                next.gender = g;
            }
            ObservationChange::Subgroup(s) => next.set_subgroup(s),
            ObservationChange::HeartRate(v) => next.heart_rate = v,
            ObservationChange::OxygenSaturation(v) => next.oxygen_saturation = v,
            ObservationChange::SystolicBp(v) => next.systolic_bp = v,
            ObservationChange::Ddimer(v) => next.ddimer = v,
            ObservationChange::DdimerUnit(u) => next.ddimer_unit = u,
            ObservationChange::RenalFunction(r) => next.set_renal_function(r),
            ObservationChange::CtpaFindings(f) => next.ctpa_findings = f,
            ObservationChange::XraySuggestsAlternative(a) => next.xray_suggests_alternative = a,
            ObservationChange::ConfirmatoryImaging(a) => next.set_confirmatory_imaging(a),
            ObservationChange::Flag { flag, checked } => {
                if self.is_locked(flag) {
                    if flag.get(self) == checked {
                        return Ok(next);
                    }
                    return Err(CoreError::LockedField(flag.id().to_string()));
                }
                flag.set(&mut next, checked);
            }
        }
        Ok(next)
    }
}
