use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::numeric::{parse_count, parse_decimal, parse_integer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    #[default]
    Unset,
    Male,
    Female,
}

/// Patient population variant. Each one selects its own diagnostic tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Subgroup {
    #[default]
    Standard,
    Pregnant,
    ActiveCancer,
}

impl Subgroup {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Patient standard (pas de grossesse)",
            Self::Pregnant => "Patiente enceinte",
            Self::ActiveCancer => "Patient avec cancer actif",
        }
    }
}

/// Unit the D-dimer value was entered in.
///
/// Thresholds are always held in mg/L (FEU); the unit only affects how the
/// measured value is converted and how the threshold is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DdimerUnit {
    #[default]
    #[serde(rename = "mg/L")]
    MgPerL,
    #[serde(rename = "µg/L")]
    UgPerL,
    #[serde(rename = "ng/mL")]
    NgPerMl,
}

impl DdimerUnit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MgPerL => "mg/L",
            Self::UgPerL => "µg/L",
            Self::NgPerMl => "ng/mL",
        }
    }

    /// Convert a value expressed in this unit to mg/L.
    pub fn to_mg_per_l(&self, value: f64) -> f64 {
        match self {
            Self::MgPerL => value,
            Self::UgPerL | Self::NgPerMl => value / 1000.0,
        }
    }

    /// Render a threshold held in mg/L in this unit.
    ///
    /// mg/L keeps two decimals; µg/L and ng/mL are whole numbers.
    pub fn format_threshold(&self, mg_per_l: f64) -> String {
        match self {
            Self::MgPerL => format!("{mg_per_l:.2}"),
            Self::UgPerL | Self::NgPerMl => format!("{:.0}", mg_per_l * 1000.0),
        }
    }
}

/// Creatinine clearance band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RenalFunction {
    #[default]
    Unset,
    /// ClCr ≥ 50 mL/min
    Normal,
    /// ClCr 30-49 mL/min
    Moderate,
    /// ClCr < 30 mL/min
    Severe,
}

/// A question that may not have been answered yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Answer {
    #[default]
    Unanswered,
    No,
    Yes,
}

impl Answer {
    pub fn is_yes(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

/// Location and extent of the clot on CT pulmonary angiography.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CtpaFindings {
    #[default]
    Unset,
    Central,
    Segmental,
    Subsegmental,
    Bilateral,
    Massive,
}

impl CtpaFindings {
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Central => Some("Embolie centrale (tronc, branches principales)"),
            Self::Segmental => Some("Embolie segmentaire"),
            Self::Subsegmental => Some("Embolie sous-segmentaire"),
            Self::Bilateral => Some("Embolie bilatérale"),
            Self::Massive => Some("Embolie massive (>50% lit vasculaire)"),
        }
    }
}

/// Everything the clinician has entered for the current case.
///
/// Numeric entries are kept as the raw form text; an empty string means the
/// value has not been entered. The `age ≥ 50` and `heart rate ≥ 100` flags are
/// not stored: [`ClinicalObservations::age_over_50`] and
/// [`ClinicalObservations::hr_over_100`] derive them on every read.
///
/// Mutate through [`ClinicalObservations::apply`] so coupled fields stay
/// consistent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ClinicalObservations {
    // Demographics
    pub age: String,
    pub gender: Gender,
    pub subgroup: Subgroup,

    // Vitals
    pub heart_rate: String,
    pub oxygen_saturation: String,
    pub systolic_bp: String,

    // Wells
    pub clinical_dvt: bool,
    pub pe_most_likely: bool,
    pub immobilization: bool,
    pub prior_vte: bool,
    pub hemoptysis: bool,
    pub malignancy: bool,

    // PERC (hemoptysis and prior VTE are shared with Wells)
    pub leg_swelling: bool,
    pub recent_surgery: bool,
    pub hormones: bool,

    // YEARS
    pub years_dvt_signs: bool,
    pub years_hemoptysis: bool,
    pub years_pe_most_likely: bool,

    // D-dimer
    pub ddimer: String,
    pub ddimer_unit: DdimerUnit,

    // Risk stratification
    pub hemodynamically_unstable: bool,
    pub rv_dysfunction: bool,
    pub troponin: bool,
    pub bnp: bool,
    pub ctpa_findings: CtpaFindings,
    pub bleeding_risk: bool,
    pub renal_function: RenalFunction,
    pub pe_confirmed: bool,

    // Hestia
    pub thrombolysis_needed: bool,
    pub active_bleeding: bool,
    pub oxygen_needed: bool,
    pub pe_on_anticoagulation: bool,
    pub severe_pain: bool,
    pub social_reasons: bool,
    pub renal_impairment: bool,
    pub liver_impairment: bool,
    pub pregnancy_hestia: bool,
    pub hit_history: bool,

    // Treatment duration
    pub provoked: bool,
    pub recurrent_episode: bool,

    // Active-cancer diagnostic pathway
    pub chest_xray_performed: bool,
    pub xray_suggests_alternative: Answer,
    pub confirmatory_imaging: Answer,
}

impl ClinicalObservations {
    /// Fresh record for a new case in the given subgroup, with couplings applied.
    pub fn for_subgroup(subgroup: Subgroup) -> Self {
        let mut observations = Self::default();
        observations.set_subgroup(subgroup);
        observations
    }

    pub fn from_json(json: &str) -> Result<Self, crate::error::CoreError> {
        let parsed: Self = serde_json::from_str(json)?;
        Ok(parsed.normalized())
    }

    pub fn age_years(&self) -> Option<u32> {
        parse_count(&self.age)
    }

    pub fn heart_rate_bpm(&self) -> Option<i64> {
        parse_integer(&self.heart_rate)
    }

    pub fn oxygen_saturation_pct(&self) -> Option<f64> {
        parse_decimal(&self.oxygen_saturation)
    }

    pub fn systolic_bp_mmhg(&self) -> Option<i64> {
        parse_integer(&self.systolic_bp)
    }

    /// D-dimer value as entered, in [`Self::ddimer_unit`].
    pub fn ddimer_value(&self) -> Option<f64> {
        parse_decimal(&self.ddimer)
    }

    /// D-dimer value converted to mg/L (FEU).
    pub fn ddimer_mg_per_l(&self) -> Option<f64> {
        self.ddimer_value().map(|v| self.ddimer_unit.to_mg_per_l(v))
    }

    pub fn age_over_50(&self) -> bool {
        self.age_years().is_some_and(|age| age >= 50)
    }

    pub fn hr_over_100(&self) -> bool {
        self.heart_rate_bpm().is_some_and(|hr| hr >= 100)
    }

    pub fn is_pregnant(&self) -> bool {
        self.subgroup == Subgroup::Pregnant
    }

    /// Active cancer either as the selected subgroup or as the Wells criterion.
    pub fn has_active_cancer(&self) -> bool {
        self.subgroup == Subgroup::ActiveCancer || self.malignancy
    }

    pub fn has_severe_renal_impairment(&self) -> bool {
        self.renal_function == RenalFunction::Severe
    }

    /// Re-apply every coupling. Used after deserializing a record that did
    /// not go through [`Self::apply`].
    pub fn normalized(mut self) -> Self {
        let subgroup = self.subgroup;
        let renal = self.renal_function;
        if subgroup == Subgroup::Pregnant {
            self.set_subgroup(subgroup);
        }
        if renal == RenalFunction::Severe {
            self.set_renal_function(renal);
        }
        if self.confirmatory_imaging.is_yes() {
            self.pe_confirmed = true;
        }
        self
    }

    pub(crate) fn set_subgroup(&mut self, subgroup: Subgroup) {
        self.subgroup = subgroup;
        if subgroup == Subgroup::Pregnant {
            self.gender = Gender::Female;
            self.pregnancy_hestia = true;
        } else {
            self.pregnancy_hestia = false;
        }
    }

    pub(crate) fn set_renal_function(&mut self, renal: RenalFunction) {
        self.renal_function = renal;
        self.renal_impairment = renal == RenalFunction::Severe;
    }

    /// A positive answer confirms PE; withdrawing it withdraws the confirmation.
    pub(crate) fn set_confirmatory_imaging(&mut self, answer: Answer) {
        if answer.is_yes() {
            self.pe_confirmed = true;
        } else if self.confirmatory_imaging.is_yes() {
            self.pe_confirmed = false;
        }
        self.confirmatory_imaging = answer;
    }
}
