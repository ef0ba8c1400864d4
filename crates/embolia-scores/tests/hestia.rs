use embolia_core::models::observations::{ClinicalObservations, RenalFunction, Subgroup};
use embolia_scores::policy::{HestiaHemodynamicRule, ScoringPolicy};
use embolia_scores::scores::hestia::{self, Hestia, HestiaResult};
use embolia_scores::ClinicalScore;

#[test]
fn no_criteria_is_outpatient_eligible() {
    let result = hestia::evaluate(&ClinicalObservations::default(), &ScoringPolicy::default());
    assert_eq!(result.score, 0);
    assert!(result.outpatient_eligible);
}

#[test]
fn eligibility_requires_zero() {
    for score in 0..=11u8 {
        assert_eq!(HestiaResult::from_score(score).outpatient_eligible, score == 0);
    }
}

#[test]
fn pregnancy_flag_alone_disqualifies_in_any_subgroup() {
    for subgroup in [Subgroup::Standard, Subgroup::ActiveCancer] {
        let obs = ClinicalObservations {
            subgroup,
            pregnancy_hestia: true,
            ..Default::default()
        };
        let result = hestia::evaluate(&obs, &ScoringPolicy::default());
        assert_eq!(result.score, 1);
        assert!(!result.outpatient_eligible);
    }
}

#[test]
fn pregnant_subgroup_counts_once() {
    let obs = ClinicalObservations::for_subgroup(Subgroup::Pregnant);
    assert_eq!(hestia::evaluate(&obs, &ScoringPolicy::default()).score, 1);
}

#[test]
fn severe_renal_function_counts_without_flag() {
    let obs = ClinicalObservations {
        renal_function: RenalFunction::Severe,
        ..Default::default()
    };
    assert_eq!(hestia::evaluate(&obs, &ScoringPolicy::default()).score, 1);
}

#[test]
fn low_saturation_counts_as_oxygen_need() {
    let obs = ClinicalObservations {
        oxygen_saturation: "89".to_string(),
        ..Default::default()
    };
    assert_eq!(hestia::evaluate(&obs, &ScoringPolicy::default()).score, 1);
}

#[test]
fn vitals_count_as_instability_only_under_vitals_rule() {
    let obs = ClinicalObservations {
        systolic_bp: "95".to_string(),
        heart_rate: "105".to_string(),
        ..Default::default()
    };
    let vitals = ScoringPolicy::default();
    let flag_only = ScoringPolicy {
        hestia_hemodynamic: HestiaHemodynamicRule::FlagOnly,
        ..ScoringPolicy::default()
    };

    // One composite criterion, not two.
    assert_eq!(hestia::evaluate(&obs, &vitals).score, 1);
    assert_eq!(hestia::evaluate(&obs, &flag_only).score, 0);
}

#[test]
fn all_criteria_reach_eleven() {
    let obs = ClinicalObservations {
        hemodynamically_unstable: true,
        thrombolysis_needed: true,
        active_bleeding: true,
        oxygen_needed: true,
        pe_on_anticoagulation: true,
        severe_pain: true,
        social_reasons: true,
        renal_impairment: true,
        liver_impairment: true,
        pregnancy_hestia: true,
        hit_history: true,
        ..Default::default()
    };
    let result = hestia::evaluate(&obs, &ScoringPolicy::default());
    assert_eq!(result.score, 11);
    assert!(Hestia.range().contains(f64::from(result.score)));
}
