use embolia_core::error::CoreError;
use embolia_core::models::change::{ObservationChange, ObservationFlag};
use embolia_core::models::observations::{
    Answer, ClinicalObservations, DdimerUnit, Gender, RenalFunction, Subgroup,
};

fn flag(flag: ObservationFlag, checked: bool) -> ObservationChange {
    ObservationChange::Flag { flag, checked }
}

#[test]
fn derived_flags_follow_numeric_fields() {
    let obs = ClinicalObservations::default();
    assert!(!obs.age_over_50());
    assert!(!obs.hr_over_100());

    let obs = obs
        .apply(ObservationChange::Age("50".to_string()))
        .unwrap()
        .apply(ObservationChange::HeartRate("100".to_string()))
        .unwrap();
    assert!(obs.age_over_50());
    assert!(obs.hr_over_100());

    let obs = obs
        .apply(ObservationChange::Age("49".to_string()))
        .unwrap()
        .apply(ObservationChange::HeartRate(String::new()))
        .unwrap();
    assert!(!obs.age_over_50());
    assert!(!obs.hr_over_100());
}

#[test]
fn pregnant_subgroup_forces_gender_and_hestia_flag() {
    let obs = ClinicalObservations::default()
        .apply(ObservationChange::Gender(Gender::Male))
        .unwrap()
        .apply(ObservationChange::Subgroup(Subgroup::Pregnant))
        .unwrap();

    assert_eq!(obs.gender, Gender::Female);
    assert!(obs.pregnancy_hestia);
    assert!(obs.is_locked(ObservationFlag::PregnancyHestia));
}

#[test]
fn forced_fields_reject_edits_while_coupled() {
    let obs = ClinicalObservations::for_subgroup(Subgroup::Pregnant);

    let err = obs
        .apply(flag(ObservationFlag::PregnancyHestia, false))
        .unwrap_err();
    assert!(matches!(err, CoreError::LockedField(ref f) if f == "pregnancy_hestia"));

    let err = obs.apply(ObservationChange::Gender(Gender::Male)).unwrap_err();
    assert!(matches!(err, CoreError::LockedField(ref f) if f == "gender"));

    // Re-asserting the forced value is a no-op.
    let same = obs.apply(flag(ObservationFlag::PregnancyHestia, true)).unwrap();
    assert_eq!(same, obs);
}

#[test]
fn leaving_pregnant_subgroup_clears_hestia_pregnancy() {
    let obs = ClinicalObservations::for_subgroup(Subgroup::Pregnant)
        .apply(ObservationChange::Subgroup(Subgroup::Standard))
        .unwrap();
    assert!(!obs.pregnancy_hestia);
    assert!(!obs.is_locked(ObservationFlag::PregnancyHestia));
    assert_eq!(obs.gender, Gender::Female);
}

#[test]
fn severe_renal_function_forces_renal_impairment() {
    let obs = ClinicalObservations::default()
        .apply(ObservationChange::RenalFunction(RenalFunction::Severe))
        .unwrap();
    assert!(obs.renal_impairment);
    assert!(
        obs.apply(flag(ObservationFlag::RenalImpairment, false))
            .is_err()
    );

    let obs = obs
        .apply(ObservationChange::RenalFunction(RenalFunction::Moderate))
        .unwrap();
    assert!(!obs.renal_impairment);

    let obs = obs
        .apply(flag(ObservationFlag::RenalImpairment, true))
        .unwrap();
    assert!(obs.renal_impairment);
}

#[test]
fn positive_confirmatory_imaging_confirms_pe() {
    let obs = ClinicalObservations::for_subgroup(Subgroup::ActiveCancer)
        .apply(ObservationChange::ConfirmatoryImaging(Answer::Yes))
        .unwrap();
    assert!(obs.pe_confirmed);
}

#[test]
fn withdrawing_positive_imaging_withdraws_confirmation() {
    let positive = ClinicalObservations::for_subgroup(Subgroup::ActiveCancer)
        .apply(ObservationChange::ConfirmatoryImaging(Answer::Yes))
        .unwrap();

    let negative = positive
        .apply(ObservationChange::ConfirmatoryImaging(Answer::No))
        .unwrap();
    assert_eq!(negative.confirmatory_imaging, Answer::No);
    assert!(!negative.pe_confirmed);

    let unanswered = positive
        .apply(ObservationChange::ConfirmatoryImaging(Answer::Unanswered))
        .unwrap();
    assert!(!unanswered.pe_confirmed);
}

#[test]
fn negative_imaging_keeps_a_confirmation_made_otherwise() {
    let obs = ClinicalObservations::default()
        .apply(flag(ObservationFlag::PeConfirmed, true))
        .unwrap()
        .apply(ObservationChange::ConfirmatoryImaging(Answer::No))
        .unwrap();
    assert!(obs.pe_confirmed);
}

#[test]
fn pe_confirmation_is_locked_while_imaging_is_positive() {
    let obs = ClinicalObservations::default()
        .apply(ObservationChange::ConfirmatoryImaging(Answer::Yes))
        .unwrap();
    assert!(obs.is_locked(ObservationFlag::PeConfirmed));
    assert!(matches!(
        obs.apply(flag(ObservationFlag::PeConfirmed, false)),
        Err(CoreError::LockedField(ref f)) if f == "pe_confirmed"
    ));
    assert_eq!(obs.apply(flag(ObservationFlag::PeConfirmed, true)).unwrap(), obs);

    let json = serde_json::to_string(&obs).unwrap();
    assert_eq!(ClinicalObservations::from_json(&json).unwrap(), obs);

    let obs = obs
        .apply(ObservationChange::ConfirmatoryImaging(Answer::No))
        .unwrap();
    assert!(!obs.is_locked(ObservationFlag::PeConfirmed));
}

#[test]
fn flags_round_trip_through_apply() {
    let mut obs = ClinicalObservations::default();
    for f in ObservationFlag::ALL {
        obs = obs.apply(flag(*f, true)).unwrap();
        assert!(f.get(&obs), "{} should be set", f.id());
    }
}

#[test]
fn ddimer_is_converted_to_mg_per_l() {
    let obs = ClinicalObservations::default()
        .apply(ObservationChange::Ddimer("750".to_string()))
        .unwrap()
        .apply(ObservationChange::DdimerUnit(DdimerUnit::NgPerMl))
        .unwrap();
    assert_eq!(obs.ddimer_value(), Some(750.0));
    assert_eq!(obs.ddimer_mg_per_l(), Some(0.75));
}

#[test]
fn threshold_display_depends_on_unit() {
    assert_eq!(DdimerUnit::NgPerMl.format_threshold(0.75), "750");
    assert_eq!(DdimerUnit::UgPerL.format_threshold(0.75), "750");
    assert_eq!(DdimerUnit::MgPerL.format_threshold(0.75), "0.75");
    assert_eq!(DdimerUnit::MgPerL.format_threshold(1.0), "1.00");
}

#[test]
fn json_records_are_normalized() {
    let json = r#"{ "age": "62", "subgroup": "pregnant", "renal_function": "severe", "ddimer_unit": "ng/mL" }"#;
    let obs = ClinicalObservations::from_json(json).unwrap();
    assert_eq!(obs.gender, Gender::Female);
    assert!(obs.pregnancy_hestia);
    assert!(obs.renal_impairment);
    assert_eq!(obs.ddimer_unit, DdimerUnit::NgPerMl);
    assert!(obs.age_over_50());
}
