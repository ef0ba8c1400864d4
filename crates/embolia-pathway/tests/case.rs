use embolia_core::error::CoreError;
use embolia_core::models::change::{ObservationChange, ObservationFlag};
use embolia_core::models::observations::{Answer, Subgroup};
use embolia_core::models::results::WellsCategory;
use embolia_pathway::case::PatientCase;
use embolia_pathway::diagnostic::{self, DiagnosticOutcome};
use embolia_pathway::error::PathwayError;
use embolia_pathway::recommendation::Severity;
use embolia_pathway::stage::Stage;
use embolia_scores::policy::{HestiaHemodynamicRule, ScoringPolicy};

fn flag(flag: ObservationFlag, checked: bool) -> ObservationChange {
    ObservationChange::Flag { flag, checked }
}

fn confirmed_case() -> PatientCase {
    let mut case = PatientCase::new(Subgroup::Standard, ScoringPolicy::default());
    case.apply(ObservationChange::ConfirmatoryImaging(Answer::Yes))
        .unwrap();
    case
}

#[test]
fn new_case_starts_at_diagnostic_with_results() {
    let case = PatientCase::new(Subgroup::Pregnant, ScoringPolicy::default());
    assert_eq!(case.stage(), Stage::Diagnostic);
    assert_eq!(case.results().wells_category, Some(WellsCategory::Low));
    // Pregnancy is a Hestia item from the start.
    assert_eq!(case.results().hestia_score, 1);
    assert!(!case.results().outpatient_eligible);
}

#[test]
fn results_are_recomputed_after_each_change() {
    let mut case = PatientCase::new(Subgroup::Standard, ScoringPolicy::default());
    let results = case
        .apply(ObservationChange::HeartRate("110".to_string()))
        .unwrap();
    assert_eq!(results.wells_score, 1.5);

    case.apply(flag(ObservationFlag::ClinicalDvt, true)).unwrap();
    assert_eq!(case.results().wells_score, 4.5);
    assert_eq!(case.results().wells_category, Some(WellsCategory::Moderate));
}

#[test]
fn locked_edit_is_rejected_and_leaves_the_case_untouched() {
    let mut case = PatientCase::new(Subgroup::Pregnant, ScoringPolicy::default());
    let before = case.clone();
    let err = case
        .apply(flag(ObservationFlag::PregnancyHestia, false))
        .unwrap_err();
    assert!(matches!(err, PathwayError::Core(CoreError::LockedField(ref f)) if f == "pregnancy_hestia"));
    assert_eq!(case, before);
}

#[test]
fn advance_respects_entry_guards() {
    let mut case = PatientCase::new(Subgroup::Standard, ScoringPolicy::default());
    assert!(matches!(
        case.advance(),
        Err(PathwayError::StageNotReachable {
            from: Stage::Diagnostic,
            to: Stage::RiskStratification
        })
    ));
    assert!(matches!(case.go_back(), Err(PathwayError::NoPreviousStage)));

    let mut case = confirmed_case();
    assert!(case.observations().pe_confirmed);
    assert_eq!(case.advance().unwrap(), Stage::RiskStratification);
    assert_eq!(case.advance().unwrap(), Stage::Treatment);
    assert_eq!(case.advance().unwrap(), Stage::Disposition);
    assert!(matches!(
        case.advance(),
        Err(PathwayError::NoNextStage(Stage::Disposition))
    ));

    assert_eq!(case.go_back().unwrap(), Stage::Treatment);
}

#[test]
fn disposition_is_closed_to_non_low_risk() {
    let mut case = confirmed_case();
    case.apply(flag(ObservationFlag::Troponin, true)).unwrap();
    case.advance().unwrap();
    case.advance().unwrap();
    assert_eq!(case.stage(), Stage::Treatment);
    assert!(matches!(
        case.advance(),
        Err(PathwayError::StageNotReachable {
            to: Stage::Disposition,
            ..
        })
    ));
}

#[test]
fn closing_a_guard_falls_back_to_a_reachable_stage() {
    let mut case = confirmed_case();
    case.advance().unwrap();
    case.advance().unwrap();
    case.advance().unwrap();
    assert_eq!(case.stage(), Stage::Disposition);

    case.apply(flag(ObservationFlag::RvDysfunction, true)).unwrap();
    assert_eq!(case.stage(), Stage::Treatment);

    case.apply(ObservationChange::ConfirmatoryImaging(Answer::Unanswered))
        .unwrap();
    assert_eq!(case.stage(), Stage::Diagnostic);
}

#[test]
fn current_recommendation_follows_the_stage() {
    let mut case = confirmed_case();
    assert_eq!(case.current_recommendation().severity, Severity::Warning);
    case.advance().unwrap();
    assert!(case.current_recommendation().text.starts_with("RISQUE FAIBLE"));
}

#[test]
fn policy_change_recomputes() {
    let mut case = PatientCase::new(Subgroup::Standard, ScoringPolicy::default());
    case.apply(ObservationChange::HeartRate("120".to_string()))
        .unwrap();
    assert_eq!(case.results().hestia_score, 1);

    case.set_policy(ScoringPolicy {
        hestia_hemodynamic: HestiaHemodynamicRule::FlagOnly,
        ..ScoringPolicy::default()
    });
    assert_eq!(case.results().hestia_score, 0);
}

#[test]
fn reset_starts_a_new_case() {
    let mut case = confirmed_case();
    case.advance().unwrap();
    let old_id = case.id();

    case.reset(Subgroup::ActiveCancer);
    assert_ne!(case.id(), old_id);
    assert_eq!(case.stage(), Stage::Diagnostic);
    assert_eq!(case.observations().subgroup, Subgroup::ActiveCancer);
    assert!(!case.observations().pe_confirmed);
}

#[test]
fn summary_covers_every_stage_reached() {
    let mut case = confirmed_case();
    case.advance().unwrap();
    case.advance().unwrap();

    let summary = case.summary();
    let stages: Vec<Stage> = summary.stages.iter().map(|s| s.stage).collect();
    assert_eq!(
        stages,
        vec![Stage::Diagnostic, Stage::RiskStratification, Stage::Treatment]
    );
    assert_eq!(summary.score_details.len(), 4);

    let text = summary.to_string();
    assert!(text.contains("## Recommandations Thérapeutiques"));
    assert!(text.contains("### Score de Wells : 0"));
    assert!(!text.contains("## Critères d'Hospitalisation"));

    let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
    assert_eq!(json["stages"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["case_id"], case.id().to_string());
}

#[test]
fn negative_imaging_after_positive_reopens_the_diagnosis() {
    let mut case = PatientCase::new(Subgroup::ActiveCancer, ScoringPolicy::default());
    case.apply(ObservationChange::ConfirmatoryImaging(Answer::Yes))
        .unwrap();
    case.advance().unwrap();
    case.advance().unwrap();
    assert_eq!(case.stage(), Stage::Treatment);

    case.apply(ObservationChange::ConfirmatoryImaging(Answer::No))
        .unwrap();
    assert!(!case.observations().pe_confirmed);
    assert_eq!(case.stage(), Stage::Diagnostic);
    assert!(!Stage::Treatment.is_reachable(case.observations()));
    let outcome = diagnostic::evaluate(case.observations(), case.results()).outcome;
    assert_ne!(outcome, DiagnosticOutcome::Confirmed);
}

#[test]
fn loading_a_case_rebuilds_results_and_stage() {
    let mut case = confirmed_case();
    case.apply(flag(ObservationFlag::ClinicalDvt, true)).unwrap();
    case.advance().unwrap();
    assert_eq!(case.results().wells_score, 3.0);

    let mut json: serde_json::Value = serde_json::to_value(&case).unwrap();
    json["observations"]["clinical_dvt"] = false.into();
    json["observations"]["confirmatory_imaging"] = "unanswered".into();
    json["observations"]["pe_confirmed"] = false.into();
    json["results"]["wells_score"] = 9.0.into();
    json["stage"] = "disposition".into();

    let loaded: PatientCase = serde_json::from_value(json).unwrap();
    assert_eq!(loaded.id(), case.id());
    assert_eq!(loaded.results().wells_score, 0.0);
    assert_eq!(loaded.stage(), Stage::Diagnostic);

    let round_trip: PatientCase =
        serde_json::from_str(&serde_json::to_string(&case).unwrap()).unwrap();
    assert_eq!(round_trip, case);
}
