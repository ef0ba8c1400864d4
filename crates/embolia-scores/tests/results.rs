use embolia_core::models::observations::{ClinicalObservations, Subgroup};
use embolia_core::models::results::{RiskLevel, ScoreResults, WellsCategory};
use embolia_scores::policy::ScoringPolicy;
use embolia_scores::{all_scores, compute_results, get_score};

#[test]
fn empty_case_results() {
    let results = compute_results(&ClinicalObservations::default(), &ScoringPolicy::default());
    assert_eq!(results.wells_score, 0.0);
    assert_eq!(results.wells_category, Some(WellsCategory::Low));
    assert_eq!(results.perc_count, 0);
    assert!(!results.perc_positive);
    assert_eq!(results.years_count, 0);
    assert_eq!(results.years_label, "0 critère");
    assert_eq!(results.ddimer_threshold, 1.0);
    assert_eq!(results.hestia_score, 0);
    assert!(results.outpatient_eligible);
    assert_eq!(results.risk_level, Some(RiskLevel::Low));
}

#[test]
fn default_results_are_unset() {
    let results = ScoreResults::default();
    assert_eq!(results.wells_category, None);
    assert_eq!(results.risk_level, None);
    assert_eq!(results.ddimer_threshold, 0.5);
    assert_eq!(results.risk_label(), "non déterminé");
}

#[test]
fn pregnant_elderly_scenario() {
    let obs = ClinicalObservations {
        age: "70".to_string(),
        ..ClinicalObservations::for_subgroup(Subgroup::Pregnant)
    };
    let results = compute_results(&obs, &ScoringPolicy::default());
    assert_eq!(results.years_count, 0);
    assert_eq!(results.ddimer_threshold, 1.0);
    assert_eq!(results.hestia_score, 1);
    assert!(!results.outpatient_eligible);
}

#[test]
fn results_follow_the_latest_observations() {
    let policy = ScoringPolicy::default();
    let mut obs = ClinicalObservations {
        heart_rate: "110".to_string(),
        clinical_dvt: true,
        ..Default::default()
    };
    assert_eq!(compute_results(&obs, &policy).wells_score, 4.5);

    obs.clinical_dvt = false;
    let results = compute_results(&obs, &policy);
    assert_eq!(results.wells_score, 1.5);
    assert_eq!(results.wells_category, Some(WellsCategory::Moderate));
    assert_eq!(results.perc_count, 1);
}

#[test]
fn registry_lookup() {
    let ids: Vec<String> = all_scores().iter().map(|s| s.id().to_string()).collect();
    assert_eq!(ids, ["wells", "perc", "years", "hestia"]);

    let hestia = get_score("hestia").unwrap();
    assert_eq!(hestia.criteria().len(), 11);
    assert!(get_score("geneva").is_err());
}
