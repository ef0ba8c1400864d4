use embolia_core::models::results::RiskLevel;
use embolia_scores::scores::risk::{classify, RiskInputs};

#[test]
fn no_findings_is_low() {
    assert_eq!(classify(&RiskInputs::default()), RiskLevel::Low);
}

#[test]
fn instability_is_always_high() {
    for mask in 0..8u8 {
        let inputs = RiskInputs {
            hemodynamically_unstable: true,
            systolic_bp: Some(130),
            rv_dysfunction: mask & 1 != 0,
            troponin: mask & 2 != 0,
            bnp: mask & 4 != 0,
        };
        assert_eq!(classify(&inputs), RiskLevel::High);
    }
}

#[test]
fn hypotension_is_high() {
    let inputs = RiskInputs {
        systolic_bp: Some(85),
        ..Default::default()
    };
    assert_eq!(classify(&inputs), RiskLevel::High);

    let inputs = RiskInputs {
        systolic_bp: Some(90),
        ..Default::default()
    };
    assert_eq!(classify(&inputs), RiskLevel::Low);
}

#[test]
fn any_single_marker_is_intermediate() {
    for inputs in [
        RiskInputs {
            rv_dysfunction: true,
            ..Default::default()
        },
        RiskInputs {
            troponin: true,
            ..Default::default()
        },
        RiskInputs {
            bnp: true,
            ..Default::default()
        },
    ] {
        assert_eq!(classify(&inputs), RiskLevel::Intermediate);
    }
}
