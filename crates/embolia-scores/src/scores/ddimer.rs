//! Interpretation cutoff for the D-dimer assay.
//!
//! All values here are mg/L (FEU). The age-adjusted cutoff is a floor: the
//! final threshold never falls below it.

use embolia_core::models::observations::Subgroup;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::policy::{HighWellsDdimerRule, ScoringPolicy};

/// Cutoff when no YEARS item is present.
pub const YEARS_ZERO_THRESHOLD: f64 = 1.0;
/// Conventional cutoff, also the base below 51 years.
pub const STANDARD_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ThresholdInput {
    pub age: Option<u32>,
    pub wells_score: f64,
    pub years_count: u8,
    pub subgroup: Subgroup,
}

/// Age-adjusted cutoff: age × 0.01 above 50 years, otherwise 0.5.
pub fn age_adjusted_cutoff(age: Option<u32>) -> f64 {
    match age {
        // age / 100 is exact for whole ages (70 → 0.7), age * 0.01 is not.
        Some(age) if age > 50 => f64::from(age) / 100.0,
        _ => STANDARD_THRESHOLD,
    }
}

fn years_conditioned(years_count: u8, base: f64) -> f64 {
    if years_count == 0 {
        YEARS_ZERO_THRESHOLD.max(base)
    } else {
        STANDARD_THRESHOLD.max(base)
    }
}

pub fn threshold(input: &ThresholdInput, policy: &ScoringPolicy) -> f64 {
    let base = age_adjusted_cutoff(input.age);
    match input.subgroup {
        Subgroup::ActiveCancer => base,
        Subgroup::Pregnant => years_conditioned(input.years_count, base),
        Subgroup::Standard if input.wells_score <= 6.0 => {
            years_conditioned(input.years_count, base)
        }
        Subgroup::Standard => match policy.high_wells_ddimer {
            HighWellsDdimerRule::AgeAdjusted => base,
            HighWellsDdimerRule::YearsAdjusted => years_conditioned(input.years_count, base),
        },
    }
}

/// Whether a measured value (mg/L) reaches the threshold.
pub fn is_positive(value_mg_per_l: f64, threshold: f64) -> bool {
    value_mg_per_l >= threshold
}
