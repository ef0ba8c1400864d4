//! Scoring policy.
//!
//! Two rules exist in divergent versions of the pathway and are kept as
//! selectable variants instead of picking one:
//!
//! * which observations count as hemodynamic instability for Hestia;
//! * whether the D-dimer threshold for a high Wells score (standard
//!   subgroup) is the age-adjusted cutoff alone or the YEARS-conditioned one.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ScoreError;

/// Current policy version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum HestiaHemodynamicRule {
    /// Only the explicit instability flag.
    FlagOnly,
    /// The flag, SBP < 100 mmHg, or heart rate > 100 bpm.
    #[default]
    FlagOrVitals,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum HighWellsDdimerRule {
    /// Age-adjusted cutoff only, as for active cancer.
    #[default]
    AgeAdjusted,
    /// Same YEARS-conditioned rule as a low or moderate Wells score.
    YearsAdjusted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringPolicy {
    /// Schema version. Missing or 0 = pre-versioned policy.
    #[serde(default)]
    pub policy_version: u32,
    #[serde(default)]
    pub hestia_hemodynamic: HestiaHemodynamicRule,
    #[serde(default)]
    pub high_wells_ddimer: HighWellsDdimerRule,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            policy_version: CURRENT_VERSION,
            hestia_hemodynamic: HestiaHemodynamicRule::default(),
            high_wells_ddimer: HighWellsDdimerRule::default(),
        }
    }
}

impl ScoringPolicy {
    /// Parse a policy document, migrating older versions first.
    pub fn from_json(contents: &str) -> Result<Self, ScoreError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = match json.get("policy_version") {
            None => 0,
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| ScoreError::InvalidPolicy(format!("policy_version {v} is not a valid version")))?,
        };

        let migrated = migrate(json, on_disk_version)?;
        let policy: ScoringPolicy = serde_json::from_value(migrated)?;
        Ok(policy)
    }

    pub fn to_json(&self) -> Result<String, ScoreError> {
        let mut stamped = *self;
        stamped.policy_version = CURRENT_VERSION;
        Ok(serde_json::to_string_pretty(&stamped)?)
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, ScoreError> {
    if from_version > CURRENT_VERSION {
        return Err(ScoreError::UnsupportedPolicyVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: stamp the version; missing rules fall back to their defaults.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| ScoreError::InvalidPolicy("policy is not a JSON object".to_string()))?;
        obj.insert(
            "policy_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::warn!("migrated scoring policy v0 → v1");
    }

    Ok(json)
}
