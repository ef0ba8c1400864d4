use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How the UI should present a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
    /// The stage cannot be evaluated yet ("non déterminé").
    Undetermined,
}

/// An input the pathway needs before it can decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum MissingInput {
    WellsScore,
    DdimerValue,
    ChestXray,
    ChestXrayInterpretation,
    PeConfirmation,
}

impl MissingInput {
    pub fn label(&self) -> &'static str {
        match self {
            Self::WellsScore => "score de Wells",
            Self::DdimerValue => "valeur des D-dimères",
            Self::ChestXray => "radiographie thoracique",
            Self::ChestXrayInterpretation => "interprétation de la radiographie thoracique",
            Self::PeConfirmation => "confirmation de l'EP par imagerie",
        }
    }
}

/// Output of one pathway stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    pub text: String,
    pub next_step: String,
    pub severity: Severity,
    /// Set when the stage is waiting for an input rather than reporting an outcome.
    pub missing: Option<MissingInput>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Recommendation {
    pub fn new(text: impl Into<String>, next_step: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            next_step: next_step.into(),
            severity,
            missing: None,
            notes: Vec::new(),
        }
    }

    /// A request for `input` before the stage can conclude.
    pub fn awaiting(input: MissingInput, text: impl Into<String>, next_step: impl Into<String>) -> Self {
        Self {
            missing: Some(input),
            ..Self::new(text, next_step, Severity::Info)
        }
    }

    /// The stage does not apply to this case.
    pub fn undetermined(text: impl Into<String>, missing: Option<MissingInput>) -> Self {
        Self {
            missing,
            ..Self::new(text, "", Severity::Undetermined)
        }
    }

    pub fn with_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.notes.extend(notes.into_iter().map(Into::into));
        self
    }

    pub fn is_determined(&self) -> bool {
        self.missing.is_none() && self.severity != Severity::Undetermined
    }
}
