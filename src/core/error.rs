use super::rates::RateError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a calculation could not produce a result.
///
/// Ineligibility is not an error; see [`super::Outcome::Ineligible`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("invalid input for `{field}`: {problem}")]
    InvalidInput {
        field: String,
        problem: InputProblem,
    },
    #[error(transparent)]
    Rate(#[from] RateError),
}

impl CalculationError {
    pub fn invalid(field: impl Into<String>, problem: InputProblem) -> Self {
        CalculationError::InvalidInput {
            field: field.into(),
            problem,
        }
    }
}

/// The kind of problem found with a single input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InputProblem {
    /// Amount below zero
    Negative,
    /// Amount above the largest accepted figure
    TooLarge,
    /// Required selection not made
    Missing,
    /// More than one work capability state selected
    ConflictingWorkCapabilityState,
    /// Date falls after the reference date
    DateAfterReference,
    /// More sanctioned claimants than people in the household
    TooManySanctionedClaimants,
}

impl fmt::Display for InputProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InputProblem::Negative => "must not be negative",
            InputProblem::TooLarge => "exceeds the largest accepted amount",
            InputProblem::Missing => "is required",
            InputProblem::ConflictingWorkCapabilityState => {
                "only one work capability state may be selected"
            }
            InputProblem::DateAfterReference => "is after the reference date",
            InputProblem::TooManySanctionedClaimants => {
                "exceeds the number of claimants in the household"
            }
        };
        write!(f, "{}", text)
    }
}
