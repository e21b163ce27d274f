//! Monthly award calculation.
//!
//! Capital is tested first since a household over the upper limit cannot
//! get an award whatever else applies. Otherwise the elements are added up,
//! the deductions taken off, and the result floored at zero and rounded to
//! pence. Nothing is rounded before that last step.

use super::deductions::{
    calculate_deductions, capital_income, work_allowance, CapitalAssessment, Deductions,
};
use super::elements::{calculate_elements, Elements};
use super::error::CalculationError;
use super::profile::ClaimantProfile;
use super::rates::RateTable;
use super::uc::round_currency;
use rust_decimal::Decimal;
use serde::Serialize;

/// Final result of a calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Capital at or above the upper limit
    Ineligible { capital: Decimal },
    Entitled(Assessment),
}

impl Outcome {
    /// Monthly award; zero when ineligible
    pub fn entitlement(&self) -> Decimal {
        match self {
            Outcome::Ineligible { .. } => Decimal::ZERO,
            Outcome::Entitled(assessment) => assessment.entitlement,
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Outcome::Entitled(_))
    }
}

/// Breakdown of an award
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub elements: Elements,
    pub deductions: Deductions,
    /// Earnings disregarded before the taper
    pub work_allowance: Decimal,
    pub total_allowance: Decimal,
    pub total_deductions: Decimal,
    /// Monthly award, rounded to pence
    pub entitlement: Decimal,
}

/// Calculate the monthly award for a household
pub fn calculate(profile: &ClaimantProfile, rates: &RateTable) -> Result<Outcome, CalculationError> {
    profile.validate()?;

    let capital_income = match capital_income(profile.capital) {
        CapitalAssessment::Ineligible => {
            log::debug!("Capital {} at or above upper limit: ineligible", profile.capital);
            return Ok(Outcome::Ineligible {
                capital: profile.capital,
            });
        }
        CapitalAssessment::Tariff(amount) => amount,
    };

    let elements = calculate_elements(profile, rates)?;
    let work_allowance = work_allowance(
        !profile.children.is_empty(),
        profile.work_capability,
        profile.housing.receives_housing_support(),
    );
    let deductions = calculate_deductions(
        profile,
        capital_income,
        work_allowance,
        elements.standard_allowance,
    );

    let total_allowance = elements.total();
    let total_deductions = deductions.total();
    let entitlement = round_currency((total_allowance - total_deductions).max(Decimal::ZERO));
    log::debug!(
        "Total allowance={}, deductions={}, entitlement={}",
        total_allowance,
        total_deductions,
        entitlement
    );

    Ok(Outcome::Entitled(Assessment {
        elements,
        deductions,
        work_allowance,
        total_allowance,
        total_deductions,
        entitlement,
    }))
}
