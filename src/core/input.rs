//! Caller-facing profile format.
//!
//! A form or file supplies dates of birth, a free-text region and the
//! work capability checkboxes as ticked; [`ProfileInput::to_profile`] turns
//! that into a validated [`ClaimantProfile`] for a given reference date.

use super::error::{CalculationError, InputProblem};
use super::profile::{
    AdvancePaymentInfo, Child, ClaimantProfile, Household, HousingSituation, SanctionInfo,
    Tenure, WorkCapability,
};
use super::rates::Region;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Input root for profile JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProfileInput {
    /// Date ages are worked out at (defaults to today)
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    pub date_of_birth: NaiveDate,
    /// Present only for joint claims
    #[serde(default)]
    pub partner_date_of_birth: Option<NaiveDate>,
    /// Savings and other capital
    #[serde(default)]
    #[schemars(with = "f64")]
    pub capital: Decimal,
    /// Monthly earnings
    #[serde(default)]
    #[schemars(with = "f64")]
    pub earnings: Decimal,
    #[serde(default)]
    pub children: Vec<Child>,
    #[serde(default)]
    pub carer: bool,
    /// Work capability outcomes ticked; at most one may be given
    #[serde(default)]
    pub work_capability: Vec<WorkCapability>,
    /// Monthly childcare costs
    #[serde(default)]
    #[schemars(with = "f64")]
    pub childcare_costs: Decimal,
    pub housing: HousingInput,
    #[serde(default)]
    pub sanction: Option<SanctionInfo>,
    #[serde(default)]
    pub advance_payment: Option<AdvancePaymentInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HousingInput {
    pub tenure: Tenure,
    /// Monthly rent or mortgage payment
    #[serde(default)]
    #[schemars(with = "f64")]
    pub amount: Decimal,
    /// England, Scotland or Wales; required when renting
    #[serde(default)]
    pub region: Option<String>,
    /// Broad Rental Market Area; required when renting
    #[serde(default)]
    pub area_code: Option<String>,
}

/// Read a profile from JSON
pub fn read_profile_json<R: Read>(reader: R) -> anyhow::Result<ProfileInput> {
    let input: ProfileInput = serde_json::from_reader(reader)?;
    Ok(input)
}

impl ProfileInput {
    /// Build and validate the profile, deriving ages at `reference_date`.
    pub fn to_profile(&self, reference_date: NaiveDate) -> Result<ClaimantProfile, CalculationError> {
        let age = age_at("date_of_birth", self.date_of_birth, reference_date)?;

        let household = match self.partner_date_of_birth {
            Some(dob) => Household::Couple {
                partner_age: age_at("partner_date_of_birth", dob, reference_date)?,
            },
            None => Household::Single,
        };

        for (index, child) in self.children.iter().enumerate() {
            if child.date_of_birth > reference_date {
                return Err(CalculationError::invalid(
                    format!("children[{}].date_of_birth", index),
                    InputProblem::DateAfterReference,
                ));
            }
        }

        let region = self
            .housing
            .region
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(str::parse::<Region>)
            .transpose()?;

        let profile = ClaimantProfile {
            age,
            household,
            capital: self.capital,
            earnings: self.earnings,
            children: self.children.clone(),
            carer: self.carer,
            work_capability: work_capability(&self.work_capability)?,
            childcare_costs: self.childcare_costs,
            housing: HousingSituation {
                tenure: self.housing.tenure,
                amount: self.housing.amount,
                region,
                area_code: self.housing.area_code.clone(),
            },
            sanction: self.sanction,
            advance_payment: self.advance_payment,
        };
        profile.validate()?;

        log::debug!(
            "Profile at {}: age={}, household={:?}, children={}",
            reference_date,
            profile.age,
            profile.household,
            profile.children.len()
        );
        Ok(profile)
    }
}

fn age_at(field: &str, date_of_birth: NaiveDate, reference_date: NaiveDate) -> Result<u32, CalculationError> {
    reference_date
        .years_since(date_of_birth)
        .ok_or_else(|| CalculationError::invalid(field, InputProblem::DateAfterReference))
}

/// Collapse the ticked states into one. Repeating the same state is harmless.
fn work_capability(ticked: &[WorkCapability]) -> Result<WorkCapability, CalculationError> {
    let mut selected = ticked.iter().copied().filter(|s| *s != WorkCapability::None);
    let first = match selected.next() {
        Some(state) => state,
        None => return Ok(WorkCapability::None),
    };
    if selected.any(|state| state != first) {
        return Err(CalculationError::invalid(
            "work_capability",
            InputProblem::ConflictingWorkCapabilityState,
        ));
    }
    Ok(first)
}
