use super::error::{CalculationError, InputProblem};
use super::rates::Region;
use super::uc::{ADULT_RATE_AGE, MAX_AMOUNT, MAX_BEDROOMS};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the engine needs to assess one household for one period.
///
/// Built fresh for each calculation and never modified by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimantProfile {
    /// Claimant age in whole years
    pub age: u32,
    pub household: Household,
    pub capital: Decimal,
    /// Monthly earnings of the household
    pub earnings: Decimal,
    pub children: Vec<Child>,
    pub carer: bool,
    pub work_capability: WorkCapability,
    /// Monthly childcare costs incurred
    pub childcare_costs: Decimal,
    pub housing: HousingSituation,
    pub sanction: Option<SanctionInfo>,
    pub advance_payment: Option<AdvancePaymentInfo>,
}

/// Relationship status; a partner age exists only for couples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Household {
    Single,
    Couple { partner_age: u32 },
}

impl Household {
    /// Number of adults claiming
    pub fn claimants(&self) -> u32 {
        match self {
            Household::Single => 1,
            Household::Couple { .. } => 2,
        }
    }
}

/// Age and relationship band shared by the standard allowance and the
/// sanction daily rates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowanceBand {
    SingleUnder25,
    Single25OrOver,
    /// Both partners under 25
    CoupleUnder25,
    /// Either partner 25 or over
    Couple25OrOver,
}

impl AllowanceBand {
    pub fn of(age: u32, household: Household) -> Self {
        match household {
            Household::Single if age < ADULT_RATE_AGE => AllowanceBand::SingleUnder25,
            Household::Single => AllowanceBand::Single25OrOver,
            Household::Couple { partner_age } if age < ADULT_RATE_AGE && partner_age < ADULT_RATE_AGE => {
                AllowanceBand::CoupleUnder25
            }
            Household::Couple { .. } => AllowanceBand::Couple25OrOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Child {
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub disability: Disability,
    /// Exceptions to the two-child limit; only relevant from the third child
    #[serde(default)]
    pub exceptions: BTreeSet<ChildException>,
}

impl Child {
    pub fn new(date_of_birth: NaiveDate) -> Self {
        Child {
            date_of_birth,
            disability: Disability::None,
            exceptions: BTreeSet::new(),
        }
    }

    pub fn with_exception(mut self, exception: ChildException) -> Self {
        self.exceptions.insert(exception);
        self
    }

    pub fn with_disability(mut self, disability: Disability) -> Self {
        self.disability = disability;
        self
    }
}

/// Circumstances that lift the two-child limit for a child
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ChildException {
    MultipleBirth,
    Adopted,
    FormalCare,
    InformalCare,
    RapeOrControl,
    TeenParent,
}

/// Disabled child addition band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Disability {
    #[default]
    None,
    Lower,
    Higher,
}

/// Limited capability for work assessment outcome. Exactly one holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkCapability {
    #[default]
    None,
    Lcw,
    LcwPre2017,
    Lcwra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tenure {
    Rent,
    Own,
    SharedAccommodation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingSituation {
    pub tenure: Tenure,
    /// Monthly rent or mortgage payment
    pub amount: Decimal,
    pub region: Option<Region>,
    /// BRMA the home is in
    pub area_code: Option<String>,
}

impl HousingSituation {
    /// Rented homes, shared or not, are assessed against the rate table
    pub fn is_rented(&self) -> bool {
        matches!(self.tenure, Tenure::Rent | Tenure::SharedAccommodation)
    }

    /// Only tenure `Rent` counts as housing support for the work allowance
    pub fn receives_housing_support(&self) -> bool {
        self.tenure == Tenure::Rent
    }

    /// Bedrooms allowed for the rate lookup. `None` for owners, who are not
    /// assessed against the rate table.
    pub fn bedroom_entitlement(&self, children: usize) -> Option<u8> {
        match self.tenure {
            Tenure::Rent => {
                let bedrooms = children.saturating_add(1).min(usize::from(MAX_BEDROOMS));
                Some(bedrooms as u8)
            }
            Tenure::SharedAccommodation => Some(0),
            Tenure::Own => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum SanctionLevel {
    #[default]
    None,
    Lowest,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SanctionInfo {
    pub level: SanctionLevel,
    /// Number of claimants sanctioned (1 or 2)
    pub claimants: u32,
    pub days: u32,
    /// Sanction applied at the 40% reduced rate
    #[serde(default)]
    pub reduced_rate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AdvancePaymentInfo {
    #[schemars(with = "f64")]
    pub amount: Decimal,
    /// Months to repay over (6, 12 or 24); absent means repay in one period
    #[serde(default)]
    pub repayment_months: Option<u32>,
}

impl ClaimantProfile {
    /// A single claimant with no children, income, capital or housing costs
    pub fn single(age: u32) -> Self {
        ClaimantProfile {
            age,
            household: Household::Single,
            capital: Decimal::ZERO,
            earnings: Decimal::ZERO,
            children: Vec::new(),
            carer: false,
            work_capability: WorkCapability::None,
            childcare_costs: Decimal::ZERO,
            housing: HousingSituation {
                tenure: Tenure::Own,
                amount: Decimal::ZERO,
                region: None,
                area_code: None,
            },
            sanction: None,
            advance_payment: None,
        }
    }

    /// Joint claimants with no children, income, capital or housing costs
    pub fn couple(age: u32, partner_age: u32) -> Self {
        ClaimantProfile {
            household: Household::Couple { partner_age },
            ..ClaimantProfile::single(age)
        }
    }

    pub fn allowance_band(&self) -> AllowanceBand {
        AllowanceBand::of(self.age, self.household)
    }

    /// Check the field constraints the calculation relies on.
    pub fn validate(&self) -> Result<(), CalculationError> {
        non_negative("capital", self.capital)?;
        within_bounds("earnings", self.earnings)?;
        within_bounds("childcare_costs", self.childcare_costs)?;
        within_bounds("housing.amount", self.housing.amount)?;

        if self.housing.is_rented() {
            if self.housing.region.is_none() {
                return Err(CalculationError::invalid("housing.region", InputProblem::Missing));
            }
            let area_missing = self
                .housing
                .area_code
                .as_deref()
                .map_or(true, |code| code.trim().is_empty());
            if area_missing {
                return Err(CalculationError::invalid("housing.area_code", InputProblem::Missing));
            }
        }

        if let Some(sanction) = &self.sanction {
            if sanction.claimants > self.household.claimants() {
                return Err(CalculationError::invalid(
                    "sanction.claimants",
                    InputProblem::TooManySanctionedClaimants,
                ));
            }
        }

        if let Some(advance) = &self.advance_payment {
            within_bounds("advance_payment.amount", advance.amount)?;
        }

        Ok(())
    }
}

fn non_negative(field: &str, amount: Decimal) -> Result<(), CalculationError> {
    if amount < Decimal::ZERO {
        return Err(CalculationError::invalid(field, InputProblem::Negative));
    }
    Ok(())
}

/// Amounts that feed the element and deduction sums
fn within_bounds(field: &str, amount: Decimal) -> Result<(), CalculationError> {
    non_negative(field, amount)?;
    if amount > MAX_AMOUNT {
        return Err(CalculationError::invalid(field, InputProblem::TooLarge));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn renter() -> ClaimantProfile {
        let mut profile = ClaimantProfile::single(30);
        profile.housing = HousingSituation {
            tenure: Tenure::Rent,
            amount: dec!(700),
            region: Some(Region::England),
            area_code: Some("Bristol".to_string()),
        };
        profile
    }

    #[test]
    fn default_single_is_valid() {
        assert_eq!(ClaimantProfile::single(30).validate(), Ok(()));
    }

    #[test]
    fn amounts_bounded_above() {
        let mut profile = renter();
        profile.housing.amount = MAX_AMOUNT;
        assert_eq!(profile.validate(), Ok(()));

        profile.housing.amount = MAX_AMOUNT + dec!(0.01);
        assert_eq!(
            profile.validate(),
            Err(CalculationError::invalid("housing.amount", InputProblem::TooLarge))
        );
    }

    #[test]
    fn only_plain_rent_is_housing_support() {
        let mut profile = renter();
        assert!(profile.housing.receives_housing_support());
        profile.housing.tenure = Tenure::SharedAccommodation;
        assert!(profile.housing.is_rented());
        assert!(!profile.housing.receives_housing_support());
    }

    #[test]
    fn negative_capital_rejected() {
        let mut profile = ClaimantProfile::single(30);
        profile.capital = dec!(-1);
        assert_eq!(
            profile.validate(),
            Err(CalculationError::invalid("capital", InputProblem::Negative))
        );
    }

    #[test]
    fn negative_earnings_rejected() {
        let mut profile = ClaimantProfile::single(30);
        profile.earnings = dec!(-0.01);
        assert_eq!(
            profile.validate(),
            Err(CalculationError::invalid("earnings", InputProblem::Negative))
        );
    }

    #[test]
    fn renter_needs_region_and_area() {
        let mut profile = renter();
        assert_eq!(profile.validate(), Ok(()));

        profile.housing.area_code = Some("   ".to_string());
        assert_eq!(
            profile.validate(),
            Err(CalculationError::invalid("housing.area_code", InputProblem::Missing))
        );

        profile.housing.region = None;
        assert_eq!(
            profile.validate(),
            Err(CalculationError::invalid("housing.region", InputProblem::Missing))
        );
    }

    #[test]
    fn owner_needs_no_area() {
        let mut profile = ClaimantProfile::single(30);
        profile.housing.amount = dec!(500);
        assert_eq!(profile.validate(), Ok(()));
    }

    #[test]
    fn single_cannot_have_two_sanctioned_claimants() {
        let mut profile = ClaimantProfile::single(30);
        profile.sanction = Some(SanctionInfo {
            level: SanctionLevel::Low,
            claimants: 2,
            days: 7,
            reduced_rate: false,
        });
        assert_eq!(
            profile.validate(),
            Err(CalculationError::invalid(
                "sanction.claimants",
                InputProblem::TooManySanctionedClaimants
            ))
        );

        let mut couple = ClaimantProfile::couple(30, 28);
        couple.sanction = profile.sanction;
        assert_eq!(couple.validate(), Ok(()));
    }

    #[test]
    fn allowance_bands() {
        assert_eq!(AllowanceBand::of(24, Household::Single), AllowanceBand::SingleUnder25);
        assert_eq!(AllowanceBand::of(25, Household::Single), AllowanceBand::Single25OrOver);
        assert_eq!(
            AllowanceBand::of(24, Household::Couple { partner_age: 24 }),
            AllowanceBand::CoupleUnder25
        );
        assert_eq!(
            AllowanceBand::of(24, Household::Couple { partner_age: 25 }),
            AllowanceBand::Couple25OrOver
        );
        assert_eq!(
            AllowanceBand::of(40, Household::Couple { partner_age: 19 }),
            AllowanceBand::Couple25OrOver
        );
    }

    #[test]
    fn bedroom_entitlement_capped_at_four() {
        let housing = renter().housing;
        assert_eq!(housing.bedroom_entitlement(0), Some(1));
        assert_eq!(housing.bedroom_entitlement(2), Some(3));
        assert_eq!(housing.bedroom_entitlement(3), Some(4));
        assert_eq!(housing.bedroom_entitlement(6), Some(4));
    }

    #[test]
    fn shared_accommodation_uses_shared_band() {
        let mut housing = renter().housing;
        housing.tenure = Tenure::SharedAccommodation;
        assert_eq!(housing.bedroom_entitlement(2), Some(0));
    }

    #[test]
    fn profile_survives_json_round_trip() {
        let mut profile = ClaimantProfile::couple(24, 26);
        profile.capital = dec!(7250.50);
        profile.children = vec![
            Child::new(NaiveDate::from_ymd_opt(2016, 5, 1).unwrap()),
            Child::new(NaiveDate::from_ymd_opt(2019, 2, 10).unwrap())
                .with_exception(ChildException::Adopted)
                .with_disability(Disability::Lower),
        ];
        profile.work_capability = WorkCapability::LcwPre2017;
        profile.advance_payment = Some(AdvancePaymentInfo {
            amount: dec!(600),
            repayment_months: Some(12),
        });

        let json = serde_json::to_string(&profile).unwrap();
        let back: ClaimantProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
