use super::error::{CalculationError, InputProblem};
use super::profile::{
    AllowanceBand, Child, ClaimantProfile, Disability, HousingSituation, WorkCapability,
};
use super::rates::RateTable;
use super::uc::{
    born_before_two_child_limit, CARER, CHILDCARE_CAP_ONE_CHILD, CHILDCARE_CAP_TWO_OR_MORE,
    CHILD_FIRST_HIGHER, CHILD_STANDARD, DISABLED_CHILD_HIGHER, DISABLED_CHILD_LOWER, LCWRA,
    LCW_PRE_2017, STANDARD_COUPLE_25_OR_OVER, STANDARD_COUPLE_UNDER_25,
    STANDARD_SINGLE_25_OR_OVER, STANDARD_SINGLE_UNDER_25,
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Entitlement elements making up the maximum award
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Elements {
    pub standard_allowance: Decimal,
    pub child: Decimal,
    pub disabled_child: Decimal,
    pub carer: Decimal,
    pub work_capability: Decimal,
    pub childcare: Decimal,
    pub housing: Decimal,
}

impl Elements {
    pub fn total(&self) -> Decimal {
        self.standard_allowance
            + self.child
            + self.disabled_child
            + self.carer
            + self.work_capability
            + self.childcare
            + self.housing
    }
}

/// Work out every element for a profile
pub fn calculate_elements(
    profile: &ClaimantProfile,
    rates: &RateTable,
) -> Result<Elements, CalculationError> {
    let elements = Elements {
        standard_allowance: standard_allowance(profile.allowance_band()),
        child: child_element(&profile.children),
        disabled_child: disabled_child_addition(&profile.children),
        carer: carer_element(profile.carer),
        work_capability: work_capability_element(profile.work_capability),
        childcare: childcare_element(profile.childcare_costs, profile.children.len()),
        housing: housing_element(&profile.housing, profile.children.len(), rates)?,
    };
    log::debug!("Elements: {:?}", elements);
    Ok(elements)
}

pub fn standard_allowance(band: AllowanceBand) -> Decimal {
    match band {
        AllowanceBand::SingleUnder25 => STANDARD_SINGLE_UNDER_25,
        AllowanceBand::Single25OrOver => STANDARD_SINGLE_25_OR_OVER,
        AllowanceBand::CoupleUnder25 => STANDARD_COUPLE_UNDER_25,
        AllowanceBand::Couple25OrOver => STANDARD_COUPLE_25_OR_OVER,
    }
}

/// Children oldest first. Children sharing a birthday keep their input order.
pub fn ordered_children(children: &[Child]) -> Vec<&Child> {
    let mut ordered: Vec<&Child> = children.iter().collect();
    ordered.sort_by_key(|c| c.date_of_birth);
    ordered
}

/// Child element with the two-child limit applied by position
pub fn child_element(children: &[Child]) -> Decimal {
    ordered_children(children)
        .into_iter()
        .enumerate()
        .map(|(position, child)| {
            let amount = child_amount(position, child);
            log::debug!(
                "Child {} born {}: {}",
                position + 1,
                child.date_of_birth,
                amount
            );
            amount
        })
        .sum()
}

fn child_amount(position: usize, child: &Child) -> Decimal {
    let before_limit = born_before_two_child_limit(child.date_of_birth);
    match position {
        0 if before_limit => CHILD_FIRST_HIGHER,
        0 | 1 => CHILD_STANDARD,
        _ if before_limit || !child.exceptions.is_empty() => CHILD_STANDARD,
        _ => Decimal::ZERO,
    }
}

/// Disabled child addition, paid for every disabled child
pub fn disabled_child_addition(children: &[Child]) -> Decimal {
    children
        .iter()
        .map(|child| match child.disability {
            Disability::None => Decimal::ZERO,
            Disability::Lower => DISABLED_CHILD_LOWER,
            Disability::Higher => DISABLED_CHILD_HIGHER,
        })
        .sum()
}

pub fn carer_element(carer: bool) -> Decimal {
    if carer {
        CARER
    } else {
        Decimal::ZERO
    }
}

pub fn work_capability_element(status: WorkCapability) -> Decimal {
    match status {
        WorkCapability::Lcwra => LCWRA,
        WorkCapability::LcwPre2017 => LCW_PRE_2017,
        WorkCapability::Lcw | WorkCapability::None => Decimal::ZERO,
    }
}

/// Childcare costs up to the cap for the number of children
pub fn childcare_element(costs: Decimal, children: usize) -> Decimal {
    let cap = match children {
        0 => Decimal::ZERO,
        1 => CHILDCARE_CAP_ONE_CHILD,
        _ => CHILDCARE_CAP_TWO_OR_MORE,
    };
    costs.max(Decimal::ZERO).min(cap)
}

/// Housing costs. Renters are limited to the area rate for their bedroom
/// entitlement; owners get their declared mortgage payment.
pub fn housing_element(
    housing: &HousingSituation,
    children: usize,
    rates: &RateTable,
) -> Result<Decimal, CalculationError> {
    let Some(bedrooms) = housing.bedroom_entitlement(children) else {
        return Ok(housing.amount.max(Decimal::ZERO));
    };

    let region = housing
        .region
        .ok_or_else(|| CalculationError::invalid("housing.region", InputProblem::Missing))?;
    let area_code = housing
        .area_code
        .as_deref()
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| CalculationError::invalid("housing.area_code", InputProblem::Missing))?;

    let rate = rates.lookup(region, area_code, bedrooms)?;
    let element = capped_housing_cost(rate, housing.amount);
    log::debug!(
        "Housing {:?}: bedrooms={}, rate={}, declared={}, element={}",
        housing.tenure,
        bedrooms,
        rate,
        housing.amount,
        element
    );
    Ok(element)
}

fn capped_housing_cost(rate: Decimal, declared: Decimal) -> Decimal {
    match (rate > Decimal::ZERO, declared > Decimal::ZERO) {
        (true, true) => rate.min(declared),
        (true, false) => rate,
        (false, true) => declared,
        (false, false) => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{ChildException, Household, Tenure};
    use crate::core::rates::{BedroomRates, RateError, Region};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn born(date: &str) -> Child {
        Child::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap())
    }

    fn rates() -> RateTable {
        let mut table = RateTable::new();
        table.insert(
            Region::England,
            "Bristol",
            BedroomRates {
                shared: dec!(420),
                one_bed: dec!(775),
                two_bed: dec!(950),
                three_bed: dec!(1100),
                four_bed: dec!(1500),
            },
        );
        table
    }

    fn renting(tenure: Tenure, amount: Decimal) -> HousingSituation {
        HousingSituation {
            tenure,
            amount,
            region: Some(Region::England),
            area_code: Some("Bristol".to_string()),
        }
    }

    #[test]
    fn standard_allowance_bands() {
        assert_eq!(
            standard_allowance(AllowanceBand::of(24, Household::Single)),
            dec!(316.98)
        );
        assert_eq!(
            standard_allowance(AllowanceBand::of(25, Household::Single)),
            dec!(400.14)
        );
        assert_eq!(
            standard_allowance(AllowanceBand::of(22, Household::Couple { partner_age: 23 })),
            dec!(497.55)
        );
        assert_eq!(
            standard_allowance(AllowanceBand::of(22, Household::Couple { partner_age: 31 })),
            dec!(628.10)
        );
    }

    #[test]
    fn first_child_before_2017_gets_higher_rate() {
        assert_eq!(child_element(&[born("2016-01-01")]), dec!(339.00));
        assert_eq!(child_element(&[born("2018-01-01")]), dec!(292.81));
    }

    #[test]
    fn two_child_limit_applies_to_third_child() {
        let children = [born("2018-01-01"), born("2019-01-01"), born("2020-01-01")];
        assert_eq!(child_element(&children), dec!(292.81) + dec!(292.81));
    }

    #[test]
    fn exception_lifts_two_child_limit() {
        let children = [
            born("2018-01-01"),
            born("2019-01-01"),
            born("2020-01-01").with_exception(ChildException::Adopted),
        ];
        assert_eq!(child_element(&children), dec!(292.81) * dec!(3));
    }

    #[test]
    fn third_child_born_before_limit_counts() {
        let children = [born("2012-01-01"), born("2014-01-01"), born("2016-01-01")];
        assert_eq!(child_element(&children), dec!(339.00) + dec!(292.81) * dec!(2));
    }

    #[test]
    fn children_ordered_by_birth_not_input() {
        // the eldest is first regardless of where it appears in the input
        let children = [born("2020-01-01"), born("2019-01-01"), born("2015-06-01")];
        assert_eq!(child_element(&children), dec!(339.00) + dec!(292.81));
    }

    #[test]
    fn disabled_child_addition_ignores_two_child_limit() {
        let children = [
            born("2018-01-01"),
            born("2019-01-01"),
            born("2020-01-01").with_disability(Disability::Higher),
        ];
        assert_eq!(disabled_child_addition(&children), dec!(495.87));
        assert_eq!(child_element(&children), dec!(292.81) * dec!(2));
    }

    #[test]
    fn carer_and_work_capability() {
        assert_eq!(carer_element(true), dec!(201.68));
        assert_eq!(carer_element(false), Decimal::ZERO);
        assert_eq!(work_capability_element(WorkCapability::Lcwra), dec!(423.27));
        assert_eq!(work_capability_element(WorkCapability::LcwPre2017), dec!(158.76));
        assert_eq!(work_capability_element(WorkCapability::Lcw), Decimal::ZERO);
        assert_eq!(work_capability_element(WorkCapability::None), Decimal::ZERO);
    }

    #[test]
    fn childcare_capped_by_number_of_children() {
        assert_eq!(childcare_element(dec!(500), 0), Decimal::ZERO);
        assert_eq!(childcare_element(dec!(500), 1), dec!(500));
        assert_eq!(childcare_element(dec!(2000), 1), dec!(1031.88));
        assert_eq!(childcare_element(dec!(2000), 3), dec!(1768.94));
    }

    #[test]
    fn rent_capped_at_area_rate() {
        let table = rates();
        // one child: two bedrooms
        assert_eq!(
            housing_element(&renting(Tenure::Rent, dec!(1200)), 1, &table).unwrap(),
            dec!(950)
        );
        assert_eq!(
            housing_element(&renting(Tenure::Rent, dec!(700)), 1, &table).unwrap(),
            dec!(700)
        );
    }

    #[test]
    fn rent_bedrooms_capped_at_four() {
        let table = rates();
        assert_eq!(
            housing_element(&renting(Tenure::Rent, dec!(5000)), 6, &table).unwrap(),
            dec!(1500)
        );
    }

    #[test]
    fn zero_rent_falls_back_to_rate() {
        let table = rates();
        assert_eq!(
            housing_element(&renting(Tenure::Rent, Decimal::ZERO), 0, &table).unwrap(),
            dec!(775)
        );
    }

    #[test]
    fn shared_accommodation_uses_shared_rate() {
        let table = rates();
        assert_eq!(
            housing_element(&renting(Tenure::SharedAccommodation, dec!(600)), 2, &table).unwrap(),
            dec!(420)
        );
    }

    #[test]
    fn owner_gets_mortgage_without_lookup() {
        let housing = HousingSituation {
            tenure: Tenure::Own,
            amount: dec!(650),
            region: None,
            area_code: None,
        };
        assert_eq!(housing_element(&housing, 2, &RateTable::new()).unwrap(), dec!(650));
    }

    #[test]
    fn renting_without_area_is_invalid() {
        let mut housing = renting(Tenure::Rent, dec!(600));
        housing.area_code = None;
        assert_eq!(
            housing_element(&housing, 0, &rates()),
            Err(CalculationError::invalid("housing.area_code", InputProblem::Missing))
        );
    }

    #[test]
    fn unknown_area_aborts() {
        let mut housing = renting(Tenure::Rent, dec!(600));
        housing.area_code = Some("Leeds".to_string());
        assert_eq!(
            housing_element(&housing, 0, &rates()),
            Err(CalculationError::Rate(RateError::RateNotFound {
                region: Region::England,
                area_code: "Leeds".to_string()
            }))
        );
    }
}
