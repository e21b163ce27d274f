use super::profile::{AdvancePaymentInfo, ClaimantProfile, WorkCapability};
use super::sanctions::sanction_deduction;
use super::uc::{
    CAPITAL_BAND, CAPITAL_BAND_INCOME, CAPITAL_LOWER_LIMIT, CAPITAL_UPPER_LIMIT, TAPER_RATE,
    WORK_ALLOWANCE_NO_HOUSING, WORK_ALLOWANCE_WITH_HOUSING,
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Result of testing capital against the limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "amount")]
pub enum CapitalAssessment {
    /// Capital at or above the upper limit; no award is possible
    Ineligible,
    /// Monthly income assumed from capital
    Tariff(Decimal),
}

/// Amounts taken off the maximum award
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Deductions {
    pub capital_income: Decimal,
    pub earnings: Decimal,
    pub sanction: Decimal,
    pub advance_payment: Decimal,
}

impl Deductions {
    pub fn total(&self) -> Decimal {
        self.capital_income + self.earnings + self.sanction + self.advance_payment
    }
}

/// Work out the deductions for an eligible household.
///
/// `capital_income` comes from [`capital_income`], which the caller must
/// already have checked for ineligibility.
pub fn calculate_deductions(
    profile: &ClaimantProfile,
    capital_income: Decimal,
    work_allowance: Decimal,
    standard_allowance: Decimal,
) -> Deductions {
    let deductions = Deductions {
        capital_income,
        earnings: earnings_taper(profile.earnings, work_allowance),
        sanction: profile
            .sanction
            .as_ref()
            .map_or(Decimal::ZERO, |s| {
                sanction_deduction(s, profile.allowance_band(), standard_allowance)
            }),
        advance_payment: profile
            .advance_payment
            .as_ref()
            .map_or(Decimal::ZERO, advance_repayment),
    };
    log::debug!("Deductions: {:?}", deductions);
    deductions
}

/// Capital up to the lower limit is ignored; each started band above it
/// counts as monthly income.
pub fn capital_income(capital: Decimal) -> CapitalAssessment {
    if capital >= CAPITAL_UPPER_LIMIT {
        return CapitalAssessment::Ineligible;
    }
    if capital <= CAPITAL_LOWER_LIMIT {
        return CapitalAssessment::Tariff(Decimal::ZERO);
    }
    let bands = ((capital - CAPITAL_LOWER_LIMIT) / CAPITAL_BAND).ceil();
    CapitalAssessment::Tariff(bands * CAPITAL_BAND_INCOME)
}

/// Earnings disregarded before the taper. Only households with children or
/// limited capability for work get one; it is lower when housing costs are
/// paid.
pub fn work_allowance(
    has_children: bool,
    work_capability: WorkCapability,
    housing_support: bool,
) -> Decimal {
    if !has_children && work_capability == WorkCapability::None {
        return Decimal::ZERO;
    }
    if housing_support {
        WORK_ALLOWANCE_WITH_HOUSING
    } else {
        WORK_ALLOWANCE_NO_HOUSING
    }
}

pub fn earnings_taper(earnings: Decimal, work_allowance: Decimal) -> Decimal {
    (earnings - work_allowance).max(Decimal::ZERO) * TAPER_RATE
}

/// Monthly advance recovery; without a repayment period the whole advance
/// is recovered at once.
pub fn advance_repayment(advance: &AdvancePaymentInfo) -> Decimal {
    let amount = match advance.repayment_months {
        Some(months) if months > 0 => advance.amount / Decimal::from(months),
        _ => advance.amount,
    };
    amount.max(Decimal::ZERO)
}
