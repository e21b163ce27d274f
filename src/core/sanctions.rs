//! Sanction deductions.
//!
//! The daily rate is picked from the household's allowance band unless the
//! sanction runs at the reduced 40% rate, in which case it is a share of the
//! standard allowance.

use super::profile::{AllowanceBand, SanctionInfo, SanctionLevel};
use super::uc::{
    DAYS_PER_PERIOD, SANCTION_COUPLE_25_OR_OVER, SANCTION_COUPLE_UNDER_25,
    SANCTION_REDUCED_SHARE, SANCTION_SINGLE_25_OR_OVER, SANCTION_SINGLE_UNDER_25,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Daily amount withheld per sanctioned claimant
pub fn daily_rate(
    level: SanctionLevel,
    band: AllowanceBand,
    reduced_rate: bool,
    standard_allowance: Decimal,
) -> Decimal {
    if level == SanctionLevel::None {
        return Decimal::ZERO;
    }

    if reduced_rate {
        // the reduced rate is its own cap
        let rate = standard_allowance * SANCTION_REDUCED_SHARE / DAYS_PER_PERIOD;
        log::debug!("Sanction {:?} at reduced rate: {}/day", level, rate);
        return rate;
    }

    let (rate, cap) = match band {
        AllowanceBand::SingleUnder25 => {
            (SANCTION_SINGLE_UNDER_25, standard_allowance / DAYS_PER_PERIOD)
        }
        AllowanceBand::Single25OrOver => {
            (SANCTION_SINGLE_25_OR_OVER, standard_allowance / DAYS_PER_PERIOD)
        }
        AllowanceBand::CoupleUnder25 => (
            SANCTION_COUPLE_UNDER_25,
            standard_allowance / dec!(2) / DAYS_PER_PERIOD,
        ),
        AllowanceBand::Couple25OrOver => (
            SANCTION_COUPLE_25_OR_OVER,
            standard_allowance / dec!(2) / DAYS_PER_PERIOD,
        ),
    };
    let daily = rate.min(cap);
    log::debug!(
        "Sanction {:?} band {:?}: rate={}, cap={}, daily={}",
        level,
        band,
        rate,
        cap,
        daily
    );
    daily
}

/// Total sanction deduction for the period, never negative
pub fn sanction_deduction(
    sanction: &SanctionInfo,
    band: AllowanceBand,
    standard_allowance: Decimal,
) -> Decimal {
    if sanction.days == 0 {
        return Decimal::ZERO;
    }
    let daily = daily_rate(sanction.level, band, sanction.reduced_rate, standard_allowance);
    let total = daily * Decimal::from(sanction.days) * Decimal::from(sanction.claimants);
    total.max(Decimal::ZERO)
}
