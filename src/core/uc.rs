//! Universal Credit amounts for one monthly assessment period (2025/26 schedule).

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Standard allowance, single claimant under 25
pub const STANDARD_SINGLE_UNDER_25: Decimal = dec!(316.98);
/// Standard allowance, single claimant 25 or over
pub const STANDARD_SINGLE_25_OR_OVER: Decimal = dec!(400.14);
/// Standard allowance, joint claimants both under 25
pub const STANDARD_COUPLE_UNDER_25: Decimal = dec!(497.55);
/// Standard allowance, joint claimants where either is 25 or over
pub const STANDARD_COUPLE_25_OR_OVER: Decimal = dec!(628.10);

/// Age at which the higher standard allowance band starts
pub const ADULT_RATE_AGE: u32 = 25;

/// First child born before 6 April 2017
pub const CHILD_FIRST_HIGHER: Decimal = dec!(339.00);
/// Any other eligible child
pub const CHILD_STANDARD: Decimal = dec!(292.81);

/// Disabled child addition, lower rate
pub const DISABLED_CHILD_LOWER: Decimal = dec!(158.76);
/// Disabled child addition, higher rate (severely disabled child)
pub const DISABLED_CHILD_HIGHER: Decimal = dec!(495.87);

/// Carer element
pub const CARER: Decimal = dec!(201.68);

/// Limited capability for work and work-related activity element
pub const LCWRA: Decimal = dec!(423.27);
/// Limited capability for work element, protected pre-April 2017 claims
pub const LCW_PRE_2017: Decimal = dec!(158.76);

/// Largest monthly amount accepted for any single input figure
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// Childcare cap for a household with one child
pub const CHILDCARE_CAP_ONE_CHILD: Decimal = dec!(1031.88);
/// Childcare cap for a household with two or more children
pub const CHILDCARE_CAP_TWO_OR_MORE: Decimal = dec!(1768.94);

/// Bedroom count at which the rate table stops distinguishing sizes
pub const MAX_BEDROOMS: u8 = 4;

/// Capital at or below this is ignored
pub const CAPITAL_LOWER_LIMIT: Decimal = dec!(6000);
/// Capital at or above this makes the household ineligible
pub const CAPITAL_UPPER_LIMIT: Decimal = dec!(16000);
/// Each started band of this width above the lower limit counts as income
pub const CAPITAL_BAND: Decimal = dec!(250);
/// Assumed monthly income per capital band
pub const CAPITAL_BAND_INCOME: Decimal = dec!(4.35);

/// Work allowance when the award includes housing costs
pub const WORK_ALLOWANCE_WITH_HOUSING: Decimal = dec!(411);
/// Work allowance when the award has no housing costs
pub const WORK_ALLOWANCE_NO_HOUSING: Decimal = dec!(684);
/// Proportion of earnings above the work allowance that reduces the award
pub const TAPER_RATE: Decimal = dec!(0.55);

/// Daily sanction rates by household band
pub const SANCTION_SINGLE_UNDER_25: Decimal = dec!(10.40);
pub const SANCTION_SINGLE_25_OR_OVER: Decimal = dec!(13.10);
pub const SANCTION_COUPLE_UNDER_25: Decimal = dec!(8.10);
pub const SANCTION_COUPLE_25_OR_OVER: Decimal = dec!(10.30);
/// Share of the standard allowance withheld under a reduced-rate sanction
pub const SANCTION_REDUCED_SHARE: Decimal = dec!(0.4);
/// Days used to turn a monthly amount into a daily one
pub const DAYS_PER_PERIOD: Decimal = dec!(30);

/// First day of the two-child limit (6 April 2017)
pub fn two_child_limit_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 4, 6).unwrap()
}

/// Children born before the two-child limit are always eligible
pub fn born_before_two_child_limit(date_of_birth: NaiveDate) -> bool {
    date_of_birth < two_child_limit_start()
}

/// Round a currency amount to pence, half-up
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
