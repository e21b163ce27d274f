pub mod deductions;
pub mod elements;
pub mod entitlement;
pub mod error;
pub mod input;
pub mod profile;
pub mod rates;
pub mod sanctions;
pub mod uc;

// Flat public surface for domain types and functions.
pub use deductions::{capital_income, CapitalAssessment, Deductions};
pub use elements::{calculate_elements, Elements};
pub use entitlement::{calculate, Assessment, Outcome};
pub use error::{CalculationError, InputProblem};
pub use input::{read_profile_json, HousingInput, ProfileInput};
pub use profile::{
    AdvancePaymentInfo, AllowanceBand, Child, ChildException, ClaimantProfile, Disability,
    Household, HousingSituation, SanctionInfo, SanctionLevel, Tenure, WorkCapability,
};
pub use rates::{BedroomRates, RateError, RateLoadError, RateTable, Region};
pub use uc::round_currency;
