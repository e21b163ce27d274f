//! Validate command - check a profile without calculating an award

use crate::cmd::{read_profile, reference_date};
use crate::core::{CalculationError, ClaimantProfile, Household, RateError};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Profile JSON file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    profile: PathBuf,

    /// Work out ages at this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct ValidationOutput {
    reference_date: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_profile(&self.profile)?;
        let date = reference_date(self.reference_date, &input);
        let result = input.to_profile(date);

        if self.json {
            let output = ValidationOutput {
                reference_date: date.format("%Y-%m-%d").to_string(),
                valid: result.is_ok(),
                field: result.as_ref().err().map(|e| problem_field(e).to_string()),
                message: result.as_ref().err().map(ToString::to_string),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_text(&result, date);
        }

        // Exit with code 1 if the profile is invalid
        if result.is_err() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, result: &Result<ClaimantProfile, CalculationError>, date: NaiveDate) {
        println!();
        println!("VALIDATION RESULTS ({})", date.format("%Y-%m-%d"));
        println!();

        match result {
            Ok(profile) => {
                println!("\u{2713} Profile is valid.");
                println!();
                println!("  Claimant age:     {}", profile.age);
                match profile.household {
                    Household::Single => println!("  Household:        single"),
                    Household::Couple { partner_age } => {
                        println!("  Household:        couple (partner age {})", partner_age)
                    }
                }
                println!("  Children:         {}", profile.children.len());
                println!("  Work capability:  {:?}", profile.work_capability);
                if let Some(bedrooms) = profile.housing.bedroom_entitlement(profile.children.len()) {
                    println!("  Bedrooms:         {}", bedrooms);
                }
            }
            Err(err) => {
                println!("\u{26A0} [{}] {}", problem_field(err), err);
            }
        }
    }
}

fn problem_field(err: &CalculationError) -> &str {
    match err {
        CalculationError::InvalidInput { field, .. } => field.as_str(),
        CalculationError::Rate(RateError::RegionNotSupported(_)) => "housing.region",
        CalculationError::Rate(RateError::RateNotFound { .. }) => "housing.area_code",
    }
}
