//! Calculate command - monthly entitlement with a breakdown of how it was reached

use crate::cmd::{gbp, read_profile, reference_date, RatesArgs};
use crate::core::{calculate, Assessment, Outcome};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct CalculateCommand {
    /// Profile JSON file. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    profile: PathBuf,

    #[command(flatten)]
    rates: RatesArgs,

    /// Work out ages at this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

/// Row of the breakdown table
#[derive(Debug, Clone, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl BreakdownRow {
    fn new(item: &str, amount: String) -> Self {
        BreakdownRow {
            item: item.to_string(),
            amount,
        }
    }
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = read_profile(&self.profile)?;
        let rates = self.rates.load()?;
        let date = reference_date(self.reference_date, &input);
        let profile = input.to_profile(date)?;
        let outcome = calculate(&profile, &rates)?;
        log::info!("Calculated entitlement at {}: {}", date, outcome.entitlement());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            self.print_outcome(&outcome, date);
        }
        Ok(())
    }

    fn print_outcome(&self, outcome: &Outcome, date: NaiveDate) {
        println!();
        println!("UNIVERSAL CREDIT ASSESSMENT ({})", date.format("%Y-%m-%d"));
        println!();

        match outcome {
            Outcome::Ineligible { capital } => {
                println!("Not eligible: capital of {} is at or above the upper limit", gbp(*capital));
            }
            Outcome::Entitled(assessment) => {
                let table = Table::new(breakdown_rows(assessment))
                    .with(Style::rounded())
                    .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
                    .to_string();
                println!("{}", table);
                println!();
                println!("Monthly entitlement: {}", gbp(assessment.entitlement));
            }
        }
    }
}

fn breakdown_rows(assessment: &Assessment) -> Vec<BreakdownRow> {
    let elements = &assessment.elements;
    let deductions = &assessment.deductions;
    let credit = |item: &str, amount| BreakdownRow::new(item, gbp(amount));
    let debit = |item: &str, amount| BreakdownRow::new(item, format!("-{}", gbp(amount)));

    let mut rows = vec![
        credit("Standard allowance", elements.standard_allowance),
        credit("Child element", elements.child),
        credit("Disabled child addition", elements.disabled_child),
        credit("Carer element", elements.carer),
        credit("Work capability element", elements.work_capability),
        credit("Childcare element", elements.childcare),
        credit("Housing element", elements.housing),
        credit("Total allowance", assessment.total_allowance),
        debit("Capital income", deductions.capital_income),
        debit("Earnings taper", deductions.earnings),
        debit("Sanction", deductions.sanction),
        debit("Advance repayment", deductions.advance_payment),
        debit("Total deductions", assessment.total_deductions),
    ];
    if !assessment.work_allowance.is_zero() {
        rows.push(credit("Work allowance applied", assessment.work_allowance));
    }
    rows
}
