//! Rates command - look up or list regional housing rates

use crate::cmd::{gbp, RatesArgs};
use crate::core::{BedroomRates, Region};
use clap::Args;
use serde::Serialize;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    /// England, Scotland or Wales
    #[arg(long)]
    region: String,

    /// Broad Rental Market Area; lists the whole region when omitted
    #[arg(short, long)]
    area: Option<String>,

    /// Bedroom count (0 for shared accommodation, 4 covers four or more)
    #[arg(short, long, requires = "area")]
    bedrooms: Option<u8>,

    #[command(flatten)]
    rates: RatesArgs,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Tabled, Serialize)]
struct AreaRow {
    #[tabled(rename = "BRMA")]
    brma: String,
    #[tabled(rename = "Shared")]
    shared: String,
    #[tabled(rename = "1 Bed")]
    one_bed: String,
    #[tabled(rename = "2 Bed")]
    two_bed: String,
    #[tabled(rename = "3 Bed")]
    three_bed: String,
    #[tabled(rename = "4+ Bed")]
    four_bed: String,
}

impl AreaRow {
    fn new(brma: &str, rates: &BedroomRates) -> Self {
        AreaRow {
            brma: brma.to_string(),
            shared: format!("{:.2}", rates.shared),
            one_bed: format!("{:.2}", rates.one_bed),
            two_bed: format!("{:.2}", rates.two_bed),
            three_bed: format!("{:.2}", rates.three_bed),
            four_bed: format!("{:.2}", rates.four_bed),
        }
    }
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let region: Region = self.region.parse()?;
        let table = self.rates.load()?;

        let rows = match (&self.area, self.bedrooms) {
            (Some(area), Some(bedrooms)) => {
                let rate = table.lookup(region, area, bedrooms)?;
                println!("{}", gbp(rate));
                return Ok(());
            }
            (Some(area), None) => vec![AreaRow::new(area.trim(), table.area(region, area)?)],
            (None, _) => table
                .areas(region)?
                .into_iter()
                .map(|(code, rates)| AreaRow::new(code, rates))
                .collect(),
        };

        if self.csv {
            self.write_csv(&rows)
        } else {
            self.print_table(&rows, region);
            Ok(())
        }
    }

    fn print_table(&self, rows: &[AreaRow], region: Region) {
        println!();
        println!("HOUSING RATES ({})", region);
        println!();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn write_csv(&self, rows: &[AreaRow]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for row in rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
