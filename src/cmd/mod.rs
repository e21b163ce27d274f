pub mod calculate;
pub mod rates;
pub mod schema;
pub mod validate;

use crate::core::{read_profile_json, round_currency, ProfileInput, RateTable};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Where to find the regional rate tables
#[derive(Args, Debug)]
pub struct RatesArgs {
    /// Directory holding england.csv, scotland.csv and wales.csv
    #[arg(long = "rates", env = "UCALC_RATES_DIR", default_value = "data/rates")]
    pub dir: PathBuf,
}

impl RatesArgs {
    pub fn load(&self) -> anyhow::Result<RateTable> {
        let table = RateTable::load_dir(&self.dir)
            .with_context(|| format!("loading rate tables from {}", self.dir.display()))?;
        log::debug!("Rate tables loaded for {:?}", table.regions());
        Ok(table)
    }
}

/// Read a profile (JSON) from a file, or stdin with "-"
pub fn read_profile(path: &Path) -> anyhow::Result<ProfileInput> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        read_profile_json(BufReader::new(file))
    }
}

fn read_from_stdin() -> anyhow::Result<ProfileInput> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a profile file or pipe JSON to stdin.");
    }

    read_profile_json(io::Cursor::new(buffer))
}

/// Date ages are worked out at: the flag, then the profile, then today
pub fn reference_date(flag: Option<NaiveDate>, input: &ProfileInput) -> NaiveDate {
    flag.or(input.reference_date)
        .unwrap_or_else(|| chrono::Local::now().date_naive())
}

/// Format an amount as pounds and pence
pub fn gbp(amount: Decimal) -> String {
    format!("\u{00A3}{:.2}", round_currency(amount))
}
