//! Regional housing rate tables keyed by Broad Rental Market Area (BRMA).
//!
//! One CSV per region, one row per area, one column per bedroom band. The
//! table is built once at startup and only read afterwards, so a shared
//! reference can be handed to any number of concurrent calculations.

use super::uc::{MAX_AMOUNT, MAX_BEDROOMS};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Lookup failures. These abort a calculation.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RateError {
    #[error("no {region} rate found for area '{area_code}'")]
    RateNotFound { region: Region, area_code: String },
    #[error("region not supported: {0}")]
    RegionNotSupported(String),
}

/// Failures while loading tables. Only raised at startup.
#[derive(Debug, thiserror::Error)]
pub enum RateLoadError {
    #[error("failed to read rate table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed rate table: {0}")]
    Csv(#[from] csv::Error),
    #[error("rate table row {row} has no area code")]
    MissingAreaCode { row: usize },
    #[error("negative {column} rate for area '{area_code}'")]
    NegativeRate {
        area_code: String,
        column: &'static str,
    },
    #[error("{column} rate for area '{area_code}' is too large")]
    RateTooLarge {
        area_code: String,
        column: &'static str,
    },
    #[error("rate table for {0} has no rows")]
    Empty(Region),
    #[error("no rate tables found in {0}")]
    NoTables(PathBuf),
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Region {
    England,
    Scotland,
    Wales,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::England, Region::Scotland, Region::Wales];

    pub fn display(&self) -> &'static str {
        match self {
            Region::England => "England",
            Region::Scotland => "Scotland",
            Region::Wales => "Wales",
        }
    }

    /// File name of this region's table inside a rates directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Region::England => "england.csv",
            Region::Scotland => "scotland.csv",
            Region::Wales => "wales.csv",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for Region {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "england" => Ok(Region::England),
            "scotland" => Ok(Region::Scotland),
            "wales" => Ok(Region::Wales),
            _ => Err(RateError::RegionNotSupported(s.trim().to_string())),
        }
    }
}

/// Rates for one area, by bedroom band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BedroomRates {
    pub shared: Decimal,
    pub one_bed: Decimal,
    pub two_bed: Decimal,
    pub three_bed: Decimal,
    pub four_bed: Decimal,
}

impl BedroomRates {
    /// Rate for a bedroom count; 0 is the shared accommodation rate and
    /// anything above four uses the four bedroom rate.
    pub fn for_bedrooms(&self, bedrooms: u8) -> Decimal {
        match bedrooms.min(MAX_BEDROOMS) {
            0 => self.shared,
            1 => self.one_bed,
            2 => self.two_bed,
            3 => self.three_bed,
            _ => self.four_bed,
        }
    }

    fn check_range(&self, area_code: &str) -> Result<(), RateLoadError> {
        let columns = [
            ("shared", self.shared),
            ("one_bed", self.one_bed),
            ("two_bed", self.two_bed),
            ("three_bed", self.three_bed),
            ("four_bed", self.four_bed),
        ];
        for (column, rate) in columns {
            if rate < Decimal::ZERO {
                return Err(RateLoadError::NegativeRate {
                    area_code: area_code.to_string(),
                    column,
                });
            }
            if rate > MAX_AMOUNT {
                return Err(RateLoadError::RateTooLarge {
                    area_code: area_code.to_string(),
                    column,
                });
            }
        }
        Ok(())
    }
}

/// CSV row of a rate table. Published tables label the bands CAT A to CAT E.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRecord {
    /// Broad Rental Market Area name or code
    #[serde(alias = "BRMA")]
    pub brma: String,
    /// Shared accommodation rate
    #[serde(alias = "CAT A")]
    pub shared: Decimal,
    /// One bedroom rate
    #[serde(alias = "CAT B")]
    pub one_bed: Decimal,
    /// Two bedroom rate
    #[serde(alias = "CAT C")]
    pub two_bed: Decimal,
    /// Three bedroom rate
    #[serde(alias = "CAT D")]
    pub three_bed: Decimal,
    /// Four or more bedroom rate
    #[serde(alias = "CAT E")]
    pub four_bed: Decimal,
}

impl From<&RateRecord> for BedroomRates {
    fn from(record: &RateRecord) -> Self {
        BedroomRates {
            shared: record.shared,
            one_bed: record.one_bed,
            two_bed: record.two_bed,
            three_bed: record.three_bed,
            four_bed: record.four_bed,
        }
    }
}

/// Column names written by `ucalc schema csv-header`
pub const RATE_CSV_COLUMNS: &[&str] = &["brma", "shared", "one_bed", "two_bed", "three_bed", "four_bed"];

/// Normalise an area code for matching: trim, collapse whitespace, upper-case
pub fn normalize_area_code(area_code: &str) -> String {
    area_code
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Housing rates for every loaded region
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    regions: HashMap<Region, HashMap<String, BedroomRates>>,
}

impl RateTable {
    pub fn new() -> Self {
        RateTable::default()
    }

    /// Load every `<region>.csv` found in `dir`. Regions without a file are
    /// left unloaded; a directory without any table is an error.
    pub fn load_dir(dir: &Path) -> Result<Self, RateLoadError> {
        let mut table = RateTable::new();
        for region in Region::ALL {
            let path = dir.join(region.file_name());
            if !path.is_file() {
                log::debug!("No {} rate table at {}", region, path.display());
                continue;
            }
            let file = File::open(&path).map_err(|source| RateLoadError::Io {
                path: path.clone(),
                source,
            })?;
            let count = table.read_csv(region, BufReader::new(file))?;
            log::info!("Loaded {} {} areas from {}", count, region, path.display());
        }
        if table.regions.is_empty() {
            return Err(RateLoadError::NoTables(dir.to_path_buf()));
        }
        Ok(table)
    }

    /// Read one region's table from CSV, replacing anything already loaded
    /// for that region. Returns the number of areas.
    pub fn read_csv<R: Read>(&mut self, region: Region, reader: R) -> Result<usize, RateLoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut areas = HashMap::new();
        for (index, record) in rdr.deserialize::<RateRecord>().enumerate() {
            let record = record?;
            let area_code = normalize_area_code(&record.brma);
            if area_code.is_empty() {
                // header is line 1
                return Err(RateLoadError::MissingAreaCode { row: index + 2 });
            }
            let rates = BedroomRates::from(&record);
            rates.check_range(&area_code)?;
            if areas.insert(area_code.clone(), rates).is_some() {
                log::warn!("Duplicate {} area '{}', keeping the last row", region, area_code);
            }
        }
        if areas.is_empty() {
            return Err(RateLoadError::Empty(region));
        }
        let count = areas.len();
        self.regions.insert(region, areas);
        Ok(count)
    }

    /// Add or replace a single area's rates
    pub fn insert(&mut self, region: Region, area_code: &str, rates: BedroomRates) {
        self.regions
            .entry(region)
            .or_default()
            .insert(normalize_area_code(area_code), rates);
    }

    /// Rate for an area and bedroom count. Bedroom counts above four use the
    /// four bedroom column; 0 is the shared accommodation column.
    pub fn lookup(&self, region: Region, area_code: &str, bedrooms: u8) -> Result<Decimal, RateError> {
        let rates = self.area(region, area_code)?;
        let rate = rates.for_bedrooms(bedrooms);
        log::debug!(
            "Rate lookup {} '{}' bedrooms={}: {}",
            region,
            area_code,
            bedrooms,
            rate
        );
        Ok(rate)
    }

    /// All bedroom rates for an area
    pub fn area(&self, region: Region, area_code: &str) -> Result<&BedroomRates, RateError> {
        let areas = self.region(region)?;
        areas
            .get(&normalize_area_code(area_code))
            .ok_or_else(|| RateError::RateNotFound {
                region,
                area_code: area_code.trim().to_string(),
            })
    }

    /// Every area of a region, sorted by area code
    pub fn areas(&self, region: Region) -> Result<Vec<(&str, &BedroomRates)>, RateError> {
        let mut areas: Vec<_> = self
            .region(region)?
            .iter()
            .map(|(code, rates)| (code.as_str(), rates))
            .collect();
        areas.sort_by(|a, b| a.0.cmp(b.0));
        Ok(areas)
    }

    /// Regions with a loaded table
    pub fn regions(&self) -> Vec<Region> {
        let mut regions: Vec<_> = self.regions.keys().copied().collect();
        regions.sort();
        regions
    }

    fn region(&self, region: Region) -> Result<&HashMap<String, BedroomRates>, RateError> {
        self.regions
            .get(&region)
            .ok_or_else(|| RateError::RegionNotSupported(region.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const ENGLAND: &str = "\
brma,shared,one_bed,two_bed,three_bed,four_bed
Central London,750.00,1450.00,1800.00,2200.00,2800.00
Bristol,420.50,775.00,950.00,1100.00,1500.00
";

    fn england() -> RateTable {
        let mut table = RateTable::new();
        table
            .read_csv(Region::England, ENGLAND.as_bytes())
            .unwrap();
        table
    }

    #[test]
    fn lookup_by_bedroom_count() {
        let table = england();
        assert_eq!(table.lookup(Region::England, "Bristol", 0).unwrap(), dec!(420.50));
        assert_eq!(table.lookup(Region::England, "Bristol", 1).unwrap(), dec!(775.00));
        assert_eq!(table.lookup(Region::England, "Bristol", 3).unwrap(), dec!(1100.00));
        assert_eq!(table.lookup(Region::England, "Bristol", 4).unwrap(), dec!(1500.00));
    }

    #[test]
    fn lookup_collapses_large_bedroom_counts() {
        let table = england();
        assert_eq!(table.lookup(Region::England, "Bristol", 7).unwrap(), dec!(1500.00));
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let table = england();
        assert_eq!(
            table.lookup(Region::England, "  central   LONDON ", 2).unwrap(),
            dec!(1800.00)
        );
    }

    #[test]
    fn unknown_area_is_rate_not_found() {
        let table = england();
        assert_eq!(
            table.lookup(Region::England, "Atlantis", 1),
            Err(RateError::RateNotFound {
                region: Region::England,
                area_code: "Atlantis".to_string()
            })
        );
    }

    #[test]
    fn unloaded_region_is_not_supported() {
        let table = england();
        assert_eq!(
            table.lookup(Region::Wales, "Cardiff", 1),
            Err(RateError::RegionNotSupported("Wales".to_string()))
        );
    }

    #[test]
    fn region_from_str() {
        assert_eq!("england".parse::<Region>(), Ok(Region::England));
        assert_eq!(" Scotland ".parse::<Region>(), Ok(Region::Scotland));
        assert_eq!("WALES".parse::<Region>(), Ok(Region::Wales));
        assert_eq!(
            "Northern Ireland".parse::<Region>(),
            Err(RateError::RegionNotSupported("Northern Ireland".to_string()))
        );
    }

    #[test]
    fn published_headers_accepted() {
        let csv = "\
BRMA,CAT A,CAT B,CAT C,CAT D,CAT E
Glasgow,350.00,600.00,700.00,850.00,1200.00
";
        let mut table = RateTable::new();
        assert_eq!(table.read_csv(Region::Scotland, csv.as_bytes()).unwrap(), 1);
        assert_eq!(table.lookup(Region::Scotland, "glasgow", 2).unwrap(), dec!(700.00));
    }

    #[test]
    fn duplicate_area_keeps_last_row() {
        let csv = "\
brma,shared,one_bed,two_bed,three_bed,four_bed
Cardiff,300,500,600,700,800
CARDIFF,310,510,610,710,810
";
        let mut table = RateTable::new();
        assert_eq!(table.read_csv(Region::Wales, csv.as_bytes()).unwrap(), 1);
        assert_eq!(table.lookup(Region::Wales, "Cardiff", 1).unwrap(), dec!(510));
    }

    #[test]
    fn negative_rate_rejected() {
        let csv = "\
brma,shared,one_bed,two_bed,three_bed,four_bed
Cardiff,300,-5,600,700,800
";
        let mut table = RateTable::new();
        let err = table.read_csv(Region::Wales, csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            RateLoadError::NegativeRate { column: "one_bed", .. }
        ));
    }

    #[test]
    fn oversized_rate_rejected() {
        let csv = "\
brma,shared,one_bed,two_bed,three_bed,four_bed
Cardiff,300,500,600,700,79228162514264337593543950335
";
        let mut table = RateTable::new();
        let err = table.read_csv(Region::Wales, csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            RateLoadError::RateTooLarge { column: "four_bed", .. }
        ));
    }

    #[test]
    fn blank_area_code_rejected() {
        let csv = "\
brma,shared,one_bed,two_bed,three_bed,four_bed
Cardiff,300,500,600,700,800
  ,300,500,600,700,800
";
        let mut table = RateTable::new();
        let err = table.read_csv(Region::Wales, csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RateLoadError::MissingAreaCode { row: 3 }));
    }

    #[test]
    fn header_only_table_is_empty() {
        let csv = "brma,shared,one_bed,two_bed,three_bed,four_bed\n";
        let mut table = RateTable::new();
        let err = table.read_csv(Region::England, csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RateLoadError::Empty(Region::England)));
    }

    #[test]
    fn areas_sorted() {
        let table = england();
        let codes: Vec<_> = table
            .areas(Region::England)
            .unwrap()
            .into_iter()
            .map(|(code, _)| code)
            .collect();
        assert_eq!(codes, vec!["BRISTOL", "CENTRAL LONDON"]);
    }

    #[test]
    fn table_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RateTable>();
    }
}
