//! Schema command - print expected input formats

use crate::core::rates::RATE_CSV_COLUMNS;
use crate::core::ProfileInput;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the profile input
    JsonSchema,
    /// Rate table CSV header row
    CsvHeader,
    /// Rate table CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(ProfileInput);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", RATE_CSV_COLUMNS.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Rate Table CSV Format");
        println!("=====================");
        println!();
        for (name, alias, description) in CSV_FIELD_DESCRIPTIONS {
            println!("{:10} ({:5})  {}", name, alias, description);
        }
        println!();
        println!("One file per region: england.csv, scotland.csv, wales.csv");
        println!("Rates are monthly amounts in pounds");
        Ok(())
    }
}

const CSV_FIELD_DESCRIPTIONS: &[(&str, &str, &str)] = &[
    ("brma", "BRMA", "Broad Rental Market Area name or code"),
    ("shared", "CAT A", "Shared accommodation rate"),
    ("one_bed", "CAT B", "One bedroom rate"),
    ("two_bed", "CAT C", "Two bedroom rate"),
    ("three_bed", "CAT D", "Three bedroom rate"),
    ("four_bed", "CAT E", "Four or more bedroom rate"),
];
