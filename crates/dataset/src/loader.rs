use crate::error::DatasetError;
use chrono::NaiveDate;
use core_types::{SalesOrderItem, SalesTable};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns the input file must provide. Any other column is ignored.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "salesorderid",
    "createdat",
    "companyname",
    "short_descr",
    "quantity",
    "grossamount_item",
    "latitude",
    "longitude",
];

/// One row of the input file, with the file's column names.
#[derive(Debug, Deserialize)]
struct SalesRecord {
    salesorderid: String,
    createdat: String,
    companyname: String,
    short_descr: String,
    quantity: u64,
    grossamount_item: Decimal,
    latitude: Decimal,
    longitude: Decimal,
}

impl SalesRecord {
    fn into_item(self, line: u64) -> Result<SalesOrderItem, DatasetError> {
        let created_at = parse_date(&self.createdat).ok_or_else(|| DatasetError::InvalidDate {
            line,
            value: self.createdat.clone(),
        })?;

        Ok(SalesOrderItem {
            order_id: self.salesorderid,
            created_at,
            company_name: self.companyname,
            short_description: self.short_descr,
            quantity: self.quantity,
            gross_amount_item: self.grossamount_item,
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

/// Parses a `YYYY-MM-DD` date, ignoring a trailing time-of-day if present.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn error_line(err: &csv::Error) -> u64 {
    err.position().map_or(0, |pos| pos.line())
}

/// Loads the sales table from a CSV file on disk.
pub fn load_sales_table(path: &Path) -> Result<SalesTable, DatasetError> {
    tracing::info!(path = %path.display(), "Loading sales dataset.");
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_sales_table_from_reader(file)
}

/// Loads the sales table from any reader producing header-bearing CSV.
pub fn load_sales_table_from_reader<R: Read>(reader: R) -> Result<SalesTable, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(DatasetError::Header)?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let mut items = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|source| DatasetError::Parse {
            line: error_line(&source),
            source,
        })?;
        let line = record.position().map_or(0, |pos| pos.line());
        let raw: SalesRecord = record
            .deserialize(Some(&headers))
            .map_err(|source| DatasetError::Parse { line, source })?;
        items.push(raw.into_item(line)?);
    }

    let table = SalesTable::new(items).map_err(|_| DatasetError::Empty)?;
    let span = table.date_span();
    tracing::info!(
        rows = table.len(),
        companies = table.companies().len(),
        from = %span.start,
        to = %span.end,
        "Sales dataset loaded."
    );

    Ok(table)
}
