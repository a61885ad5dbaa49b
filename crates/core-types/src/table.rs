use crate::enums::ALL_COMPANIES;
use crate::error::CoreError;
use crate::structs::{DateRange, SalesOrderItem};
use std::collections::HashSet;

/// The immutable, in-memory dataset every dashboard view is derived from.
///
/// A table always holds at least one row, so its date span is always defined.
#[derive(Debug, Clone)]
pub struct SalesTable {
    rows: Vec<SalesOrderItem>,
    date_span: DateRange,
}

impl SalesTable {
    pub fn new(rows: Vec<SalesOrderItem>) -> Result<Self, CoreError> {
        let first = rows.first().ok_or(CoreError::EmptyTable)?.created_at;
        let (start, end) = rows.iter().fold((first, first), |(min, max), row| {
            (min.min(row.created_at), max.max(row.created_at))
        });

        Ok(Self {
            rows,
            date_span: DateRange { start, end },
        })
    }

    pub fn rows(&self) -> &[SalesOrderItem] {
        &self.rows
    }

    // `new` rejects empty input, so there is no `is_empty`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// The earliest and latest `created_at` in the table.
    pub fn date_span(&self) -> DateRange {
        self.date_span
    }

    /// Distinct company names in the order they first appear.
    pub fn companies(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row.company_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// The options of the company selector: `"All"` first, then every company.
    pub fn company_options(&self) -> Vec<String> {
        std::iter::once(ALL_COMPANIES)
            .chain(self.companies())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn item(company: &str, y: i32, m: u32, d: u32) -> SalesOrderItem {
        SalesOrderItem {
            order_id: "500000000".to_string(),
            created_at: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            company_name: company.to_string(),
            short_description: "Road Bike".to_string(),
            quantity: 1,
            gross_amount_item: dec!(10),
            latitude: dec!(1),
            longitude: dec!(2),
        }
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(SalesTable::new(vec![]).unwrap_err(), CoreError::EmptyTable);
    }

    #[test]
    fn date_span_covers_all_rows() {
        let table = SalesTable::new(vec![
            item("B", 2021, 5, 3),
            item("A", 2020, 1, 9),
            item("A", 2021, 7, 1),
        ])
        .unwrap();
        let span = table.date_span();
        assert_eq!(span.start, NaiveDate::from_ymd_opt(2020, 1, 9).unwrap());
        assert_eq!(span.end, NaiveDate::from_ymd_opt(2021, 7, 1).unwrap());
    }

    #[test]
    fn company_options_start_with_all_in_first_seen_order() {
        let table = SalesTable::new(vec![
            item("Zeta", 2021, 1, 1),
            item("Alpha", 2021, 1, 2),
            item("Zeta", 2021, 1, 3),
        ])
        .unwrap();
        assert_eq!(table.company_options(), vec!["All", "Zeta", "Alpha"]);
    }
}
