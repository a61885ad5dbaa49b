use crate::enums::CompanySelection;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single line item of a sales order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderItem {
    /// Opaque order identifier. Several items share one order.
    pub order_id: String,
    pub created_at: NaiveDate,
    pub company_name: String,
    /// The bike category, e.g. "Mountain Bike".
    pub short_description: String,
    pub quantity: u64,
    pub gross_amount_item: Decimal,
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// An inclusive range of calendar days. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidInput(
                "date range".to_string(),
                format!("start {} is after end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the range in ascending order, both ends included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Number of days covered, both ends included.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The raw output of a date-range picker.
///
/// Pickers may hand back a half-finished selection (only a start date while
/// the user is still choosing), so both ends are optional here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateSelection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A selection covering exactly `range`.
    pub fn from_range(range: DateRange) -> Self {
        Self {
            start: Some(range.start),
            end: Some(range.end),
        }
    }

    /// Resolves the selection to a concrete range.
    ///
    /// An incomplete or inverted selection resolves to `full_span`.
    pub fn resolve(&self, full_span: DateRange) -> DateRange {
        self.as_range().unwrap_or(full_span)
    }

    /// The selection as a range, or `None` when it is incomplete or inverted.
    pub fn as_range(&self) -> Option<DateRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => DateRange::new(start, end).ok(),
            _ => None,
        }
    }
}

/// How a company marker is drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub rgb: [u8; 3],
    /// Between 0.0 (transparent) and 1.0 (opaque).
    pub opacity: f64,
}

impl MarkerStyle {
    pub const HIGHLIGHTED: MarkerStyle = MarkerStyle {
        rgb: [170, 245, 66],
        opacity: 0.7,
    };

    pub const DEFAULT: MarkerStyle = MarkerStyle {
        rgb: [250, 95, 255],
        opacity: 0.5,
    };

    /// The style as normalized `[r, g, b, a]` channels, as map widgets expect.
    pub fn to_rgba(&self) -> [f64; 4] {
        [
            f64::from(self.rgb[0]) / 255.0,
            f64::from(self.rgb[1]) / 255.0,
            f64::from(self.rgb[2]) / 255.0,
            self.opacity,
        ]
    }
}

/// Everything the user picked in one interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub dates: DateSelection,
    pub company: CompanySelection,
}

impl FilterState {
    pub fn new(dates: DateSelection, company: CompanySelection) -> Self {
        Self { dates, company }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(DateRange::new(date(2021, 1, 2), date(2021, 1, 1)).is_err());
        assert!(DateRange::new(date(2021, 1, 1), date(2021, 1, 1)).is_ok());
    }

    #[test]
    fn range_days_are_inclusive() {
        let range = DateRange::new(date(2021, 2, 27), date(2021, 3, 2)).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(
            days,
            vec![date(2021, 2, 27), date(2021, 2, 28), date(2021, 3, 1), date(2021, 3, 2)]
        );
        assert_eq!(range.len_days(), 4);
    }

    #[test]
    fn incomplete_selection_falls_back_to_span() {
        let span = DateRange::new(date(2020, 1, 1), date(2021, 12, 31)).unwrap();

        let single = DateSelection::new(Some(date(2021, 3, 1)), None);
        assert_eq!(single.resolve(span), span);

        let empty = DateSelection::default();
        assert_eq!(empty.resolve(span), span);

        let inverted = DateSelection::new(Some(date(2021, 3, 2)), Some(date(2021, 3, 1)));
        assert_eq!(inverted.resolve(span), span);

        let valid = DateSelection::new(Some(date(2021, 3, 1)), Some(date(2021, 3, 31)));
        assert_eq!(
            valid.resolve(span),
            DateRange::new(date(2021, 3, 1), date(2021, 3, 31)).unwrap()
        );
    }
}
